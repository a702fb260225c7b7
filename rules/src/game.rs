//! 对局状态
//!
//! `GameState` 在每一步被整体替换：`play` 返回新状态，旧状态保持不变。
//! 将死或逼和后为终局，不再接受走法。

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::error::RuleError;
use crate::executor::MoveExecutor;
use crate::moves::{Move, MoveGenerator};
use crate::notation::Notation;
use crate::piece::{Color, Position};
use crate::record::{DrawReason, GameResult, WinReason};

/// 对局进行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// 进行中
    InProgress,
    /// 将死
    Checkmate { winner: Color },
    /// 逼和
    Stalemate,
}

/// 国际象棋对局状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// 棋盘
    pub board: Board,
    /// 当前走子方
    pub side_to_move: Color,
    /// 走子方是否被将军
    pub is_check: bool,
    /// 走子方是否被将死
    pub is_checkmate: bool,
    /// 是否逼和
    pub is_stalemate: bool,
    /// 过路兵目标格（只在兵走两格后的下一步有效）
    pub en_passant_target: Option<Position>,
    /// 走法记录
    pub move_history: Vec<String>,
}

impl GameState {
    /// 创建标准初始局面
    pub fn new() -> Self {
        Self::from_position(Board::initial(), Color::White, None)
    }

    /// 从任意局面创建，并计算将军/将死/逼和标记
    pub fn from_position(
        board: Board,
        side_to_move: Color,
        en_passant_target: Option<Position>,
    ) -> Self {
        let is_check = MoveGenerator::is_in_check(&board, side_to_move);
        let has_moves = MoveGenerator::has_any_legal_moves(&board, side_to_move, en_passant_target);

        Self {
            board,
            side_to_move,
            is_check,
            is_checkmate: is_check && !has_moves,
            is_stalemate: !is_check && !has_moves,
            en_passant_target,
            move_history: Vec::new(),
        }
    }

    /// 获取对局状态
    pub fn status(&self) -> GameStatus {
        if self.is_checkmate {
            GameStatus::Checkmate {
                winner: self.side_to_move.opponent(),
            }
        } else if self.is_stalemate {
            GameStatus::Stalemate
        } else {
            GameStatus::InProgress
        }
    }

    /// 是否终局
    pub fn is_over(&self) -> bool {
        self.is_checkmate || self.is_stalemate
    }

    /// 终局结果
    pub fn result(&self) -> Option<GameResult> {
        match self.status() {
            GameStatus::InProgress => None,
            GameStatus::Checkmate { winner: Color::White } => {
                Some(GameResult::WhiteWin(WinReason::Checkmate))
            }
            GameStatus::Checkmate { winner: Color::Black } => {
                Some(GameResult::BlackWin(WinReason::Checkmate))
            }
            GameStatus::Stalemate => Some(GameResult::Draw(DrawReason::Stalemate)),
        }
    }

    /// 获取指定格子上己方棋子的合法目标格
    pub fn legal_moves(&self, pos: Position) -> Vec<Position> {
        match self.board.get(pos) {
            Some(piece) if piece.color == self.side_to_move && !self.is_over() => {
                MoveGenerator::legal_moves(&self.board, pos, self.en_passant_target)
            }
            _ => Vec::new(),
        }
    }

    /// 走子方的所有合法走法
    pub fn all_legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        MoveGenerator::all_legal_moves(&self.board, self.side_to_move, self.en_passant_target)
    }

    /// 走一步，返回新的对局状态
    pub fn play(&self, from: Position, to: Position) -> Result<GameState, RuleError> {
        if self.is_over() {
            warn!("Rejected move {}{}: game is over", from, to);
            return Err(RuleError::GameOver);
        }

        let piece = self.board.get(from).ok_or_else(|| RuleError::NoPiece {
            square: from.to_algebraic(),
        })?;
        if piece.color != self.side_to_move {
            warn!("Rejected move {}{}: not {}'s piece", from, to, self.side_to_move);
            return Err(RuleError::NotYourTurn);
        }

        if !MoveGenerator::legal_moves(&self.board, from, self.en_passant_target).contains(&to) {
            warn!("Rejected illegal move {}{}", from, to);
            return Err(RuleError::IllegalMove {
                from: from.to_algebraic(),
                to: to.to_algebraic(),
            });
        }

        let outcome = MoveExecutor::apply(&self.board, from, to, self.en_passant_target);
        let notation = Notation::describe(&self.board, from, to, &outcome);
        debug!("{} plays {}", self.side_to_move, notation);

        let mut next = GameState::from_position(
            outcome.board,
            self.side_to_move.opponent(),
            outcome.en_passant_target,
        );
        next.move_history = self.move_history.clone();
        next.move_history.push(notation);

        if let Some(result) = next.result() {
            info!("Game over after {} plies: {:?}", next.move_history.len(), result);
        }

        Ok(next)
    }

    /// 按走法结构走一步
    pub fn play_move(&self, mv: Move) -> Result<GameState, RuleError> {
        self.play(mv.from, mv.to)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
