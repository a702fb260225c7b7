//! 跳棋对局状态
//!
//! 黑方先走。与国际象棋对局一样，`play` 返回新状态，旧状态不变。

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::board::CheckersBoard;
use super::moves::{self, CheckersMove};
use crate::error::RuleError;
use crate::piece::{Color, Position};
use crate::record::{GameResult, WinReason};

/// 跳棋对局
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckersGame {
    /// 棋盘
    pub board: CheckersBoard,
    /// 当前走子方
    pub side_to_move: Color,
    /// 走法记录
    pub move_history: Vec<String>,
}

impl CheckersGame {
    /// 标准开局，黑方先走
    pub fn new() -> Self {
        Self::from_position(CheckersBoard::initial(), Color::Black)
    }

    pub fn from_position(board: CheckersBoard, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
            move_history: Vec::new(),
        }
    }

    /// 胜方（未分胜负时为 None）
    pub fn winner(&self) -> Option<Color> {
        moves::winner(&self.board, self.side_to_move)
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// 终局结果：吃光对方记为 Elimination，否则为 NoMoves
    pub fn result(&self) -> Option<GameResult> {
        let winner = self.winner()?;
        let reason = if self.board.count(winner.opponent()) == 0 {
            WinReason::Elimination
        } else {
            WinReason::NoMoves
        };
        Some(match winner {
            Color::White => GameResult::WhiteWin(reason),
            Color::Black => GameResult::BlackWin(reason),
        })
    }

    /// 指定格子上己方棋子的走法
    pub fn legal_moves(&self, pos: Position) -> Vec<CheckersMove> {
        if self.is_over() || self.board.get(pos).color() != Some(self.side_to_move) {
            return Vec::new();
        }
        moves::valid_moves(&self.board, pos)
    }

    /// 走子方的所有走法
    pub fn all_moves(&self) -> Vec<CheckersMove> {
        if self.is_over() {
            return Vec::new();
        }
        moves::all_moves(&self.board, self.side_to_move)
    }

    /// 走一步，返回新的对局状态
    pub fn play(&self, from: Position, to: Position) -> Result<CheckersGame, RuleError> {
        if self.is_over() {
            warn!("Rejected checkers move {}-{}: game is over", from, to);
            return Err(RuleError::GameOver);
        }

        let color = self.board.get(from).color().ok_or_else(|| RuleError::NoPiece {
            square: from.to_algebraic(),
        })?;
        if color != self.side_to_move {
            return Err(RuleError::NotYourTurn);
        }

        let mv = moves::valid_moves(&self.board, from)
            .into_iter()
            .find(|mv| mv.to == to)
            .ok_or_else(|| RuleError::IllegalMove {
                from: from.to_algebraic(),
                to: to.to_algebraic(),
            })?;

        let outcome = moves::apply(&self.board, from, to);
        let notation = moves::notation(&mv, &outcome);
        debug!("{} plays {}", self.side_to_move, notation);

        let mut move_history = self.move_history.clone();
        move_history.push(notation);
        let next = CheckersGame {
            board: outcome.board,
            side_to_move: self.side_to_move.opponent(),
            move_history,
        };

        if let Some(result) = next.result() {
            info!("Checkers game over after {} plies: {:?}", next.move_history.len(), result);
        }

        Ok(next)
    }

    pub fn play_move(&self, mv: CheckersMove) -> Result<CheckersGame, RuleError> {
        self.play(mv.from, mv.to)
    }
}

impl Default for CheckersGame {
    fn default() -> Self {
        Self::new()
    }
}
