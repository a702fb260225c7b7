//! 走法生成和验证
//!
//! 伪合法走法按棋子规则生成；合法走法通过执行器模拟后过滤掉
//! 使己方王处于被攻击状态的走法。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::{KINGSIDE_KING_COL, KING_HOME_COL, QUEENSIDE_KING_COL};
use crate::executor::MoveExecutor;
use crate::piece::{Color, Piece, PieceType, Position};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始位置
    pub from: Position,
    /// 目标位置
    pub to: Position,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成指定格子上棋子的伪合法目标格（不考虑己方王是否被将）
    ///
    /// `attack_mode` 为真时回答“下一步能否攻击到该格”：兵只报告两个斜前方，
    /// 不报告直进；王不报告王车易位。
    pub fn raw_moves(
        board: &Board,
        pos: Position,
        en_passant_target: Option<Position>,
        attack_mode: bool,
    ) -> Vec<Position> {
        let mut moves = Vec::with_capacity(28);
        let piece = match board.get(pos) {
            Some(piece) => piece,
            None => return moves,
        };

        match piece.piece_type {
            PieceType::Pawn => {
                Self::generate_pawn_moves(board, pos, piece, en_passant_target, attack_mode, &mut moves)
            }
            PieceType::Knight => Self::generate_step_moves(board, pos, piece.color, &KNIGHT_OFFSETS, &mut moves),
            PieceType::Bishop => Self::generate_ray_moves(board, pos, piece.color, &BISHOP_DIRECTIONS, &mut moves),
            PieceType::Rook => Self::generate_ray_moves(board, pos, piece.color, &ROOK_DIRECTIONS, &mut moves),
            PieceType::Queen => {
                Self::generate_ray_moves(board, pos, piece.color, &ROOK_DIRECTIONS, &mut moves);
                Self::generate_ray_moves(board, pos, piece.color, &BISHOP_DIRECTIONS, &mut moves);
            }
            PieceType::King => {
                Self::generate_step_moves(board, pos, piece.color, &KING_OFFSETS, &mut moves);
                if !attack_mode {
                    Self::generate_castling_moves(board, pos, piece, &mut moves);
                }
            }
        }

        moves
    }

    /// 生成兵的走法
    fn generate_pawn_moves(
        board: &Board,
        pos: Position,
        piece: Piece,
        en_passant_target: Option<Position>,
        attack_mode: bool,
        moves: &mut Vec<Position>,
    ) {
        let forward = piece.color.forward();

        if !attack_mode {
            if let Some(one) = pos.offset(forward, 0) {
                if board.get(one).is_none() {
                    moves.push(one);

                    // 初始行可以走两格，中间格必须为空
                    if pos.row == piece.color.pawn_start_row() {
                        if let Some(two) = pos.offset(forward * 2, 0) {
                            if board.get(two).is_none() {
                                moves.push(two);
                            }
                        }
                    }
                }
            }
        }

        for dc in [-1i8, 1i8] {
            let to = match pos.offset(forward, dc) {
                Some(to) => to,
                None => continue,
            };
            match board.get(to) {
                Some(target) => {
                    if target.color != piece.color {
                        moves.push(to);
                    }
                }
                None => {
                    if attack_mode || Self::is_en_passant_capture(board, pos, piece, to, en_passant_target) {
                        moves.push(to);
                    }
                }
            }
        }
    }

    /// 斜进到过路兵目标格，且旁边确有对方的兵
    fn is_en_passant_capture(
        board: &Board,
        from: Position,
        piece: Piece,
        to: Position,
        en_passant_target: Option<Position>,
    ) -> bool {
        if en_passant_target != Some(to) {
            return false;
        }
        let passed = Position::new_unchecked(from.row, to.col);
        matches!(
            board.get(passed),
            Some(p) if p.piece_type == PieceType::Pawn && p.color != piece.color
        )
    }

    /// 生成固定偏移的走法（马、王）
    fn generate_step_moves(
        board: &Board,
        pos: Position,
        color: Color,
        offsets: &[(i8, i8)],
        moves: &mut Vec<Position>,
    ) {
        for &(dr, dc) in offsets {
            if let Some(to) = pos.offset(dr, dc) {
                match board.get(to) {
                    Some(target) if target.color == color => {}
                    _ => moves.push(to),
                }
            }
        }
    }

    /// 生成射线走法（象、车、后）
    fn generate_ray_moves(
        board: &Board,
        pos: Position,
        color: Color,
        directions: &[(i8, i8)],
        moves: &mut Vec<Position>,
    ) {
        for &(dr, dc) in directions {
            let mut current = pos;
            while let Some(to) = current.offset(dr, dc) {
                if let Some(target) = board.get(to) {
                    // 遇到对方棋子可以吃，遇到己方棋子停在前面
                    if target.color != color {
                        moves.push(to);
                    }
                    break;
                }
                moves.push(to);
                current = to;
            }
        }
    }

    /// 生成王车易位走法
    fn generate_castling_moves(board: &Board, pos: Position, king: Piece, moves: &mut Vec<Position>) {
        let home = Position::new_unchecked(king.color.back_rank(), KING_HOME_COL);
        if king.has_moved || pos != home {
            return;
        }

        let opponent = king.color.opponent();
        if Self::is_square_attacked(board, pos, opponent) {
            return;
        }

        // (车所在列, 王的目标列, 王经过的列, 需要为空的列)
        let sides: [(u8, u8, u8, &[u8]); 2] = [
            (7, KINGSIDE_KING_COL, 5, &[5, 6]),
            (0, QUEENSIDE_KING_COL, 3, &[1, 2, 3]),
        ];

        for (rook_col, king_col, pass_col, between) in sides {
            let rook_pos = Position::new_unchecked(pos.row, rook_col);
            let rook_ready = matches!(
                board.get(rook_pos),
                Some(rook) if rook.piece_type == PieceType::Rook
                    && rook.color == king.color
                    && !rook.has_moved
            );
            if !rook_ready {
                continue;
            }

            let path_clear = between
                .iter()
                .all(|&col| board.get(Position::new_unchecked(pos.row, col)).is_none());
            if !path_clear {
                continue;
            }

            let pass = Position::new_unchecked(pos.row, pass_col);
            let target = Position::new_unchecked(pos.row, king_col);
            if Self::is_square_attacked(board, pass, opponent)
                || Self::is_square_attacked(board, target, opponent)
            {
                continue;
            }

            moves.push(target);
        }
    }

    /// 生成合法目标格（过滤掉会使己方王被将的走法）
    pub fn legal_moves(
        board: &Board,
        pos: Position,
        en_passant_target: Option<Position>,
    ) -> Vec<Position> {
        let color = match board.get(pos) {
            Some(piece) => piece.color,
            None => return Vec::new(),
        };

        Self::raw_moves(board, pos, en_passant_target, false)
            .into_iter()
            .filter(|&to| {
                // 模拟走法（包括吃过路兵与易位的车）
                let outcome = MoveExecutor::apply(board, pos, to, en_passant_target);
                !Self::is_in_check(&outcome.board, color)
            })
            .collect()
    }

    /// 生成指定阵营的所有合法走法（按棋盘行优先顺序）
    pub fn all_legal_moves(
        board: &Board,
        color: Color,
        en_passant_target: Option<Position>,
    ) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        for (from, _) in board.pieces(color) {
            for to in Self::legal_moves(board, from, en_passant_target) {
                moves.push(Move::new(from, to));
            }
        }
        moves
    }

    /// 是否有任意合法走法（找到第一个即返回）
    pub fn has_any_legal_moves(
        board: &Board,
        color: Color,
        en_passant_target: Option<Position>,
    ) -> bool {
        board
            .pieces(color)
            .into_iter()
            .any(|(from, _)| !Self::legal_moves(board, from, en_passant_target).is_empty())
    }

    /// 指定阵营在攻击模式下能攻击到的所有格子（去重）
    pub fn attacked_squares(board: &Board, by: Color) -> Vec<Position> {
        let mut squares: Vec<Position> = board
            .pieces(by)
            .into_iter()
            .flat_map(|(pos, _)| Self::raw_moves(board, pos, None, true))
            .collect();
        squares.sort();
        squares.dedup();
        squares
    }

    /// 检查格子是否被指定阵营攻击
    pub fn is_square_attacked(board: &Board, target: Position, by: Color) -> bool {
        board
            .pieces(by)
            .into_iter()
            .any(|(pos, _)| Self::raw_moves(board, pos, None, true).contains(&target))
    }

    /// 检查指定阵营是否被将军
    pub fn is_in_check(board: &Board, color: Color) -> bool {
        match board.find_king(color) {
            Some(king_pos) => Self::is_square_attacked(board, king_pos, color.opponent()),
            // 没有王，视为不被将军
            None => false,
        }
    }

    /// 检查是否被将死
    pub fn is_checkmate(board: &Board, color: Color, en_passant_target: Option<Position>) -> bool {
        Self::is_in_check(board, color) && !Self::has_any_legal_moves(board, color, en_passant_target)
    }

    /// 检查是否逼和（无子可动但未被将军）
    pub fn is_stalemate(board: &Board, color: Color, en_passant_target: Option<Position>) -> bool {
        !Self::is_in_check(board, color) && !Self::has_any_legal_moves(board, color, en_passant_target)
    }
}
