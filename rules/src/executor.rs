//! 走法执行
//!
//! 在棋盘副本上落子，处理吃过路兵、王车易位、过路兵目标格与自动升变。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::piece::{Piece, PieceType, Position};

/// 王车易位方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    /// 王翼（短易位）
    Kingside,
    /// 后翼（长易位）
    Queenside,
}

/// 执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// 落子后的新棋盘
    pub board: Board,
    /// 新的过路兵目标格（仅在兵走两格后存在）
    pub en_passant_target: Option<Position>,
    /// 是否发生升变
    pub promotion_occurred: bool,
    /// 被吃的棋子
    pub captured: Option<Piece>,
    /// 王车易位方向
    pub castle: Option<CastleSide>,
    /// 是否为吃过路兵
    pub en_passant: bool,
}

impl MoveOutcome {
    fn unchanged(board: &Board) -> Self {
        Self {
            board: board.clone(),
            en_passant_target: None,
            promotion_occurred: false,
            captured: None,
            castle: None,
            en_passant: false,
        }
    }

    /// 是否吃子
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// 走法执行器
pub struct MoveExecutor;

impl MoveExecutor {
    /// 执行走法，返回新棋盘及附带状态
    ///
    /// 不检查合法性；起点为空时返回原棋盘的副本。
    pub fn apply(
        board: &Board,
        from: Position,
        to: Position,
        en_passant_target: Option<Position>,
    ) -> MoveOutcome {
        let piece = match board.get(from) {
            Some(piece) => piece,
            None => return MoveOutcome::unchanged(board),
        };

        let mut next = board.clone();
        let mut captured = board.get(to);
        let is_pawn = piece.piece_type == PieceType::Pawn;

        // 吃过路兵：被吃的兵不在目标格上
        let en_passant = is_pawn
            && captured.is_none()
            && from.col != to.col
            && en_passant_target == Some(to);
        if en_passant {
            let passed = Position::new_unchecked(from.row, to.col);
            captured = next.get(passed);
            next.set(passed, None);
        }

        // 王车易位：车移到王旁边
        let mut castle = None;
        let col_delta = to.col as i8 - from.col as i8;
        if piece.piece_type == PieceType::King && from.row == to.row && col_delta.abs() == 2 {
            let (side, rook_from_col, rook_to_col) = if col_delta > 0 {
                (CastleSide::Kingside, 7, to.col - 1)
            } else {
                (CastleSide::Queenside, 0, to.col + 1)
            };
            let rook_from = Position::new_unchecked(from.row, rook_from_col);
            if let Some(rook) = next.get(rook_from) {
                next.set(rook_from, None);
                next.set(
                    Position::new_unchecked(from.row, rook_to_col),
                    Some(rook.moved()),
                );
            }
            castle = Some(side);
        }

        let row_delta = to.row as i8 - from.row as i8;
        let new_target = if is_pawn && row_delta.abs() == 2 {
            Some(Position::new_unchecked((from.row + to.row) / 2, from.col))
        } else {
            None
        };

        // 到达底线自动升变为后
        let promotion_occurred = is_pawn && to.row == piece.color.promotion_row();
        let placed = if promotion_occurred {
            Piece::new(PieceType::Queen, piece.color).moved()
        } else {
            piece.moved()
        };

        next.set(from, None);
        next.set(to, Some(placed));

        MoveOutcome {
            board: next,
            en_passant_target: new_target,
            promotion_occurred,
            captured,
            castle,
            en_passant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;
    use crate::piece::Color;

    fn sq(text: &str) -> Position {
        Position::from_algebraic(text).unwrap()
    }

    #[test]
    fn test_simple_move_marks_moved() {
        let board = Board::initial();
        let outcome = MoveExecutor::apply(&board, sq("g1"), sq("f3"), None);

        let knight = outcome.board.get(sq("f3")).unwrap();
        assert_eq!(knight.piece_type, PieceType::Knight);
        assert!(knight.has_moved);
        assert!(outcome.board.get(sq("g1")).is_none());
        assert!(!outcome.is_capture());
        // 输入棋盘不变
        assert!(board.get(sq("g1")).is_some());
    }

    #[test]
    fn test_double_push_sets_target() {
        let board = Board::initial();
        let outcome = MoveExecutor::apply(&board, sq("e2"), sq("e4"), None);
        assert_eq!(outcome.en_passant_target, Some(sq("e3")));

        let outcome = MoveExecutor::apply(&outcome.board, sq("g8"), sq("f6"), Some(sq("e3")));
        assert_eq!(outcome.en_passant_target, None);
    }

    #[test]
    fn test_en_passant_removes_passed_pawn() {
        let state = Fen::parse("4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 1").unwrap();
        let outcome = MoveExecutor::apply(&state.board, sq("d5"), sq("e6"), state.en_passant_target);

        assert!(outcome.en_passant);
        assert_eq!(
            outcome.captured.map(|p| p.piece_type),
            Some(PieceType::Pawn)
        );
        assert!(outcome.board.get(sq("e5")).is_none());
        assert_eq!(
            outcome.board.get(sq("e6")).map(|p| p.color),
            Some(Color::White)
        );
    }

    #[test]
    fn test_castling_moves_rook() {
        let state = Fen::parse("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();

        let short = MoveExecutor::apply(&state.board, sq("e1"), sq("g1"), None);
        assert_eq!(short.castle, Some(CastleSide::Kingside));
        assert_eq!(short.board.get(sq("f1")).map(|p| p.piece_type), Some(PieceType::Rook));
        assert!(short.board.get(sq("h1")).is_none());

        let long = MoveExecutor::apply(&state.board, sq("e8"), sq("c8"), None);
        assert_eq!(long.castle, Some(CastleSide::Queenside));
        assert_eq!(long.board.get(sq("d8")).map(|p| p.piece_type), Some(PieceType::Rook));
        assert!(long.board.get(sq("a8")).is_none());
    }

    #[test]
    fn test_promotion_to_queen() {
        let state = Fen::parse("4k3/P7/8/8/8/8/7p/4K3 w - - 0 1").unwrap();

        let white = MoveExecutor::apply(&state.board, sq("a7"), sq("a8"), None);
        assert!(white.promotion_occurred);
        assert_eq!(
            white.board.get(sq("a8")).map(|p| (p.piece_type, p.color)),
            Some((PieceType::Queen, Color::White))
        );

        let black = MoveExecutor::apply(&state.board, sq("h2"), sq("h1"), None);
        assert!(black.promotion_occurred);
        assert_eq!(
            black.board.get(sq("h1")).map(|p| (p.piece_type, p.color)),
            Some((PieceType::Queen, Color::Black))
        );
    }

    #[test]
    fn test_empty_origin_is_noop() {
        let board = Board::initial();
        let outcome = MoveExecutor::apply(&board, sq("e4"), sq("e5"), None);
        assert_eq!(outcome.board, board);
        assert!(!outcome.promotion_occurred);
    }
}
