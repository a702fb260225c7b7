//! 走法记录（长代数记号）
//!
//! 格式：`<棋子字母><起点><x 或 -><终点>[=Q][+|#]`，兵不写字母，
//! 王车易位写作 `O-O` / `O-O-O`。只用于显示。

use crate::board::Board;
use crate::executor::{CastleSide, MoveExecutor, MoveOutcome};
use crate::moves::MoveGenerator;
use crate::piece::Position;

/// 记号生成
pub struct Notation;

impl Notation {
    /// 根据走子前的棋盘与执行结果生成记号
    pub fn describe(before: &Board, from: Position, to: Position, outcome: &MoveOutcome) -> String {
        let piece = match before.get(from) {
            Some(piece) => piece,
            None => return String::new(),
        };

        let mut text = match outcome.castle {
            Some(CastleSide::Kingside) => "O-O".to_string(),
            Some(CastleSide::Queenside) => "O-O-O".to_string(),
            None => {
                let mut text = String::with_capacity(8);
                if let Some(letter) = piece.piece_type.notation_letter() {
                    text.push(letter);
                }
                text.push_str(&from.to_algebraic());
                text.push(if outcome.is_capture() { 'x' } else { '-' });
                text.push_str(&to.to_algebraic());
                if outcome.promotion_occurred {
                    text.push_str("=Q");
                }
                text
            }
        };

        let opponent = piece.color.opponent();
        if MoveGenerator::is_in_check(&outcome.board, opponent) {
            let mated = !MoveGenerator::has_any_legal_moves(
                &outcome.board,
                opponent,
                outcome.en_passant_target,
            );
            text.push(if mated { '#' } else { '+' });
        }

        text
    }

    /// 执行走法并生成记号
    pub fn describe_move(
        board: &Board,
        from: Position,
        to: Position,
        en_passant_target: Option<Position>,
    ) -> String {
        let outcome = MoveExecutor::apply(board, from, to, en_passant_target);
        Self::describe(board, from, to, &outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    fn sq(text: &str) -> Position {
        Position::from_algebraic(text).unwrap()
    }

    #[test]
    fn test_quiet_moves() {
        let board = Board::initial();
        assert_eq!(Notation::describe_move(&board, sq("e2"), sq("e4"), None), "e2-e4");
        assert_eq!(Notation::describe_move(&board, sq("g1"), sq("f3"), None), "Ng1-f3");
    }

    #[test]
    fn test_capture_and_check() {
        let state = Fen::parse("4k3/8/8/8/8/8/4r3/R3K3 w - - 0 1").unwrap();
        // 王吃车
        assert_eq!(
            Notation::describe_move(&state.board, sq("e1"), sq("e2"), None),
            "Ke1xe2"
        );
        // 车走到第 8 横线将军
        assert_eq!(
            Notation::describe_move(&state.board, sq("a1"), sq("a8"), None),
            "Ra1-a8+"
        );
    }

    #[test]
    fn test_mate_suffix() {
        let state = Fen::parse("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2").unwrap();
        assert_eq!(
            Notation::describe_move(&state.board, sq("d8"), sq("h4"), None),
            "Qd8-h4#"
        );
    }

    #[test]
    fn test_castling_and_promotion() {
        let state = Fen::parse("4k3/P7/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert_eq!(Notation::describe_move(&state.board, sq("e1"), sq("g1"), None), "O-O");
        assert_eq!(
            Notation::describe_move(&state.board, sq("a7"), sq("a8"), None),
            "a7-a8=Q+"
        );
    }

    #[test]
    fn test_empty_origin() {
        let board = Board::initial();
        assert_eq!(Notation::describe_move(&board, sq("e4"), sq("e5"), None), "");
    }
}
