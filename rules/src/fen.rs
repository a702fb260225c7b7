//! FEN 格式解析和生成
//!
//! 标准国际象棋 FEN：
//! `<棋盘> <走子方> <易位权> <过路兵格> <半回合数> <回合数>`
//!
//! 易位权映射到王与车的 `has_moved` 标记；半回合数与回合数解析时忽略。

use crate::board::Board;
use crate::constants::{BOARD_SIZE, KING_HOME_COL};
use crate::error::RuleError;
use crate::game::GameState;
use crate::moves::MoveGenerator;
use crate::piece::{Color, Piece, PieceType, Position};

/// 初始局面 FEN
pub const INITIAL_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串为对局状态
    pub fn parse(fen: &str) -> Result<GameState, RuleError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.is_empty() {
            return Err(RuleError::InvalidFen {
                reason: "Empty FEN string".to_string(),
            });
        }

        let mut board = Self::parse_board(parts[0])?;

        // 走子方（默认白方）
        let side_to_move = match parts.get(1) {
            Some(text) => text
                .chars()
                .next()
                .and_then(Color::from_fen_char)
                .ok_or_else(|| RuleError::InvalidFen {
                    reason: format!("Invalid side to move: {}", text),
                })?,
            None => Color::White,
        };

        // 易位权（缺省视为 "-"）
        let castling = parts.get(2).copied().unwrap_or("-");
        Self::apply_castling_rights(&mut board, castling)?;

        // 过路兵目标格
        let en_passant_target = match parts.get(3) {
            Some(&"-") | None => None,
            Some(text) => Some(Position::from_algebraic(text).map_err(|_| RuleError::InvalidFen {
                reason: format!("Invalid en passant square: {}", text),
            })?),
        };

        Self::validate_position(&board, side_to_move)?;

        Ok(GameState::from_position(board, side_to_move, en_passant_target))
    }

    /// 校验局面：双方各有且仅有一个王，兵不在底线，非走子方不能正被将军
    fn validate_position(board: &Board, side_to_move: Color) -> Result<(), RuleError> {
        for color in [Color::White, Color::Black] {
            let kings = board
                .pieces(color)
                .iter()
                .filter(|(_, piece)| piece.piece_type == PieceType::King)
                .count();
            if kings != 1 {
                return Err(RuleError::InvalidFen {
                    reason: format!("{} must have exactly one king, found {}", color, kings),
                });
            }
        }

        let last_row = BOARD_SIZE as u8 - 1;
        let stray_pawn = board.all_pieces().into_iter().find(|(pos, piece)| {
            piece.piece_type == PieceType::Pawn && (pos.row == 0 || pos.row == last_row)
        });
        if let Some((pos, _)) = stray_pawn {
            return Err(RuleError::InvalidFen {
                reason: format!("Pawn on back rank at {}", pos),
            });
        }

        let waiting = side_to_move.opponent();
        if MoveGenerator::is_in_check(board, waiting) {
            return Err(RuleError::InvalidFen {
                reason: format!("{} is in check but not to move", waiting),
            });
        }

        Ok(())
    }

    /// 解析棋盘部分
    fn parse_board(board_str: &str) -> Result<Board, RuleError> {
        let mut board = Board::empty();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != BOARD_SIZE {
            return Err(RuleError::InvalidFen {
                reason: format!("Expected 8 rows, got {}", rows.len()),
            });
        }

        // FEN 从第 8 横线开始，正好对应 row 0
        for (row, text) in rows.iter().enumerate() {
            let mut col = 0usize;

            for c in text.chars() {
                if col >= BOARD_SIZE {
                    return Err(RuleError::InvalidFen {
                        reason: format!("Row {} has too many columns", row),
                    });
                }

                if let Some(empty_count) = c.to_digit(10) {
                    col += empty_count as usize;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    board.set(Position::new_unchecked(row as u8, col as u8), Some(piece));
                    col += 1;
                } else {
                    return Err(RuleError::InvalidFen {
                        reason: format!("Invalid piece character: {}", c),
                    });
                }
            }

            if col != BOARD_SIZE {
                return Err(RuleError::InvalidFen {
                    reason: format!("Row {} has {} columns, expected 8", row, col),
                });
            }
        }

        Ok(board)
    }

    /// 根据易位权设置王与车的移动标记
    fn apply_castling_rights(board: &mut Board, castling: &str) -> Result<(), RuleError> {
        if castling != "-" && !castling.chars().all(|c| "KQkq".contains(c)) {
            return Err(RuleError::InvalidFen {
                reason: format!("Invalid castling rights: {}", castling),
            });
        }

        for color in [Color::White, Color::Black] {
            let (king_flag, queen_flag) = match color {
                Color::White => ('K', 'Q'),
                Color::Black => ('k', 'q'),
            };
            let kingside = castling.contains(king_flag);
            let queenside = castling.contains(queen_flag);
            let row = color.back_rank();

            Self::mark_moved_unless(board, Position::new_unchecked(row, 7), PieceType::Rook, color, kingside);
            Self::mark_moved_unless(board, Position::new_unchecked(row, 0), PieceType::Rook, color, queenside);
            Self::mark_moved_unless(
                board,
                Position::new_unchecked(row, KING_HOME_COL),
                PieceType::King,
                color,
                kingside || queenside,
            );
        }

        Ok(())
    }

    fn mark_moved_unless(
        board: &mut Board,
        pos: Position,
        piece_type: PieceType,
        color: Color,
        keep_unmoved: bool,
    ) {
        if keep_unmoved {
            return;
        }
        if let Some(piece) = board.get(pos) {
            if piece.piece_type == piece_type && piece.color == color {
                board.set(pos, Some(piece.moved()));
            }
        }
    }

    /// 将对局状态转换为 FEN 字符串
    pub fn to_string(state: &GameState) -> String {
        let en_passant = state
            .en_passant_target
            .map(|pos| pos.to_algebraic())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{} {} {} {} 0 1",
            Self::board_to_string(&state.board),
            state.side_to_move.to_fen_char(),
            Self::castling_rights(&state.board),
            en_passant
        )
    }

    /// 由王车的移动标记推出易位权
    fn castling_rights(board: &Board) -> String {
        let mut rights = String::new();
        for color in [Color::White, Color::Black] {
            let row = color.back_rank();
            let unmoved = |col: u8, piece_type: PieceType| {
                matches!(
                    board.get(Position::new_unchecked(row, col)),
                    Some(p) if p.piece_type == piece_type && p.color == color && !p.has_moved
                )
            };
            if !unmoved(KING_HOME_COL, PieceType::King) {
                continue;
            }
            if unmoved(7, PieceType::Rook) {
                rights.push(PieceType::King.to_fen_char(color));
            }
            if unmoved(0, PieceType::Rook) {
                rights.push(PieceType::Queen.to_fen_char(color));
            }
        }
        if rights.is_empty() {
            rights.push('-');
        }
        rights
    }

    /// 将棋盘转换为 FEN 棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_SIZE);

        for row in 0..BOARD_SIZE as u8 {
            let mut text = String::new();
            let mut empty_count = 0;

            for col in 0..BOARD_SIZE as u8 {
                if let Some(piece) = board.get(Position::new_unchecked(row, col)) {
                    if empty_count > 0 {
                        text.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    text.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                text.push_str(&empty_count.to_string());
            }

            rows.push(text);
        }

        rows.join("/")
    }

    /// 解析初始局面
    pub fn initial() -> GameState {
        Self::parse(INITIAL_FEN).expect("Initial FEN should be valid")
    }
}
