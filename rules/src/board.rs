//! 棋盘状态
//!
//! 棋盘是值类型：执行器、合法性过滤与搜索都只复制后写入，
//! 不在原棋盘上修改，因此搜索树展开无需撤销逻辑。写入接口只对本 crate 开放。

use serde::{Deserialize, Serialize};

use crate::constants::BOARD_SIZE;
use crate::piece::{Color, Piece, PieceType, Position};

/// 初始底线排列（a 线到 h 线）
const BACK_RANK: [PieceType; BOARD_SIZE] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// 国际象棋棋盘
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// 8x8 棋盘，`squares[row][col]`
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        let mut board = Self::empty();

        for (col, piece_type) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            board.set(
                Position::new_unchecked(Color::Black.back_rank(), col),
                Some(Piece::new(*piece_type, Color::Black)),
            );
            board.set(
                Position::new_unchecked(Color::Black.pawn_start_row(), col),
                Some(Piece::new(PieceType::Pawn, Color::Black)),
            );
            board.set(
                Position::new_unchecked(Color::White.pawn_start_row(), col),
                Some(Piece::new(PieceType::Pawn, Color::White)),
            );
            board.set(
                Position::new_unchecked(Color::White.back_rank(), col),
                Some(Piece::new(*piece_type, Color::White)),
            );
        }

        board
    }

    /// 获取指定位置的棋子
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if pos.is_valid() {
            self.squares[pos.row as usize][pos.col as usize]
        } else {
            None
        }
    }

    /// 设置指定位置的棋子（仅用于摆局面和执行器内部）
    pub(crate) fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_valid() {
            self.squares[pos.row as usize][pos.col as usize] = piece;
        }
    }

    /// 查找指定阵营的王
    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.all_pieces()
            .into_iter()
            .find(|(_, piece)| piece.piece_type == PieceType::King && piece.color == color)
            .map(|(pos, _)| pos)
    }

    /// 获取指定阵营的所有棋子（按行优先顺序）
    pub fn pieces(&self, color: Color) -> Vec<(Position, Piece)> {
        self.all_pieces()
            .into_iter()
            .filter(|(_, piece)| piece.color == color)
            .collect()
    }

    /// 获取所有棋子（按行优先顺序）
    pub fn all_pieces(&self) -> Vec<(Position, Piece)> {
        let mut result = Vec::with_capacity(32);
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if let Some(piece) = self.squares[row][col] {
                    result.push((Position::new_unchecked(row as u8, col as u8), piece));
                }
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}
