//! 棋局评估函数

use rules::{Board, Color, Piece, PieceType, Position};

/// 评估器
pub struct Evaluator;

/// 棋子位置分值表（白方视角，黑方需要上下镜像）
/// 索引为 row * 8 + col，第 0 行是第 8 横线
mod position_tables {
    /// 兵的位置分值
    pub const PAWN: [i32; 64] = [
         0,  0,  0,  0,  0,  0,  0,  0,
        50, 50, 50, 50, 50, 50, 50, 50,  // 临近升变
        10, 10, 20, 30, 30, 20, 10, 10,
         5,  5, 10, 25, 25, 10,  5,  5,
         0,  0,  0, 20, 20,  0,  0,  0,
         5, -5,-10,  0,  0,-10, -5,  5,
         5, 10, 10,-20,-20, 10, 10,  5,
         0,  0,  0,  0,  0,  0,  0,  0,
    ];

    /// 马的位置分值
    pub const KNIGHT: [i32; 64] = [
       -50,-40,-30,-30,-30,-30,-40,-50,
       -40,-20,  0,  0,  0,  0,-20,-40,
       -30,  0, 10, 15, 15, 10,  0,-30,
       -30,  5, 15, 20, 20, 15,  5,-30,
       -30,  0, 15, 20, 20, 15,  0,-30,
       -30,  5, 10, 15, 15, 10,  5,-30,
       -40,-20,  0,  5,  5,  0,-20,-40,
       -50,-40,-30,-30,-30,-30,-40,-50,
    ];

    /// 象的位置分值
    pub const BISHOP: [i32; 64] = [
       -20,-10,-10,-10,-10,-10,-10,-20,
       -10,  0,  0,  0,  0,  0,  0,-10,
       -10,  0,  5, 10, 10,  5,  0,-10,
       -10,  5,  5, 10, 10,  5,  5,-10,
       -10,  0, 10, 10, 10, 10,  0,-10,
       -10, 10, 10, 10, 10, 10, 10,-10,
       -10,  5,  0,  0,  0,  0,  5,-10,
       -20,-10,-10,-10,-10,-10,-10,-20,
    ];

    /// 车的位置分值
    pub const ROOK: [i32; 64] = [
         0,  0,  0,  0,  0,  0,  0,  0,
         5, 10, 10, 10, 10, 10, 10,  5,  // 第七横线
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
         0,  0,  0,  5,  5,  0,  0,  0,
    ];

    /// 后的位置分值
    pub const QUEEN: [i32; 64] = [
       -20,-10,-10, -5, -5,-10,-10,-20,
       -10,  0,  0,  0,  0,  0,  0,-10,
       -10,  0,  5,  5,  5,  5,  0,-10,
        -5,  0,  5,  5,  5,  5,  0, -5,
         0,  0,  5,  5,  5,  5,  0, -5,
       -10,  5,  5,  5,  5,  5,  0,-10,
       -10,  0,  5,  0,  0,  0,  0,-10,
       -20,-10,-10, -5, -5,-10,-10,-20,
    ];

    /// 王的位置分值（中局，鼓励易位）
    pub const KING: [i32; 64] = [
       -30,-40,-40,-50,-50,-40,-40,-30,
       -30,-40,-40,-50,-50,-40,-40,-30,
       -30,-40,-40,-50,-50,-40,-40,-30,
       -30,-40,-40,-50,-50,-40,-40,-30,
       -20,-30,-30,-40,-40,-30,-30,-20,
       -10,-20,-20,-20,-20,-20,-20,-10,
        20, 20,  0,  0,  0,  0, 20, 20,
        20, 30, 10,  0,  0, 10, 30, 20,
    ];
}

impl Evaluator {
    /// 评估棋局（指定阵营视角，正值对该方有利）
    pub fn evaluate(board: &Board, perspective: Color) -> i32 {
        let mut score = 0;

        for (pos, piece) in board.all_pieces() {
            let piece_score = Self::evaluate_piece(pos, piece);
            if piece.color == perspective {
                score += piece_score;
            } else {
                score -= piece_score;
            }
        }

        score
    }

    /// 评估单个棋子的价值（包括位置分）
    fn evaluate_piece(pos: Position, piece: Piece) -> i32 {
        piece.value() + Self::position_bonus(pos, piece)
    }

    /// 获取位置加成分
    fn position_bonus(pos: Position, piece: Piece) -> i32 {
        let index = match piece.color {
            Color::White => pos.row as usize * 8 + pos.col as usize,
            // 黑方需要镜像（行号翻转）
            Color::Black => (7 - pos.row as usize) * 8 + pos.col as usize,
        };

        match piece.piece_type {
            PieceType::Pawn => position_tables::PAWN[index],
            PieceType::Knight => position_tables::KNIGHT[index],
            PieceType::Bishop => position_tables::BISHOP[index],
            PieceType::Rook => position_tables::ROOK[index],
            PieceType::Queen => position_tables::QUEEN[index],
            PieceType::King => position_tables::KING[index],
        }
    }
}
