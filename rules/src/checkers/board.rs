//! 跳棋棋盘

use serde::{Deserialize, Serialize};

use crate::constants::BOARD_SIZE;
use crate::piece::{Color, Position};

/// 跳棋格子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    White,
    Black,
    WhiteKing,
    BlackKing,
}

impl Cell {
    /// 所属阵营
    pub fn color(&self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::White | Cell::WhiteKing => Some(Color::White),
            Cell::Black | Cell::BlackKing => Some(Color::Black),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Cell::Empty
    }

    pub fn is_king(&self) -> bool {
        matches!(self, Cell::WhiteKing | Cell::BlackKing)
    }

    /// 升变后的格子（空格与王棋不变）
    pub fn crowned(self) -> Cell {
        match self {
            Cell::White => Cell::WhiteKing,
            Cell::Black => Cell::BlackKing,
            other => other,
        }
    }

    /// 显示字符
    pub fn to_char(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::White => 'w',
            Cell::Black => 'b',
            Cell::WhiteKing => 'W',
            Cell::BlackKing => 'B',
        }
    }
}

/// 跳棋棋盘（只使用深色格）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckersBoard {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl CheckersBoard {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// 创建初始棋盘：黑方占第 0-2 行，白方占第 5-7 行
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for row in 0..BOARD_SIZE as u8 {
            let cell = match row {
                0..=2 => Cell::Black,
                5..=7 => Cell::White,
                _ => continue,
            };
            for col in 0..BOARD_SIZE as u8 {
                let pos = Position::new_unchecked(row, col);
                if pos.is_dark() {
                    board.set(pos, cell);
                }
            }
        }
        board
    }

    /// 获取格子
    pub fn get(&self, pos: Position) -> Cell {
        if pos.is_valid() {
            self.cells[pos.row as usize][pos.col as usize]
        } else {
            Cell::Empty
        }
    }

    /// 设置格子（仅用于摆局面）
    pub fn set(&mut self, pos: Position, cell: Cell) {
        if pos.is_valid() {
            self.cells[pos.row as usize][pos.col as usize] = cell;
        }
    }

    /// 指定阵营的所有棋子（按行优先顺序）
    pub fn pieces(&self, color: Color) -> Vec<(Position, Cell)> {
        let mut result = Vec::with_capacity(12);
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let cell = self.cells[row][col];
                if cell.color() == Some(color) {
                    result.push((Position::new_unchecked(row as u8, col as u8), cell));
                }
            }
        }
        result
    }

    /// 指定阵营的棋子数
    pub fn count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.color() == Some(color))
            .count()
    }
}

impl Default for CheckersBoard {
    fn default() -> Self {
        Self::initial()
    }
}

impl std::fmt::Display for CheckersBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(Cell::to_char).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = CheckersBoard::initial();
        assert_eq!(board.count(Color::White), 12);
        assert_eq!(board.count(Color::Black), 12);

        assert_eq!(board.get(Position::new_unchecked(0, 1)), Cell::Black);
        assert_eq!(board.get(Position::new_unchecked(0, 0)), Cell::Empty);
        assert_eq!(board.get(Position::new_unchecked(7, 0)), Cell::White);
        assert_eq!(board.get(Position::new_unchecked(3, 2)), Cell::Empty);

        // 所有棋子都在深色格
        for (pos, _) in board.pieces(Color::White).into_iter().chain(board.pieces(Color::Black)) {
            assert!(pos.is_dark());
        }
    }

    #[test]
    fn test_cell_crowning() {
        assert_eq!(Cell::White.crowned(), Cell::WhiteKing);
        assert_eq!(Cell::Black.crowned(), Cell::BlackKing);
        assert_eq!(Cell::WhiteKing.crowned(), Cell::WhiteKing);
        assert_eq!(Cell::Empty.crowned(), Cell::Empty);

        assert_eq!(Cell::BlackKing.color(), Some(Color::Black));
        assert!(Cell::BlackKing.is_king());
        assert!(!Cell::Black.is_king());
    }

    #[test]
    fn test_display() {
        let text = CheckersBoard::initial().to_string();
        assert_eq!(text.lines().next(), Some(".b.b.b.b"));
        assert_eq!(text.lines().last(), Some("w.w.w.w."));
    }
}
