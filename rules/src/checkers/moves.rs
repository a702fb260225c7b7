//! 跳棋走法生成与执行
//!
//! 普通棋子沿斜线向前走一格，王棋四个斜向均可。跳过相邻的对方棋子落到
//! 其后的空格即为吃子；吃子不是强制的，一步只跳一次。

use serde::{Deserialize, Serialize};

use super::board::{Cell, CheckersBoard};
use crate::piece::{Color, Position};

/// 跳棋走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckersMove {
    pub from: Position,
    pub to: Position,
    /// 被跳过的棋子位置
    pub captured: Option<Position>,
}

impl CheckersMove {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl std::fmt::Display for CheckersMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from, sep, self.to)
    }
}

/// 执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckersOutcome {
    /// 新棋盘
    pub board: CheckersBoard,
    /// 被吃的棋子
    pub captured: Option<Cell>,
    /// 是否升为王棋
    pub promoted: bool,
}

/// 棋子可走的斜向
fn directions(cell: Cell, color: Color) -> Vec<(i8, i8)> {
    let forward = color.forward();
    if cell.is_king() {
        vec![(forward, -1), (forward, 1), (-forward, -1), (-forward, 1)]
    } else {
        vec![(forward, -1), (forward, 1)]
    }
}

/// 指定格子上棋子的所有走法；空格返回空列表
pub fn valid_moves(board: &CheckersBoard, pos: Position) -> Vec<CheckersMove> {
    let cell = board.get(pos);
    let color = match cell.color() {
        Some(color) => color,
        None => return Vec::new(),
    };

    let mut moves = Vec::with_capacity(4);
    for (dr, dc) in directions(cell, color) {
        let step = match pos.offset(dr, dc) {
            Some(step) => step,
            None => continue,
        };
        let target = board.get(step);

        if target.is_empty() {
            moves.push(CheckersMove {
                from: pos,
                to: step,
                captured: None,
            });
        } else if target.color() == Some(color.opponent()) {
            if let Some(landing) = pos.offset(dr * 2, dc * 2) {
                if board.get(landing).is_empty() {
                    moves.push(CheckersMove {
                        from: pos,
                        to: landing,
                        captured: Some(step),
                    });
                }
            }
        }
    }
    moves
}

/// 指定阵营的所有走法（按行优先顺序）
pub fn all_moves(board: &CheckersBoard, color: Color) -> Vec<CheckersMove> {
    board
        .pieces(color)
        .into_iter()
        .flat_map(|(pos, _)| valid_moves(board, pos))
        .collect()
}

/// 执行走法，返回新棋盘
///
/// 斜走两格时移除中间被跳过的棋子；到达对方底线的普通棋子立即升为王棋。
pub fn apply(board: &CheckersBoard, from: Position, to: Position) -> CheckersOutcome {
    let cell = board.get(from);
    let color = match cell.color() {
        Some(color) => color,
        None => {
            return CheckersOutcome {
                board: board.clone(),
                captured: None,
                promoted: false,
            }
        }
    };

    let mut next = board.clone();
    let mut captured = None;

    let dr = to.row as i8 - from.row as i8;
    let dc = to.col as i8 - from.col as i8;
    if dr.abs() == 2 && dc.abs() == 2 {
        let jumped = Position::new_unchecked(
            (from.row as i8 + dr / 2) as u8,
            (from.col as i8 + dc / 2) as u8,
        );
        let jumped_cell = next.get(jumped);
        if !jumped_cell.is_empty() {
            captured = Some(jumped_cell);
        }
        next.set(jumped, Cell::Empty);
    }

    let promoted = !cell.is_king() && to.row == color.promotion_row();
    next.set(from, Cell::Empty);
    next.set(to, if promoted { cell.crowned() } else { cell });

    CheckersOutcome {
        board: next,
        captured,
        promoted,
    }
}

/// 胜负判定：棋子被吃光或走子方无子可动的一方输
pub fn winner(board: &CheckersBoard, side_to_move: Color) -> Option<Color> {
    if board.count(Color::White) == 0 {
        return Some(Color::Black);
    }
    if board.count(Color::Black) == 0 {
        return Some(Color::White);
    }
    if all_moves(board, side_to_move).is_empty() {
        return Some(side_to_move.opponent());
    }
    None
}

/// 走法记号：`c3-d4`、`c3xe5`，升变加 `=K`
pub fn notation(mv: &CheckersMove, outcome: &CheckersOutcome) -> String {
    let mut text = mv.to_string();
    if outcome.promoted {
        text.push_str("=K");
    }
    text
}
