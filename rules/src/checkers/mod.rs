//! 跳棋规则
//!
//! 8x8 棋盘深色格，每方 12 子；吃子非强制，一步只跳一次。

mod board;
mod game;
mod moves;

pub use board::{Cell, CheckersBoard};
pub use game::CheckersGame;
pub use moves::{all_moves, apply, notation, valid_moves, winner, CheckersMove, CheckersOutcome};
