//! 棋类规则库
//!
//! 包含:
//! - 棋子、棋盘、位置等核心数据结构
//! - 国际象棋走法生成、合法性过滤与将死/逼和判定
//! - 走法执行器（吃过路兵、王车易位、升变）
//! - 走法记号与 FEN
//! - 跳棋规则
//! - 棋谱格式 (JSON)

mod board;
pub mod checkers;
mod constants;
mod error;
mod executor;
mod fen;
mod game;
mod moves;
mod notation;
mod piece;
mod record;

pub use board::Board;
pub use checkers::{CheckersBoard, CheckersGame, CheckersMove};
pub use constants::*;
pub use error::{Result, RuleError};
pub use executor::{CastleSide, MoveExecutor, MoveOutcome};
pub use fen::{Fen, INITIAL_FEN};
pub use game::{GameState, GameStatus};
pub use moves::{Move, MoveGenerator};
pub use notation::Notation;
pub use piece::{Color, Piece, PieceType, Position};
pub use record::{DrawReason, GameKind, GameMetadata, GameRecord, GameResult, MoveRecord, WinReason};
