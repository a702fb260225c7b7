//! 对弈场
//!
//! 包含:
//! - AI 对 AI 的对局驱动（国际象棋 / 跳棋）
//! - 棋谱存储与重放校验

pub mod replay;
pub mod runner;
pub mod storage;

pub use replay::replay;
pub use runner::{MatchRunner, MatchSettings};
pub use storage::{load_record, save_record};
