//! 棋类 AI 引擎
//!
//! 包含:
//! - 国际象棋棋局评估函数（子力 + 位置分）
//! - Minimax + Alpha-Beta 搜索，根节点随机扰动
//! - 跳棋启发式 AI
//! - 难度与配置

mod checkers;
mod config;
mod evaluate;
mod search;

pub use checkers::{CheckersAi, CAPTURE_WEIGHT, QUIET_WEIGHT};
pub use config::{
    AiConfig, AiError, Difficulty, DEFAULT_THINK_DELAY_MS, HARD_DEPTH, HARD_JITTER,
    MAX_SEARCH_DEPTH, MEDIUM_DEPTH, MEDIUM_JITTER,
};
pub use evaluate::Evaluator;
pub use search::{AiEngine, MATE_SCORE};
