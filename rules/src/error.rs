//! 错误类型定义

use thiserror::Error;

/// 规则层错误
///
/// 纯函数引擎（走法生成、合法性过滤、执行器）从不返回错误；
/// 只有带状态的对局封装与文本解析会用到。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    /// 无效的坐标文本
    #[error("Invalid square: {text}")]
    InvalidSquare { text: String },

    /// 非法走法
    #[error("Illegal move: {from} -> {to}")]
    IllegalMove { from: String, to: String },

    /// 没有棋子
    #[error("No piece at {square}")]
    NoPiece { square: String },

    /// 不是你的回合
    #[error("Not your turn")]
    NotYourTurn,

    /// 无效的 FEN 字符串
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, RuleError>;
