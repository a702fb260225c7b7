//! 规则常量定义

/// 棋盘边长（国际象棋与跳棋均为 8x8）
pub const BOARD_SIZE: usize = 8;

/// 王车易位后王所在的列（王翼）
pub const KINGSIDE_KING_COL: u8 = 6;

/// 王车易位后王所在的列（后翼）
pub const QUEENSIDE_KING_COL: u8 = 2;

/// 王的初始列
pub const KING_HOME_COL: u8 = 4;

/// 棋谱版本
pub const RECORD_VERSION: &str = "1.0";
