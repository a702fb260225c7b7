//! 棋谱记录格式
//!
//! 以 JSON 保存一局的元数据与走法序列，国际象棋与跳棋共用。

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::RECORD_VERSION;
use crate::piece::Position;

/// 棋类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameKind {
    Chess,
    Checkers,
}

/// 胜利原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    /// 将死
    Checkmate,
    /// 对方棋子被吃光
    Elimination,
    /// 对方无子可动（跳棋）
    NoMoves,
}

/// 和棋原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawReason {
    /// 逼和
    Stalemate,
    /// 达到步数上限
    MoveLimit,
}

/// 游戏结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    WhiteWin(WinReason),
    BlackWin(WinReason),
    Draw(DrawReason),
}

/// 游戏元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    /// 白方玩家名
    pub white_player: String,
    /// 黑方玩家名
    pub black_player: String,
    /// 棋类
    pub game: GameKind,
    /// 游戏日期
    pub date: String,
    /// 游戏结果
    pub result: Option<GameResult>,
    /// AI 难度
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_difficulty: Option<String>,
}

/// 走法记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 起始格（代数记号）
    pub from: String,
    /// 目标格（代数记号）
    pub to: String,
    /// 显示用记号
    pub notation: String,
}

impl MoveRecord {
    /// 创建新的走法记录
    pub fn new(from: Position, to: Position, notation: String) -> Self {
        Self {
            from: from.to_algebraic(),
            to: to.to_algebraic(),
            notation,
        }
    }

    /// 获取起始位置
    pub fn from_position(&self) -> Option<Position> {
        Position::from_algebraic(&self.from).ok()
    }

    /// 获取目标位置
    pub fn to_position(&self) -> Option<Position> {
        Position::from_algebraic(&self.to).ok()
    }
}

/// 完整的棋谱记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// 版本号
    pub version: String,
    /// 元数据
    pub metadata: GameMetadata,
    /// 初始局面 FEN（仅国际象棋）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_fen: Option<String>,
    /// 走法列表
    pub moves: Vec<MoveRecord>,
}

impl GameRecord {
    /// 创建新的棋谱记录
    pub fn new(game: GameKind, white_player: String, black_player: String) -> Self {
        Self {
            version: RECORD_VERSION.to_string(),
            metadata: GameMetadata {
                white_player,
                black_player,
                game,
                date: Utc::now().format("%Y-%m-%d").to_string(),
                result: None,
                ai_difficulty: None,
            },
            initial_fen: match game {
                GameKind::Chess => Some(crate::fen::INITIAL_FEN.to_string()),
                GameKind::Checkers => None,
            },
            moves: Vec::new(),
        }
    }

    /// 设置 AI 难度
    pub fn set_ai_difficulty(&mut self, difficulty: &str) {
        self.metadata.ai_difficulty = Some(difficulty.to_string());
    }

    /// 添加走法
    pub fn add_move(&mut self, mv: MoveRecord) {
        self.moves.push(mv);
    }

    /// 设置游戏结果
    pub fn set_result(&mut self, result: GameResult) {
        self.metadata.result = Some(result);
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 生成带回合编号的文本
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("White: {}\n", self.metadata.white_player));
        output.push_str(&format!("Black: {}\n", self.metadata.black_player));
        if let Some(fen) = &self.initial_fen {
            output.push_str(&format!("FEN: {}\n", fen));
        }

        if !self.moves.is_empty() {
            output.push('\n');
            for (i, mv) in self.moves.iter().enumerate() {
                if i % 2 == 0 {
                    output.push_str(&format!("{}. {}", i / 2 + 1, mv.notation));
                } else {
                    output.push_str(&format!(" {}\n", mv.notation));
                }
            }
            if self.moves.len() % 2 == 1 {
                output.push('\n');
            }
        }

        if let Some(result) = &self.metadata.result {
            output.push_str(&format!("\nResult: {:?}\n", result));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Position {
        Position::from_algebraic(text).unwrap()
    }

    #[test]
    fn test_game_record_json() {
        let mut record = GameRecord::new(GameKind::Chess, "player".to_string(), "AI-medium".to_string());
        record.add_move(MoveRecord::new(sq("e2"), sq("e4"), "e2-e4".to_string()));
        record.add_move(MoveRecord::new(sq("e7"), sq("e5"), "e7-e5".to_string()));
        record.set_result(GameResult::WhiteWin(WinReason::Checkmate));

        let json = record.to_json().unwrap();
        let parsed = GameRecord::from_json(&json).unwrap();

        assert_eq!(parsed.metadata.white_player, "player");
        assert_eq!(parsed.moves.len(), 2);
        assert_eq!(parsed.metadata.result, Some(GameResult::WhiteWin(WinReason::Checkmate)));
        assert!(parsed.initial_fen.is_some());
    }

    #[test]
    fn test_checkers_record_has_no_fen() {
        let record = GameRecord::new(GameKind::Checkers, "a".to_string(), "b".to_string());
        let json = record.to_json().unwrap();
        assert!(!json.contains("initial_fen"));
    }

    #[test]
    fn test_text_format() {
        let mut record = GameRecord::new(GameKind::Chess, "a".to_string(), "b".to_string());
        record.add_move(MoveRecord::new(sq("f2"), sq("f3"), "f2-f3".to_string()));
        record.add_move(MoveRecord::new(sq("e7"), sq("e5"), "e7-e5".to_string()));
        record.add_move(MoveRecord::new(sq("g2"), sq("g4"), "g2-g4".to_string()));

        let text = record.to_text();
        assert!(text.contains("1. f2-f3 e7-e5"));
        assert!(text.contains("2. g2-g4"));
    }

    #[test]
    fn test_move_record_positions() {
        let mv = MoveRecord::new(sq("g1"), sq("f3"), "Ng1-f3".to_string());
        assert_eq!(mv.from_position(), Some(sq("g1")));
        assert_eq!(mv.to_position(), Some(sq("f3")));
    }
}
