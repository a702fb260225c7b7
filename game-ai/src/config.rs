//! AI 配置
//!
//! 难度决定搜索深度与随机扰动幅度。所有调参常量都在这里导出，
//! 也可以从 JSON 文件整体覆盖。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 中等难度搜索深度
pub const MEDIUM_DEPTH: u8 = 2;
/// 困难难度搜索深度
pub const HARD_DEPTH: u8 = 4;
/// 搜索深度上限
pub const MAX_SEARCH_DEPTH: u8 = 4;
/// 中等难度根节点扰动幅度（±）
pub const MEDIUM_JITTER: i32 = 30;
/// 困难难度根节点扰动幅度（±）
pub const HARD_JITTER: i32 = 5;
/// 默认思考延迟（毫秒）
pub const DEFAULT_THINK_DELAY_MS: u64 = 500;

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 简单：随机走子
    Easy,
    /// 中等：2 层搜索，±30 扰动
    Medium,
    /// 困难：4 层搜索，±5 扰动
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(AiError::InvalidConfig(format!("unknown difficulty: {}", other))),
        }
    }
}

/// AI 错误
#[derive(Error, Debug)]
pub enum AiError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// AI 配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// 搜索深度（0 表示不搜索，随机走子）
    pub search_depth: u8,
    /// 根节点评分扰动幅度（±）
    pub jitter: i32,
    /// 调用方模拟思考的延迟
    #[serde(default = "default_think_delay")]
    pub think_delay_ms: u64,
}

fn default_think_delay() -> u64 {
    DEFAULT_THINK_DELAY_MS
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let (search_depth, jitter) = match difficulty {
            Difficulty::Easy => (0, 0),
            Difficulty::Medium => (MEDIUM_DEPTH, MEDIUM_JITTER),
            Difficulty::Hard => (HARD_DEPTH, HARD_JITTER),
        };
        Self {
            difficulty,
            search_depth,
            jitter,
            think_delay_ms: DEFAULT_THINK_DELAY_MS,
        }
    }

    /// 检查配置是否在允许范围内
    pub fn validate(&self) -> Result<(), AiError> {
        if self.search_depth > MAX_SEARCH_DEPTH {
            return Err(AiError::InvalidConfig(format!(
                "search_depth {} exceeds maximum {}",
                self.search_depth, MAX_SEARCH_DEPTH
            )));
        }
        if self.jitter < 0 {
            return Err(AiError::InvalidConfig(format!(
                "jitter must be non-negative, got {}",
                self.jitter
            )));
        }
        Ok(())
    }

    /// 从 JSON 字符串解析并校验
    pub fn from_json_str(json: &str) -> Result<Self, AiError> {
        let config: AiConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AiError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_config() {
        let easy = AiConfig::from_difficulty(Difficulty::Easy);
        assert_eq!(easy.search_depth, 0);
        assert_eq!(easy.jitter, 0);

        let medium = AiConfig::from_difficulty(Difficulty::Medium);
        assert_eq!(medium.search_depth, 2);
        assert_eq!(medium.jitter, 30);

        let hard = AiConfig::from_difficulty(Difficulty::Hard);
        assert_eq!(hard.search_depth, 4);
        assert_eq!(hard.jitter, 5);
        assert!(hard.search_depth <= MAX_SEARCH_DEPTH);
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!("expert".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Medium.to_string(), "medium");
    }

    #[test]
    fn test_config_from_json() {
        let config =
            AiConfig::from_json_str(r#"{"difficulty":"hard","search_depth":3,"jitter":10}"#).unwrap();
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.search_depth, 3);
        assert_eq!(config.think_delay_ms, DEFAULT_THINK_DELAY_MS);
    }

    #[test]
    fn test_config_validation() {
        let too_deep = r#"{"difficulty":"hard","search_depth":7,"jitter":5}"#;
        assert!(matches!(
            AiConfig::from_json_str(too_deep),
            Err(AiError::InvalidConfig(_))
        ));

        let negative = r#"{"difficulty":"medium","search_depth":2,"jitter":-1}"#;
        assert!(matches!(
            AiConfig::from_json_str(negative),
            Err(AiError::InvalidConfig(_))
        ));

        assert!(matches!(AiConfig::from_json_str("{"), Err(AiError::Json(_))));
        assert!(matches!(
            AiConfig::load("/nonexistent/ai.json"),
            Err(AiError::Io(_))
        ));
    }
}
