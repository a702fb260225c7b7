//! 棋谱存储
//!
//! 目标路径是目录时自动生成文件名，否则直接写入该文件。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rules::{GameKind, GameRecord};
use tracing::info;

/// 保存棋谱，返回实际写入的文件路径
pub fn save_record(target: &Path, record: &GameRecord) -> Result<PathBuf> {
    let filepath = if target.is_dir() {
        target.join(generate_filename(&Utc::now(), record))
    } else {
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {:?}", parent))?;
            }
        }
        target.to_path_buf()
    };

    let json_content = record.to_json().context("Failed to serialize game record")?;
    fs::write(&filepath, json_content)
        .with_context(|| format!("Failed to write {:?}", filepath))?;

    info!("Saved game record to {:?}", filepath);
    Ok(filepath)
}

/// 加载棋谱
pub fn load_record(path: &Path) -> Result<GameRecord> {
    if !path.exists() {
        anyhow::bail!("Record file does not exist: {:?}", path);
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

    GameRecord::from_json(&content).context("Failed to parse game record")
}

/// 生成文件名
fn generate_filename(timestamp: &DateTime<Utc>, record: &GameRecord) -> String {
    let game = match record.metadata.game {
        GameKind::Chess => "chess",
        GameKind::Checkers => "checkers",
    };
    format!(
        "{}_{}_{}vs{}.json",
        timestamp.format("%Y%m%d_%H%M%S"),
        game,
        sanitize_filename(&record.metadata.white_player),
        sanitize_filename(&record.metadata.black_player)
    )
}

/// 清理文件名中的特殊字符
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}
