//! 棋谱重放
//!
//! 从起始局面按记录逐步走子，每一步都经过规则校验，
//! 并核对记号与结果是否和棋谱一致。

use anyhow::{bail, Context, Result};
use rules::{CheckersGame, Fen, GameKind, GameRecord, GameResult, GameState, MoveRecord, Position};
use tracing::info;

/// 重放棋谱，返回重放得到的对局结果（未分胜负时为 None）
pub fn replay(record: &GameRecord) -> Result<Option<GameResult>> {
    let result = match record.metadata.game {
        GameKind::Chess => replay_chess(record)?,
        GameKind::Checkers => replay_checkers(record)?,
    };

    if let (Some(replayed), Some(recorded)) = (&result, &record.metadata.result) {
        if replayed != recorded {
            bail!("Recorded result {:?} does not match replay {:?}", recorded, replayed);
        }
    }

    info!("Replayed {} plies: {:?}", record.moves.len(), result);
    Ok(result)
}

fn replay_chess(record: &GameRecord) -> Result<Option<GameResult>> {
    let mut state = match &record.initial_fen {
        Some(fen) => Fen::parse(fen).context("Invalid initial position in record")?,
        None => GameState::new(),
    };

    for (ply, mv) in record.moves.iter().enumerate() {
        let (from, to) = endpoints(ply, mv)?;
        state = state
            .play(from, to)
            .with_context(|| format!("Illegal move at ply {}: {}", ply + 1, mv.notation))?;
        check_notation(ply, mv, state.move_history.last())?;
    }

    Ok(state.result())
}

fn replay_checkers(record: &GameRecord) -> Result<Option<GameResult>> {
    let mut game = CheckersGame::new();

    for (ply, mv) in record.moves.iter().enumerate() {
        let (from, to) = endpoints(ply, mv)?;
        game = game
            .play(from, to)
            .with_context(|| format!("Illegal move at ply {}: {}", ply + 1, mv.notation))?;
        check_notation(ply, mv, game.move_history.last())?;
    }

    Ok(game.result())
}

fn endpoints(ply: usize, mv: &MoveRecord) -> Result<(Position, Position)> {
    match (mv.from_position(), mv.to_position()) {
        (Some(from), Some(to)) => Ok((from, to)),
        _ => bail!("Invalid squares at ply {}: {} -> {}", ply + 1, mv.from, mv.to),
    }
}

fn check_notation(ply: usize, mv: &MoveRecord, replayed: Option<&String>) -> Result<()> {
    match replayed {
        Some(notation) if *notation == mv.notation => Ok(()),
        other => bail!(
            "Notation mismatch at ply {}: recorded {}, replayed {:?}",
            ply + 1,
            mv.notation,
            other
        ),
    }
}
