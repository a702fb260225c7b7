//! 对局驱动
//!
//! 双方都由 AI 控制。每一步先等待配置的思考延迟，再在阻塞线程中完成搜索，
//! 搜索本身不可中断。达到步数上限仍未分胜负时记为和棋。

use std::time::Duration;

use anyhow::{Context, Result};
use game_ai::{AiConfig, AiEngine, CheckersAi};
use rules::{
    CheckersGame, Color, DrawReason, Fen, GameKind, GameRecord, GameResult, GameState, MoveRecord,
};
use tracing::{debug, info};

/// 对局设置
#[derive(Debug, Clone)]
pub struct MatchSettings {
    pub white: AiConfig,
    pub black: AiConfig,
    /// 随机种子（白方使用该值，黑方使用该值 + 1）
    pub seed: Option<u64>,
    /// 最大半回合数
    pub max_plies: usize,
    /// 国际象棋起始局面
    pub start_fen: Option<String>,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            white: AiConfig::default(),
            black: AiConfig::default(),
            seed: None,
            max_plies: 200,
            start_fen: None,
        }
    }
}

/// 对局驱动器
pub struct MatchRunner {
    settings: MatchSettings,
}

impl MatchRunner {
    pub fn new(settings: MatchSettings) -> Self {
        Self { settings }
    }

    pub async fn run(&self, game: GameKind) -> Result<GameRecord> {
        match game {
            GameKind::Chess => self.run_chess().await,
            GameKind::Checkers => self.run_checkers().await,
        }
    }

    /// 进行一局国际象棋
    pub async fn run_chess(&self) -> Result<GameRecord> {
        let mut state = match &self.settings.start_fen {
            Some(fen) => Fen::parse(fen).context("Invalid start position")?,
            None => GameState::new(),
        };

        let mut white = self.chess_engine(Color::White);
        let mut black = self.chess_engine(Color::Black);
        let mut record = self.new_record(GameKind::Chess);
        record.initial_fen = Some(Fen::to_string(&state));

        info!("Chess match started: {}", record.initial_fen.as_deref().unwrap_or_default());

        while !state.is_over() && record.moves.len() < self.settings.max_plies {
            let side = state.side_to_move;
            let engine = match side {
                Color::White => &mut white,
                Color::Black => &mut black,
            };
            think(engine.config().think_delay_ms).await;

            let mv = tokio::task::block_in_place(|| {
                engine.best_move(&state.board, side, state.en_passant_target)
            })
            .context("Engine found no move in a live position")?;

            state = state.play_move(mv)?;
            let notation = state.move_history.last().cloned().unwrap_or_default();
            debug!("ply {}: {} {}", record.moves.len() + 1, side, notation);
            record.add_move(MoveRecord::new(mv.from, mv.to, notation));
        }

        let result = state
            .result()
            .unwrap_or(GameResult::Draw(DrawReason::MoveLimit));
        info!("Chess match finished after {} plies: {:?}", record.moves.len(), result);
        record.set_result(result);
        Ok(record)
    }

    /// 进行一局跳棋（黑方先走）
    pub async fn run_checkers(&self) -> Result<GameRecord> {
        let mut game = CheckersGame::new();
        let mut white = self.checkers_ai(Color::White);
        let mut black = self.checkers_ai(Color::Black);
        let mut record = self.new_record(GameKind::Checkers);

        info!("Checkers match started");

        while !game.is_over() && record.moves.len() < self.settings.max_plies {
            let side = game.side_to_move;
            let ai = match side {
                Color::White => &mut white,
                Color::Black => &mut black,
            };
            think(self.config_for(side).think_delay_ms).await;

            let mv = tokio::task::block_in_place(|| ai.best_move(&game.board, side))
                .context("Checkers AI found no move in a live position")?;

            game = game.play_move(mv)?;
            let notation = game.move_history.last().cloned().unwrap_or_default();
            debug!("ply {}: {} {}", record.moves.len() + 1, side, notation);
            record.add_move(MoveRecord::new(mv.from, mv.to, notation));
        }

        let result = game
            .result()
            .unwrap_or(GameResult::Draw(DrawReason::MoveLimit));
        info!("Checkers match finished after {} plies: {:?}", record.moves.len(), result);
        record.set_result(result);
        Ok(record)
    }

    fn config_for(&self, color: Color) -> &AiConfig {
        match color {
            Color::White => &self.settings.white,
            Color::Black => &self.settings.black,
        }
    }

    fn seed_for(&self, color: Color) -> Option<u64> {
        self.settings.seed.map(|seed| match color {
            Color::White => seed,
            Color::Black => seed.wrapping_add(1),
        })
    }

    fn chess_engine(&self, color: Color) -> AiEngine {
        let config = self.config_for(color).clone();
        match self.seed_for(color) {
            Some(seed) => AiEngine::with_seed(config, seed),
            None => AiEngine::new(config),
        }
    }

    fn checkers_ai(&self, color: Color) -> CheckersAi {
        let difficulty = self.config_for(color).difficulty;
        match self.seed_for(color) {
            Some(seed) => CheckersAi::with_seed(difficulty, seed),
            None => CheckersAi::new(difficulty),
        }
    }

    fn new_record(&self, game: GameKind) -> GameRecord {
        let white = &self.settings.white;
        let black = &self.settings.black;
        let mut record = GameRecord::new(
            game,
            format!("AI-{}", white.difficulty),
            format!("AI-{}", black.difficulty),
        );
        record.set_ai_difficulty(&format!("{}/{}", white.difficulty, black.difficulty));
        record
    }
}

/// 模拟思考时间
async fn think(delay_ms: u64) {
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_ai::Difficulty;
    use rules::{CheckersBoard, WinReason};

    fn config(difficulty: Difficulty) -> AiConfig {
        AiConfig {
            think_delay_ms: 0,
            ..AiConfig::from_difficulty(difficulty)
        }
    }

    fn settings(white: Difficulty, black: Difficulty, max_plies: usize) -> MatchSettings {
        MatchSettings {
            white: config(white),
            black: config(black),
            seed: Some(2024),
            max_plies,
            start_fen: None,
        }
    }

    fn notations(record: &GameRecord) -> Vec<String> {
        record.moves.iter().map(|m| m.notation.clone()).collect()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_chess_match_replays() {
        let runner = MatchRunner::new(settings(Difficulty::Easy, Difficulty::Easy, 30));
        let record = runner.run_chess().await.unwrap();

        assert!(record.moves.len() <= 30);
        assert!(record.metadata.result.is_some());
        assert_eq!(record.metadata.white_player, "AI-easy");

        // 按记录重放，记号必须一致
        let mut state = GameState::new();
        for mv in &record.moves {
            let from = mv.from_position().unwrap();
            let to = mv.to_position().unwrap();
            state = state.play(from, to).unwrap();
            assert_eq!(state.move_history.last(), Some(&mv.notation));
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_seeded_match_is_reproducible() {
        let first = MatchRunner::new(settings(Difficulty::Easy, Difficulty::Medium, 12))
            .run_chess()
            .await
            .unwrap();
        let second = MatchRunner::new(settings(Difficulty::Easy, Difficulty::Medium, 12))
            .run_chess()
            .await
            .unwrap();
        assert_eq!(notations(&first), notations(&second));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_chess_match_from_fen_ends_in_mate() {
        let mut settings = settings(Difficulty::Medium, Difficulty::Medium, 10);
        settings.start_fen = Some("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1".to_string());

        let record = MatchRunner::new(settings).run_chess().await.unwrap();
        assert_eq!(notations(&record), vec!["Ra1-a8#".to_string()]);
        assert_eq!(
            record.metadata.result,
            Some(GameResult::WhiteWin(WinReason::Checkmate))
        );
        assert_eq!(
            record.initial_fen.as_deref(),
            Some("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1")
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_invalid_fen_is_error() {
        let mut settings = settings(Difficulty::Easy, Difficulty::Easy, 10);
        settings.start_fen = Some("not a fen".to_string());
        assert!(MatchRunner::new(settings.clone()).run_chess().await.is_err());

        // 黑王缺失的局面不能开局
        settings.start_fen = Some("8/8/8/8/8/8/8/4R1K1 w - - 0 1".to_string());
        assert!(MatchRunner::new(settings).run_chess().await.is_err());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_checkers_match() {
        let runner = MatchRunner::new(settings(Difficulty::Hard, Difficulty::Easy, 150));
        let record = runner.run(GameKind::Checkers).await.unwrap();

        assert!(!record.moves.is_empty());
        assert!(record.moves.len() <= 150);
        assert!(record.initial_fen.is_none());

        // 黑方先走：第一步从黑方阵地出发
        let first = record.moves[0].from_position().unwrap();
        assert!(first.row <= 2);
        assert!(CheckersBoard::initial().get(first).color() == Some(Color::Black));

        // 记录可以按规则完整重放
        crate::replay(&record).unwrap();

        match record.metadata.result {
            Some(GameResult::Draw(reason)) => assert_eq!(reason, DrawReason::MoveLimit),
            Some(_) => {}
            None => panic!("对局必须有结果"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_move_limit_draw() {
        let runner = MatchRunner::new(settings(Difficulty::Easy, Difficulty::Easy, 2));
        let record = runner.run_chess().await.unwrap();
        assert_eq!(record.moves.len(), 2);
        assert_eq!(
            record.metadata.result,
            Some(GameResult::Draw(DrawReason::MoveLimit))
        );
    }
}
