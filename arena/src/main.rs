use std::path::PathBuf;

use anyhow::Result;
use arena::{load_record, replay, save_record, MatchRunner, MatchSettings};
use clap::{Parser, ValueEnum};
use game_ai::{AiConfig, Difficulty};
use rules::GameKind;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameArg {
    Chess,
    Checkers,
}

impl From<GameArg> for GameKind {
    fn from(game: GameArg) -> Self {
        match game {
            GameArg::Chess => GameKind::Chess,
            GameArg::Checkers => GameKind::Checkers,
        }
    }
}

/// AI 对 AI 对弈
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 棋类
    #[arg(short, long, value_enum, default_value_t = GameArg::Chess)]
    game: GameArg,

    /// 白方难度 (easy / medium / hard)
    #[arg(long, default_value = "medium")]
    white: Difficulty,

    /// 黑方难度 (easy / medium / hard)
    #[arg(long, default_value = "medium")]
    black: Difficulty,

    /// 随机种子，指定后对局可复现
    #[arg(long)]
    seed: Option<u64>,

    /// 最大半回合数，超过后判和
    #[arg(long, default_value_t = 200)]
    max_plies: usize,

    /// JSON 格式的 AI 调参文件（双方共用搜索深度与扰动）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 国际象棋起始局面
    #[arg(long)]
    fen: Option<String>,

    /// 棋谱输出路径（文件或目录）
    #[arg(long)]
    record: Option<PathBuf>,

    /// 覆盖双方的思考延迟（毫秒）
    #[arg(long)]
    delay_ms: Option<u64>,

    /// 重放并校验已保存的棋谱，不进行新对局
    #[arg(long)]
    replay: Option<PathBuf>,
}

impl Args {
    fn side_config(&self, difficulty: Difficulty, tuning: Option<&AiConfig>) -> AiConfig {
        let mut config = match tuning {
            Some(tuning) => AiConfig {
                difficulty,
                ..tuning.clone()
            },
            None => AiConfig::from_difficulty(difficulty),
        };
        if let Some(delay_ms) = self.delay_ms {
            config.think_delay_ms = delay_ms;
        }
        config
    }

    fn settings(&self) -> Result<MatchSettings> {
        let tuning = match &self.config {
            Some(path) => Some(AiConfig::load(path)?),
            None => None,
        };

        Ok(MatchSettings {
            white: self.side_config(self.white, tuning.as_ref()),
            black: self.side_config(self.black, tuning.as_ref()),
            seed: self.seed,
            max_plies: self.max_plies,
            start_fen: self.fen.clone(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("arena=info".parse()?))
        .init();

    let args = Args::parse();

    if let Some(path) = &args.replay {
        let record = load_record(path)?;
        let result = replay(&record)?;
        println!("{}", record.to_text());
        println!("Replay verified: {} plies, result {:?}", record.moves.len(), result);
        return Ok(());
    }

    let settings = args.settings()?;
    info!(
        "Starting {:?}: white={} black={} seed={:?}",
        args.game, settings.white.difficulty, settings.black.difficulty, settings.seed
    );

    let runner = MatchRunner::new(settings);
    let record = runner.run(args.game.into()).await?;

    println!("{}", record.to_text());

    if let Some(target) = &args.record {
        let path = save_record(target, &record)?;
        println!("Record saved to {}", path.display());
    }

    Ok(())
}
