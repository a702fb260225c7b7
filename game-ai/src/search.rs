//! 搜索引擎
//!
//! 实现 Minimax (negamax 形式) + Alpha-Beta 剪枝，根节点加随机扰动

use std::cmp::Reverse;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rules::{Board, Color, Move, MoveExecutor, MoveGenerator, Position};
use tracing::{debug, trace};

use crate::config::{AiConfig, Difficulty};
use crate::evaluate::Evaluator;

/// 将死分值（加上剩余深度，越快将死分越高）
pub const MATE_SCORE: i32 = 100_000;

/// 搜索窗口边界
const INFINITY: i32 = i32::MAX / 2;

/// AI 引擎
///
/// 随机源可注入：默认使用 `ChaCha8Rng`，测试中用固定种子复现。
pub struct AiEngine<R: Rng = ChaCha8Rng> {
    config: AiConfig,
    rng: R,
    nodes_searched: u64,
}

impl AiEngine<ChaCha8Rng> {
    /// 创建新的 AI 引擎（随机种子）
    pub fn new(config: AiConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// 使用固定种子创建
    pub fn with_seed(config: AiConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::new(AiConfig::from_difficulty(difficulty))
    }
}

impl<R: Rng> AiEngine<R> {
    pub fn with_rng(config: AiConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            nodes_searched: 0,
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 选择走法；走子方无合法走法时返回 None
    pub fn best_move(
        &mut self,
        board: &Board,
        color: Color,
        en_passant_target: Option<Position>,
    ) -> Option<Move> {
        self.nodes_searched = 0;

        let mut moves = MoveGenerator::all_legal_moves(board, color, en_passant_target);
        if moves.is_empty() {
            return None;
        }

        // 中等难度：有吃子走法时只在吃子走法中选（含吃过路兵）
        if self.config.difficulty == Difficulty::Medium {
            let captures: Vec<Move> = moves
                .iter()
                .copied()
                .filter(|mv| {
                    MoveExecutor::apply(board, mv.from, mv.to, en_passant_target).is_capture()
                })
                .collect();
            if !captures.is_empty() {
                trace!("{} restricts root to {} captures", color, captures.len());
                moves = captures;
            }
        }

        if self.config.search_depth == 0 {
            let mv = moves.choose(&mut self.rng).copied();
            debug!("{} ({}) picks random move {:?}", color, self.config.difficulty, mv);
            return mv;
        }

        let depth = self.config.search_depth;
        let mut best: Option<(Move, i32)> = None;

        // 根节点按生成顺序遍历，同分保留先出现的走法
        for mv in moves {
            let outcome = MoveExecutor::apply(board, mv.from, mv.to, en_passant_target);
            let score = -self.minimax(
                &outcome.board,
                depth - 1,
                -INFINITY,
                INFINITY,
                color.opponent(),
                outcome.en_passant_target,
            );
            let total = score + self.jitter();
            trace!("root {} score {} (raw {})", mv, total, score);

            if best.map_or(true, |(_, best_score)| total > best_score) {
                best = Some((mv, total));
            }
        }

        if let Some((mv, score)) = best {
            debug!(
                "{} ({}) depth {} picks {} score {} nodes {}",
                color, self.config.difficulty, depth, mv, score, self.nodes_searched
            );
        }
        best.map(|(mv, _)| mv)
    }

    /// Minimax 搜索，返回 `side` 视角的分值
    ///
    /// 深度为 0 时返回静态评估；无子可动时被将死返回 `-(MATE_SCORE + depth)`，
    /// 逼和返回 0。`alpha >= beta` 时停止展开兄弟节点。
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        side: Color,
        en_passant_target: Option<Position>,
    ) -> i32 {
        self.nodes_searched += 1;

        if depth == 0 {
            return Evaluator::evaluate(board, side);
        }

        let mut moves = MoveGenerator::all_legal_moves(board, side, en_passant_target);

        if moves.is_empty() {
            if MoveGenerator::is_in_check(board, side) {
                return -(MATE_SCORE + depth as i32);
            }
            return 0;
        }

        order_moves(board, &mut moves);

        let mut best = -INFINITY;
        for mv in moves {
            let outcome = MoveExecutor::apply(board, mv.from, mv.to, en_passant_target);
            let score = -self.minimax(
                &outcome.board,
                depth - 1,
                -beta,
                -alpha,
                side.opponent(),
                outcome.en_passant_target,
            );

            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        best
    }

    /// 根节点随机扰动
    fn jitter(&mut self) -> i32 {
        let amount = self.config.jitter;
        if amount > 0 {
            self.rng.gen_range(-amount..=amount)
        } else {
            0
        }
    }

    /// 获取搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

/// 吃子走法优先（被吃子价值高的在前），其余保持原顺序
fn order_moves(board: &Board, moves: &mut [Move]) {
    moves.sort_by_key(|mv| Reverse(board.get(mv.to).map(|piece| piece.value()).unwrap_or(0)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rules::Fen;

    fn sq(text: &str) -> Position {
        Position::from_algebraic(text).unwrap()
    }

    fn engine(difficulty: Difficulty, seed: u64) -> AiEngine {
        AiEngine::with_seed(AiConfig::from_difficulty(difficulty), seed)
    }

    #[test]
    fn test_no_move_when_terminal() {
        let mate = Fen::parse("8/8/8/8/8/8/1q6/K1k5 w - - 0 1").unwrap();
        let stalemate = Fen::parse("8/8/8/8/8/1q6/2k5/K7 w - - 0 1").unwrap();

        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mut ai = engine(difficulty, 1);
            assert_eq!(ai.best_move(&mate.board, Color::White, None), None);
            assert_eq!(ai.best_move(&stalemate.board, Color::White, None), None);
        }
    }

    #[test]
    fn test_moves_come_from_legal_set() {
        let state = Fen::initial();
        let legal = MoveGenerator::all_legal_moves(&state.board, Color::White, None);

        for seed in 0..5 {
            for difficulty in [Difficulty::Easy, Difficulty::Medium] {
                let mv = engine(difficulty, seed).best_move(&state.board, Color::White, None);
                assert!(legal.contains(&mv.unwrap()), "走法必须来自合法走法集合");
            }
        }

        let mv = engine(Difficulty::Hard, 3).best_move(&state.board, Color::White, None);
        assert!(legal.contains(&mv.unwrap()));

        let sparse = Fen::parse("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        let legal = MoveGenerator::all_legal_moves(&sparse.board, Color::White, None);
        let mv = engine(Difficulty::Hard, 3).best_move(&sparse.board, Color::White, None);
        assert!(legal.contains(&mv.unwrap()));
    }

    #[test]
    fn test_moves_legal_with_castling_and_en_passant() {
        // 双方都可以易位，且白方可以吃过路兵
        let state = Fen::parse("r3k2r/8/8/3pP3/8/8/8/R3K2R w KQkq d6 0 1").unwrap();
        let ept = state.en_passant_target;
        let legal = MoveGenerator::all_legal_moves(&state.board, Color::White, ept);
        assert!(legal.contains(&Move::new(sq("e1"), sq("g1"))));
        assert!(legal.contains(&Move::new(sq("e5"), sq("d6"))));

        for seed in 0..3 {
            for difficulty in [Difficulty::Easy, Difficulty::Medium] {
                let mv = engine(difficulty, seed).best_move(&state.board, Color::White, ept);
                assert!(legal.contains(&mv.unwrap()), "走法必须来自合法走法集合");
            }
        }
        let mv = engine(Difficulty::Hard, 0).best_move(&state.board, Color::White, ept);
        assert!(legal.contains(&mv.unwrap()));

        // 黑方视角：易位权仍在
        let black = Fen::parse("r3k2r/8/8/3pP3/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        let legal = MoveGenerator::all_legal_moves(&black.board, Color::Black, None);
        let mv = engine(Difficulty::Hard, 1).best_move(&black.board, Color::Black, None);
        assert!(legal.contains(&mv.unwrap()));
    }

    #[test]
    fn test_seeded_engine_is_reproducible() {
        let state = Fen::initial();
        let first = engine(Difficulty::Medium, 42).best_move(&state.board, Color::White, None);
        let second = engine(Difficulty::Medium, 42).best_move(&state.board, Color::White, None);
        assert_eq!(first, second);

        let first = engine(Difficulty::Easy, 7).best_move(&state.board, Color::White, None);
        let second = engine(Difficulty::Easy, 7).best_move(&state.board, Color::White, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_medium_takes_hanging_queen() {
        let state = Fen::parse("4k3/8/8/8/3q4/8/8/3RK3 w - - 0 1").unwrap();
        for seed in 0..3 {
            let mv = engine(Difficulty::Medium, seed)
                .best_move(&state.board, Color::White, None)
                .unwrap();
            assert_eq!(mv, Move::new(sq("d1"), sq("d4")), "应该吃掉无保护的后");
        }
    }

    #[test]
    fn test_medium_prefers_capture() {
        // 唯一的吃子是 Qxd5，吃完会被 c6 兵吃回，但中等难度仍然吃子
        let state = Fen::parse("4k3/8/2p5/3p4/8/8/8/3QK3 w - - 0 1").unwrap();
        for seed in 0..20 {
            let mv = engine(Difficulty::Medium, seed)
                .best_move(&state.board, Color::White, None)
                .unwrap();
            assert_eq!(mv, Move::new(sq("d1"), sq("d5")), "中等难度应该优先吃子");
        }

        // 吃过路兵也算吃子
        let state = Fen::parse("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        for seed in 0..5 {
            let mv = engine(Difficulty::Medium, seed)
                .best_move(&state.board, Color::White, state.en_passant_target)
                .unwrap();
            assert_eq!(mv, Move::new(sq("e5"), sq("d6")));
        }
    }

    #[test]
    fn test_finds_back_rank_mate() {
        let state = Fen::parse("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let expected = Move::new(sq("a1"), sq("a8"));

        let mut medium = engine(Difficulty::Medium, 5);
        assert_eq!(medium.best_move(&state.board, Color::White, None), Some(expected));

        let mut hard = engine(Difficulty::Hard, 5);
        assert_eq!(hard.best_move(&state.board, Color::White, None), Some(expected));
        assert!(hard.nodes_searched() > 0);
    }

    #[test]
    fn test_minimax_terminal_scores() {
        let mut ai = engine(Difficulty::Hard, 0);

        let mate = Fen::parse("8/8/8/8/8/8/1q6/K1k5 w - - 0 1").unwrap();
        let score = ai.minimax(&mate.board, 3, -INFINITY, INFINITY, Color::White, None);
        assert_eq!(score, -(MATE_SCORE + 3));

        let stalemate = Fen::parse("8/8/8/8/8/1q6/2k5/K7 w - - 0 1").unwrap();
        let score = ai.minimax(&stalemate.board, 2, -INFINITY, INFINITY, Color::White, None);
        assert_eq!(score, 0);

        // 深度 0 直接返回静态评估
        let board = Board::initial();
        assert_eq!(ai.minimax(&board, 0, -INFINITY, INFINITY, Color::White, None), 0);
    }

    #[test]
    fn test_capture_ordering() {
        let board = Fen::parse("4k3/8/8/8/3q4/8/8/3RK3 w - - 0 1").unwrap().board;
        let mut moves = MoveGenerator::all_legal_moves(&board, Color::White, None);
        order_moves(&board, &mut moves);
        assert_eq!(moves[0], Move::new(sq("d1"), sq("d4")));
    }
}
