//! 跳棋 AI
//!
//! 不做搜索，按难度使用不同的启发式：
//! - 简单：加权随机，吃子权重更高
//! - 中等：有吃子则随机吃子，否则随机走
//! - 困难：有吃子必吃（取第一个），否则走最接近升变行的普通棋子

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rules::checkers::{self, CheckersBoard, CheckersMove};
use rules::Color;
use tracing::debug;

use crate::config::Difficulty;

/// 简单难度下吃子走法的权重
pub const CAPTURE_WEIGHT: u32 = 10;
/// 简单难度下普通走法的权重
pub const QUIET_WEIGHT: u32 = 1;

/// 跳棋 AI
pub struct CheckersAi<R: Rng = ChaCha8Rng> {
    difficulty: Difficulty,
    rng: R,
}

impl CheckersAi<ChaCha8Rng> {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, ChaCha8Rng::from_entropy())
    }

    /// 使用固定种子创建
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(difficulty, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> CheckersAi<R> {
    pub fn with_rng(difficulty: Difficulty, rng: R) -> Self {
        Self { difficulty, rng }
    }

    /// 选择走法；无子可动时返回 None
    pub fn best_move(&mut self, board: &CheckersBoard, color: Color) -> Option<CheckersMove> {
        let moves = checkers::all_moves(board, color);
        if moves.is_empty() {
            return None;
        }

        let chosen = match self.difficulty {
            Difficulty::Easy => self.pick_weighted(&moves),
            Difficulty::Medium => self.pick_capture_or_random(&moves),
            Difficulty::Hard => Self::pick_greedy(board, color, &moves),
        };

        debug!("checkers {} ({}) picks {:?}", color, self.difficulty, chosen);
        chosen
    }

    fn pick_weighted(&mut self, moves: &[CheckersMove]) -> Option<CheckersMove> {
        moves
            .choose_weighted(&mut self.rng, |mv| {
                if mv.is_capture() {
                    CAPTURE_WEIGHT
                } else {
                    QUIET_WEIGHT
                }
            })
            .ok()
            .copied()
    }

    fn pick_capture_or_random(&mut self, moves: &[CheckersMove]) -> Option<CheckersMove> {
        let captures: Vec<CheckersMove> = moves.iter().copied().filter(CheckersMove::is_capture).collect();
        if captures.is_empty() {
            moves.choose(&mut self.rng).copied()
        } else {
            captures.choose(&mut self.rng).copied()
        }
    }

    fn pick_greedy(board: &CheckersBoard, color: Color, moves: &[CheckersMove]) -> Option<CheckersMove> {
        if let Some(capture) = moves.iter().find(|mv| mv.is_capture()) {
            return Some(*capture);
        }

        // 王棋已无升变可言，排在最后
        let target = color.promotion_row() as i8;
        moves.iter().copied().min_by_key(|mv| {
            if board.get(mv.from).is_king() {
                u8::MAX
            } else {
                (mv.to.row as i8 - target).unsigned_abs()
            }
        })
    }
}
