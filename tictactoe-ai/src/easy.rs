//! 简单 AI

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tictactoe_core::{Board, CellState, Difficulty};

use crate::player::AiPlayer;

/// 简单 AI：在空格子中均匀随机落子
pub struct EasyAi {
    rng: ChaCha8Rng,
}

impl EasyAi {
    /// 创建简单 AI
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// 以固定种子创建（用于可复现测试）
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for EasyAi {
    fn default() -> Self {
        Self::new()
    }
}

impl AiPlayer for EasyAi {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Easy
    }

    fn choose_move(&mut self, board: &Board, _ai_symbol: CellState) -> Option<usize> {
        let empty = board.empty_cells();
        if empty.is_empty() {
            return None;
        }

        let index = self.rng.gen_range(0..empty.len());
        Some(empty[index])
    }
}
