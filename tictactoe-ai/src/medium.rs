//! 中等 AI

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tictactoe_core::{
    Board, CellState, Difficulty, POSITION_PRIORITY, SMART_MOVE_CHANCE, WIN_COMBINATIONS,
};

use crate::player::AiPlayer;

/// 中等 AI：启发式 + 少量随机性
///
/// 优先完成自己的线，其次堵对方的线；
/// 否则 70% 按位置优先级（中心 → 角 → 边）落子，30% 随机。
pub struct MediumAi {
    rng: ChaCha8Rng,
}

impl MediumAi {
    /// 创建中等 AI
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

    /// 找到能一步完成 `symbol` 三连的格子
    ///
    /// 按获胜组合的固定扫描顺序取第一个命中，多个机会并存时
    /// 的取舍由扫描顺序决定。
    fn find_completing_move(board: &Board, symbol: CellState) -> Option<usize> {
        for combo in &WIN_COMBINATIONS {
            let mut symbol_count = 0;
            let mut empty_index = None;

            for &index in combo {
                let cell = board.get_cell(index);
                if cell.is_empty() {
                    empty_index = Some(index);
                } else if cell == symbol {
                    symbol_count += 1;
                }
            }

            // 两个己方符号加一个空位即可完成
            if symbol_count == 2 {
                if let Some(index) = empty_index {
                    return Some(index);
                }
            }
        }
        None
    }

    /// 按位置优先级取第一个空格
    fn strategic_move(board: &Board) -> Option<usize> {
        POSITION_PRIORITY
            .iter()
            .copied()
            .find(|&index| board.is_cell_empty(index))
    }

    /// 随机取一个空格
    fn random_move(&mut self, empty: &[usize]) -> Option<usize> {
        if empty.is_empty() {
            return None;
        }
        Some(empty[self.rng.gen_range(0..empty.len())])
    }
}

impl Default for MediumAi {
    fn default() -> Self {
        Self::new()
    }
}

impl AiPlayer for MediumAi {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Medium
    }

    fn choose_move(&mut self, board: &Board, ai_symbol: CellState) -> Option<usize> {
        let empty = board.empty_cells();
        if empty.is_empty() || ai_symbol.is_empty() {
            return None;
        }

        // 优先级 1：完成自己的三连
        if let Some(index) = Self::find_completing_move(board, ai_symbol) {
            return Some(index);
        }

        // 优先级 2：堵对方的三连
        if let Some(index) = Self::find_completing_move(board, ai_symbol.opponent()) {
            return Some(index);
        }

        // 优先级 3：策略位或随机位
        if self.rng.gen::<f64>() < SMART_MOVE_CHANCE {
            Self::strategic_move(board)
        } else {
            self.random_move(&empty)
        }
    }
}
