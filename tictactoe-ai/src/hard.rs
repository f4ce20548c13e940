//! 困难 AI

use tictactoe_core::{Board, CellState, Difficulty, GameResult, TOTAL_CELLS};

use crate::player::AiPlayer;

/// 获胜分值（按深度折扣）
const SCORE_WIN: i32 = 10;
/// 落败分值
const SCORE_LOSE: i32 = -10;
/// 平局分值
const SCORE_DRAW: i32 = 0;

/// 困难 AI：Minimax + Alpha-Beta 剪枝
///
/// 完全确定性，不可战胜；双方都完美时必然平局。
pub struct HardAi {
    nodes_searched: u64,
}

impl HardAi {
    /// 创建困难 AI
    pub fn new() -> Self {
        Self { nodes_searched: 0 }
    }

    /// 上一次搜索访问的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// Minimax 递归搜索
    ///
    /// 深度折扣让更快的胜利得分更高、更晚的失败损失更小。
    fn minimax(
        &mut self,
        board: &Board,
        ai_symbol: CellState,
        depth: i32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes_searched += 1;

        // 终局判定
        match board.check_win() {
            GameResult::XWins => {
                return if ai_symbol == CellState::X {
                    SCORE_WIN - depth
                } else {
                    SCORE_LOSE + depth
                };
            }
            GameResult::OWins => {
                return if ai_symbol == CellState::O {
                    SCORE_WIN - depth
                } else {
                    SCORE_LOSE + depth
                };
            }
            _ => {}
        }
        if board.check_draw() {
            return SCORE_DRAW;
        }

        let mover = if maximizing {
            ai_symbol
        } else {
            ai_symbol.opponent()
        };

        if maximizing {
            let mut max_score = i32::MIN;
            for index in board.empty_cells() {
                let mut clone = board.clone();
                clone.make_move(index, mover);

                let score = self.minimax(&clone, ai_symbol, depth + 1, false, alpha, beta);
                max_score = max_score.max(score);
                alpha = alpha.max(score);

                // Beta 剪枝
                if beta <= alpha {
                    break;
                }
            }
            max_score
        } else {
            let mut min_score = i32::MAX;
            for index in board.empty_cells() {
                let mut clone = board.clone();
                clone.make_move(index, mover);

                let score = self.minimax(&clone, ai_symbol, depth + 1, true, alpha, beta);
                min_score = min_score.min(score);
                beta = beta.min(score);

                // Alpha 剪枝
                if beta <= alpha {
                    break;
                }
            }
            min_score
        }
    }
}

impl Default for HardAi {
    fn default() -> Self {
        Self::new()
    }
}

impl AiPlayer for HardAi {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Hard
    }

    fn choose_move(&mut self, board: &Board, ai_symbol: CellState) -> Option<usize> {
        self.nodes_searched = 0;

        let empty = board.empty_cells();
        if empty.is_empty() || ai_symbol.is_empty() {
            return None;
        }

        // 开局捷径：空棋盘直接取中心
        if empty.len() == TOTAL_CELLS {
            return Some(4);
        }

        // 第二手：中心被占则取第一个角，否则取中心
        if empty.len() == TOTAL_CELLS - 1 {
            return Some(if board.is_cell_empty(4) { 4 } else { 0 });
        }

        let mut best_score = i32::MIN;
        let mut best_move = None;

        // 按空格升序枚举，严格大于才更新，平分取最小索引
        for &index in &empty {
            let mut clone = board.clone();
            clone.make_move(index, ai_symbol);

            let score = self.minimax(&clone, ai_symbol, 0, false, i32::MIN, i32::MAX);
            if score > best_score {
                best_score = score;
                best_move = Some(index);
            }
        }

        best_move
    }
}
