//! AI 策略公共接口

use tictactoe_core::{Board, CellState, Difficulty};

/// AI 策略的公共契约
///
/// `choose_move` 只读取棋盘快照，绝不修改它；
/// 返回要落子的格子索引，无合法落子时返回 None。
pub trait AiPlayer: Send {
    /// 该策略对应的难度
    fn difficulty(&self) -> Difficulty;

    /// 为 `ai_symbol` 选择落子格
    fn choose_move(&mut self, board: &Board, ai_symbol: CellState) -> Option<usize>;
}
