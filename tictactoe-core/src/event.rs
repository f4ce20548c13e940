//! 对外事件定义
//!
//! 控制器向表现层（UI）推送的通知，见 [`crate::GameState`] 状态机。

use serde::{Deserialize, Serialize};

use crate::cell::CellState;
use crate::types::{GameResult, GameState};

/// 控制器推送给表现层的事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// 状态机状态变化
    StateChanged { state: GameState },
    /// 轮到新的一方落子
    TurnChanged { symbol: CellState },
    /// 落子完成
    MoveMade { index: usize, symbol: CellState },
    /// 对局结束
    GameEnded {
        result: GameResult,
        winning_line: Option<[usize; 3]>,
    },
}
