//! 井字棋共享核心库
//!
//! 包含:
//! - 格子、棋盘等核心数据结构
//! - 胜负/平局判定
//! - 对局枚举（结果、模式、难度、状态机状态）
//! - 对外事件类型 (GameEvent)
//! - 对局统计模型 (Statistics)

mod board;
mod cell;
mod constants;
mod error;
mod event;
mod stats;
mod types;

pub use board::Board;
pub use cell::CellState;
pub use constants::*;
pub use error::{GameError, Result};
pub use event::GameEvent;
pub use stats::Statistics;
pub use types::{
    Difficulty, GameMode, GameResult, GameState, MatchOutcome, DIFFICULTY_COUNT,
};
