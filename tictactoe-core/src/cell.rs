//! 格子状态定义

use serde::{Deserialize, Serialize};

/// 格子状态（空、X、O）
///
/// X 为先手方，O 为后手方
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// 空格子
    #[default]
    Empty,
    /// X 方
    X,
    /// O 方
    O,
}

impl CellState {
    /// 获取对方符号（Empty 没有对方，原样返回）
    pub fn opponent(&self) -> CellState {
        match self {
            CellState::X => CellState::O,
            CellState::O => CellState::X,
            CellState::Empty => CellState::Empty,
        }
    }

    /// 是否为空格子
    pub fn is_empty(&self) -> bool {
        matches!(self, CellState::Empty)
    }

    /// 获取显示字符
    pub fn to_char(&self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::X => 'X',
            CellState::O => 'O',
        }
    }
}

impl std::fmt::Display for CellState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
