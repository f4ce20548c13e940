//! 棋盘模型

use serde::{Deserialize, Serialize};

use crate::cell::CellState;
use crate::constants::{BOARD_SIZE, TOTAL_CELLS, WIN_COMBINATIONS};
use crate::types::GameResult;

/// 3x3 棋盘
///
/// 9 个格子按行优先编号 0-8（行 = index / 3，列 = index % 3）。
/// 格子一旦落子只能通过 [`Board::reset`] 清空；
/// 不变量：`move_count` 等于非空格子数。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 格子状态，索引 0-8
    cells: [CellState; TOTAL_CELLS],
    /// 已落子数
    move_count: usize,
}

impl Board {
    /// 创建空棋盘
    pub fn new() -> Self {
        Self {
            cells: [CellState::Empty; TOTAL_CELLS],
            move_count: 0,
        }
    }

    /// 清空棋盘，回到初始状态
    pub fn reset(&mut self) {
        self.cells = [CellState::Empty; TOTAL_CELLS];
        self.move_count = 0;
    }

    /// 在指定格子落子
    ///
    /// 仅当索引在界内、格子为空且 `player` 不是 Empty 时成功。
    /// 失败返回 false 且棋盘不发生任何变化。
    pub fn make_move(&mut self, index: usize, player: CellState) -> bool {
        if !self.is_valid_move(index, player) {
            return false;
        }

        self.cells[index] = player;
        self.move_count += 1;
        true
    }

    /// 检查落子是否合法
    pub fn is_valid_move(&self, index: usize, player: CellState) -> bool {
        index < TOTAL_CELLS && self.cells[index].is_empty() && !player.is_empty()
    }

    /// 检查指定格子是否为空（越界视为非空）
    pub fn is_cell_empty(&self, index: usize) -> bool {
        index < TOTAL_CELLS && self.cells[index].is_empty()
    }

    /// 获取指定格子状态（越界返回 Empty）
    pub fn get_cell(&self, index: usize) -> CellState {
        if index < TOTAL_CELLS {
            self.cells[index]
        } else {
            CellState::Empty
        }
    }

    /// 全部格子状态
    pub fn cells(&self) -> &[CellState; TOTAL_CELLS] {
        &self.cells
    }

    /// 已落子数
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// 棋盘是否已满
    pub fn is_full(&self) -> bool {
        self.move_count >= TOTAL_CELLS
    }

    /// 检查是否有一方获胜
    ///
    /// 按固定顺序扫描 8 个获胜组合，返回第一个三格相同且非空的结果。
    pub fn check_win(&self) -> GameResult {
        for combo in &WIN_COMBINATIONS {
            let first = self.cells[combo[0]];
            if first.is_empty() {
                continue;
            }
            if self.cells[combo[1]] == first && self.cells[combo[2]] == first {
                return match first {
                    CellState::X => GameResult::XWins,
                    CellState::O => GameResult::OWins,
                    CellState::Empty => unreachable!("empty cells are skipped above"),
                };
            }
        }
        GameResult::None
    }

    /// 检查是否为平局（棋盘满且无人获胜）
    pub fn check_draw(&self) -> bool {
        self.is_full() && self.check_win() == GameResult::None
    }

    /// 获取完整对局结果（含平局）
    pub fn game_result(&self) -> GameResult {
        let win = self.check_win();
        if win != GameResult::None {
            return win;
        }
        if self.is_full() {
            return GameResult::Draw;
        }
        GameResult::None
    }

    /// 获取获胜线的三个格子索引（无人获胜返回 None）
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        for combo in &WIN_COMBINATIONS {
            let first = self.cells[combo[0]];
            if first.is_empty() {
                continue;
            }
            if self.cells[combo[1]] == first && self.cells[combo[2]] == first {
                return Some(*combo);
            }
        }
        None
    }

    /// 获取空格子索引列表（升序）
    pub fn empty_cells(&self) -> Vec<usize> {
        let mut empty = Vec::with_capacity(TOTAL_CELLS - self.move_count);
        for (i, cell) in self.cells.iter().enumerate() {
            if cell.is_empty() {
                empty.push(i);
            }
        }
        empty
    }

    /// 索引转坐标 (row, col)
    pub fn index_to_coords(index: usize) -> (usize, usize) {
        (index / BOARD_SIZE, index % BOARD_SIZE)
    }

    /// 坐标转索引
    pub fn coords_to_index(row: usize, col: usize) -> usize {
        row * BOARD_SIZE + col
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                write!(f, "{}", self.cells[Board::coords_to_index(row, col)])?;
                if col + 1 < BOARD_SIZE {
                    write!(f, " ")?;
                }
            }
            if row + 1 < BOARD_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
