//! 核心常量定义

use std::time::Duration;

/// 棋盘边长
pub const BOARD_SIZE: usize = 3;

/// 格子总数
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// 全部获胜组合（格子索引三元组）
///
/// 固定顺序：3 行、3 列、2 条对角线。
/// 判定和 AI 扫描都依赖这个顺序，不要调整。
pub const WIN_COMBINATIONS: [[usize; 3]; 8] = [
    [0, 1, 2], // 上行
    [3, 4, 5], // 中行
    [6, 7, 8], // 下行
    [0, 3, 6], // 左列
    [1, 4, 7], // 中列
    [2, 5, 8], // 右列
    [0, 4, 8], // 主对角线
    [2, 4, 6], // 副对角线
];

/// 位置优先级：中心(4) → 角(0,2,6,8) → 边(1,3,5,7)
pub const POSITION_PRIORITY: [usize; TOTAL_CELLS] = [4, 0, 2, 6, 8, 1, 3, 5, 7];

/// 中等 AI 选择策略位的概率
pub const SMART_MOVE_CHANCE: f64 = 0.7;

/// AI 思考延迟下限（毫秒）
pub const THINK_DELAY_MIN_MS: u64 = 300;

/// AI 思考延迟上限（毫秒）
pub const THINK_DELAY_MAX_MS: u64 = 800;

/// AI 思考延迟下限 Duration
pub const THINK_DELAY_MIN: Duration = Duration::from_millis(THINK_DELAY_MIN_MS);

/// AI 思考延迟上限 Duration
pub const THINK_DELAY_MAX: Duration = Duration::from_millis(THINK_DELAY_MAX_MS);

/// 统计文件名
pub const STATS_FILE_NAME: &str = "tictactoe_stats.json";

/// 统计备份文件名
pub const STATS_BACKUP_FILE_NAME: &str = "tictactoe_stats_backup.json";

/// 统计格式当前版本
pub const STATS_VERSION: u32 = 1;
