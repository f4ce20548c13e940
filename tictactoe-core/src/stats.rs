//! 对局统计模型
//!
//! 记录各模式/难度下的胜负平与连胜，JSON 持久化由上层负责。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::STATS_VERSION;
use crate::types::{Difficulty, MatchOutcome, DIFFICULTY_COUNT};

/// 累计对局统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// 格式版本（用于将来迁移）
    pub version: u32,
    /// 首次启动时间
    pub first_launch: DateTime<Utc>,
    /// 总对局数
    pub total_games: u32,
    /// 人机对战胜场，下标 0=Easy 1=Medium 2=Hard
    pub wins_vs_ai: [u32; DIFFICULTY_COUNT],
    /// 人机对战负场
    pub losses_vs_ai: [u32; DIFFICULTY_COUNT],
    /// 人机对战平局
    pub draws_vs_ai: [u32; DIFFICULTY_COUNT],
    /// 本地双人中 X 方胜场
    pub wins_local: u32,
    /// 网络对战胜场
    pub wins_network: u32,
    /// 非人机负场
    pub losses: u32,
    /// 非人机平局
    pub draws: u32,
    /// 当前连胜
    pub current_win_streak: u32,
    /// 历史最佳连胜
    pub best_win_streak: u32,
    /// 最近保存时间
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_saved: Option<DateTime<Utc>>,
}

impl Statistics {
    /// 创建空统计
    pub fn new() -> Self {
        Self {
            version: STATS_VERSION,
            first_launch: Utc::now(),
            total_games: 0,
            wins_vs_ai: [0; DIFFICULTY_COUNT],
            losses_vs_ai: [0; DIFFICULTY_COUNT],
            draws_vs_ai: [0; DIFFICULTY_COUNT],
            wins_local: 0,
            wins_network: 0,
            losses: 0,
            draws: 0,
            current_win_streak: 0,
            best_win_streak: 0,
            last_saved: None,
        }
    }

    /// 记录一局人机对战结果（玩家视角）
    ///
    /// 平局不中断连胜。
    pub fn record_ai_game(&mut self, difficulty: Difficulty, outcome: MatchOutcome) {
        let index = difficulty.index();
        self.total_games += 1;

        match outcome {
            MatchOutcome::Win => {
                self.wins_vs_ai[index] += 1;
                self.bump_win_streak();
            }
            MatchOutcome::Draw => {
                self.draws_vs_ai[index] += 1;
            }
            MatchOutcome::Loss => {
                self.losses_vs_ai[index] += 1;
                self.current_win_streak = 0;
            }
        }
    }

    /// 记录一局本地双人结果
    ///
    /// 只统计 X 方胜场和平局；O 方胜负不单独跟踪，连胜不受影响。
    pub fn record_local_game(&mut self, outcome: MatchOutcome) {
        self.total_games += 1;

        match outcome {
            MatchOutcome::Win => self.wins_local += 1,
            MatchOutcome::Draw => self.draws += 1,
            MatchOutcome::Loss => {}
        }
    }

    /// 记录一局网络对战结果（玩家视角）
    pub fn record_network_game(&mut self, outcome: MatchOutcome) {
        self.total_games += 1;

        match outcome {
            MatchOutcome::Win => {
                self.wins_network += 1;
                self.bump_win_streak();
            }
            MatchOutcome::Draw => {
                self.draws += 1;
            }
            MatchOutcome::Loss => {
                self.losses += 1;
                self.current_win_streak = 0;
            }
        }
    }

    /// 全模式总胜场
    pub fn total_wins(&self) -> u32 {
        self.wins_vs_ai.iter().sum::<u32>() + self.wins_local + self.wins_network
    }

    /// 全模式总负场
    pub fn total_losses(&self) -> u32 {
        self.losses_vs_ai.iter().sum::<u32>() + self.losses
    }

    /// 全模式总平局
    pub fn total_draws(&self) -> u32 {
        self.draws_vs_ai.iter().sum::<u32>() + self.draws
    }

    /// 胜率百分比（无对局时为 0）
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        f64::from(self.total_wins()) / f64::from(self.total_games) * 100.0
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn bump_win_streak(&mut self) {
        self.current_win_streak += 1;
        if self.current_win_streak > self.best_win_streak {
            self.best_win_streak = self.current_win_streak;
        }
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}
