//! 战绩存储系统
//!
//! 以 JSON 文件保存累计统计，带备份文件回退。
//! 存储格式对核心逻辑不可见，控制器只通过 [`StatsRecorder`] 访问。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;

use tictactoe_core::{
    Difficulty, GameMode, MatchOutcome, Statistics, STATS_BACKUP_FILE_NAME, STATS_FILE_NAME,
};

/// 战绩记录接口
///
/// 控制器在每局终局时调用一次 `record_match_result`。
pub trait StatsRecorder: Send {
    /// 记录一局结果
    fn record_match_result(
        &mut self,
        mode: GameMode,
        difficulty: Option<Difficulty>,
        outcome: MatchOutcome,
    );

    /// 读取当前统计
    fn read_statistics(&self) -> Statistics;
}

/// 文件存储的战绩记录器
pub struct StatsStore {
    stats_path: PathBuf,
    backup_path: PathBuf,
    stats: Statistics,
}

impl StatsStore {
    /// 在平台默认数据目录下创建存储
    pub fn new() -> Result<Self> {
        let dir = default_stats_directory()?;
        Self::with_dir(&dir)
    }

    /// 在指定目录下创建存储（测试用）
    pub fn with_dir(dir: &Path) -> Result<Self> {
        if !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create stats directory: {:?}", dir))?;
        }

        let stats_path = dir.join(STATS_FILE_NAME);
        let backup_path = dir.join(STATS_BACKUP_FILE_NAME);
        let stats = Self::load_or_default(&stats_path, &backup_path);

        Ok(Self {
            stats_path,
            backup_path,
            stats,
        })
    }

    /// 当前统计
    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// 统计文件路径
    pub fn stats_path(&self) -> &Path {
        &self.stats_path
    }

    /// 立即写入磁盘
    ///
    /// 先把旧文件转存为备份，再经临时文件原子替换，
    /// 避免写入中断留下半个文件。
    pub fn save(&mut self) -> Result<()> {
        self.stats.last_saved = Some(Utc::now());

        let json = self
            .stats
            .to_json()
            .context("failed to serialize statistics")?;

        if self.stats_path.exists() {
            fs::copy(&self.stats_path, &self.backup_path)
                .with_context(|| format!("failed to back up stats file: {:?}", self.backup_path))?;
        }

        let tmp_path = self.stats_path.with_extension("tmp");
        fs::write(&tmp_path, json)
            .with_context(|| format!("failed to write stats file: {:?}", tmp_path))?;
        fs::rename(&tmp_path, &self.stats_path)
            .with_context(|| format!("failed to replace stats file: {:?}", self.stats_path))?;

        Ok(())
    }

    /// 读主文件，损坏则回退备份，再不行用默认值
    fn load_or_default(stats_path: &Path, backup_path: &Path) -> Statistics {
        for path in [stats_path, backup_path] {
            if !path.exists() {
                continue;
            }
            match Self::load_file(path) {
                Ok(stats) => return stats,
                Err(err) => {
                    tracing::warn!("failed to load stats from {:?}: {:#}", path, err);
                }
            }
        }
        Statistics::new()
    }

    fn load_file(path: &Path) -> Result<Statistics> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read stats file: {:?}", path))?;
        Statistics::from_json(&content)
            .with_context(|| format!("failed to parse stats file: {:?}", path))
    }
}

impl StatsRecorder for StatsStore {
    fn record_match_result(
        &mut self,
        mode: GameMode,
        difficulty: Option<Difficulty>,
        outcome: MatchOutcome,
    ) {
        match mode {
            GameMode::VsAi => {
                let Some(difficulty) = difficulty else {
                    tracing::warn!("vs-AI result without difficulty, not recorded");
                    return;
                };
                self.stats.record_ai_game(difficulty, outcome);
            }
            GameMode::LocalMultiplayer => self.stats.record_local_game(outcome),
            GameMode::NetworkMultiplayer => self.stats.record_network_game(outcome),
        }

        // 每局结束立即落盘
        if let Err(err) = self.save() {
            tracing::error!("failed to save statistics: {:#}", err);
        }
    }

    fn read_statistics(&self) -> Statistics {
        self.stats.clone()
    }
}

/// 获取平台默认统计目录
fn default_stats_directory() -> Result<PathBuf> {
    let base = dirs::data_dir().context("failed to resolve platform data directory")?;
    Ok(base.join("tictactoe"))
}
