//! 错误类型定义
//!
//! 仅用于存储/配置层面的故障。非法落子、错误回合等输入问题
//! 按布尔失败处理，不走错误通道。

use thiserror::Error;

/// 核心错误类型
#[derive(Error, Debug)]
pub enum GameError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化错误
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 统计数据损坏
    #[error("Corrupt statistics data: {reason}")]
    Corrupt { reason: String },
}

/// 核心操作结果类型
pub type Result<T> = std::result::Result<T, GameError>;
