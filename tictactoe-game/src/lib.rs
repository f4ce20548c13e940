//! 井字棋对局引擎
//!
//! 包含:
//! - 对局控制器状态机 (GameController)
//! - 带 AI 思考延迟调度的会话 (GameSession)
//! - 战绩存储 (StatsStore)

mod controller;
mod session;
mod storage;

pub use controller::{GameController, ThinkTicket};
pub use session::GameSession;
pub use storage::{StatsRecorder, StatsStore};
