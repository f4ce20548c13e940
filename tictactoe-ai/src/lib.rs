//! 井字棋 AI 策略库
//!
//! 包含:
//! - 策略公共接口 (AiPlayer)
//! - 三档难度实现 (EasyAi / MediumAi / HardAi)
//! - 按难度构造的工厂 (AiFactory)

mod easy;
mod factory;
mod hard;
mod medium;
mod player;

pub use easy::EasyAi;
pub use factory::AiFactory;
pub use hard::HardAi;
pub use medium::MediumAi;
pub use player::AiPlayer;
