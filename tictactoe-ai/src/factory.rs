//! AI 策略工厂

use tictactoe_core::Difficulty;

use crate::easy::EasyAi;
use crate::hard::HardAi;
use crate::medium::MediumAi;
use crate::player::AiPlayer;

/// 按难度构造策略实例
///
/// `Difficulty` 枚举保证不存在未知难度值，match 无需兜底分支。
pub struct AiFactory;

impl AiFactory {
    /// 创建指定难度的 AI
    pub fn create(difficulty: Difficulty) -> Box<dyn AiPlayer> {
        tracing::debug!("creating {} AI", difficulty);
        match difficulty {
            Difficulty::Easy => Box::new(EasyAi::new()),
            Difficulty::Medium => Box::new(MediumAi::new()),
            Difficulty::Hard => Box::new(HardAi::new()),
        }
    }

    /// 创建指定难度的 AI，并为随机策略注入种子
    ///
    /// Hard 完全确定性，种子被忽略。
    pub fn create_with_seed(difficulty: Difficulty, seed: u64) -> Box<dyn AiPlayer> {
        match difficulty {
            Difficulty::Easy => Box::new(EasyAi::with_seed(seed)),
            Difficulty::Medium => Box::new(MediumAi::with_seed(seed)),
            Difficulty::Hard => Box::new(HardAi::new()),
        }
    }
}
