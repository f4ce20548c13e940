//! 对局相关枚举定义

use serde::{Deserialize, Serialize};

/// 对局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// 对局未结束
    None,
    /// X 方获胜
    XWins,
    /// O 方获胜
    OWins,
    /// 平局
    Draw,
}

impl GameResult {
    /// 对局是否已有终局结果
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameResult::None)
    }
}

/// 对局模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// 人机对战
    VsAi,
    /// 本地双人
    LocalMultiplayer,
    /// 网络对战（未实现，仅占位）
    NetworkMultiplayer,
}

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// 简单：随机落子
    Easy,
    /// 中等：必胜/必堵 + 70% 策略位
    Medium,
    /// 困难：Minimax，不可战胜
    Hard,
}

/// 难度档位总数（统计数组长度）
pub const DIFFICULTY_COUNT: usize = 3;

impl Difficulty {
    /// 统计数组下标：Easy=0, Medium=1, Hard=2
    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    /// 难度显示名
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// 难度行为描述
    pub fn description(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Random moves. Perfect for beginners.",
            Difficulty::Medium => "Smart moves with some randomness. A fair challenge.",
            Difficulty::Hard => "Unbeatable. Best possible moves every time.",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 游戏状态机的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// 初始态（尚未进入任何界面）
    None,
    /// 主菜单
    MainMenu,
    /// 难度选择
    DifficultySelect,
    /// 网络大厅
    Lobby,
    /// 等待对手加入（网络模式占位）
    WaitingForPlayer,
    /// 对局进行中，只有此状态接受落子
    Playing,
    /// 对局结束
    GameOver,
    /// 暂停
    Paused,
}

/// 以玩家视角划分的终局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// 玩家获胜
    Win,
    /// 玩家落败
    Loss,
    /// 平局
    Draw,
}

impl MatchOutcome {
    /// 从对局结果换算玩家视角的胜负
    ///
    /// `player_is_x` 指明哪个符号算作"玩家"。非终局结果没有对应胜负。
    pub fn from_result(result: GameResult, player_is_x: bool) -> Option<MatchOutcome> {
        match result {
            GameResult::None => None,
            GameResult::Draw => Some(MatchOutcome::Draw),
            GameResult::XWins => Some(if player_is_x {
                MatchOutcome::Win
            } else {
                MatchOutcome::Loss
            }),
            GameResult::OWins => Some(if player_is_x {
                MatchOutcome::Loss
            } else {
                MatchOutcome::Win
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_index() {
        assert_eq!(Difficulty::Easy.index(), 0);
        assert_eq!(Difficulty::Medium.index(), 1);
        assert_eq!(Difficulty::Hard.index(), 2);
        assert!(Difficulty::Hard.index() < DIFFICULTY_COUNT);
    }

    #[test]
    fn test_result_terminal() {
        assert!(!GameResult::None.is_terminal());
        assert!(GameResult::XWins.is_terminal());
        assert!(GameResult::Draw.is_terminal());
    }

    #[test]
    fn test_outcome_from_result() {
        // 玩家执 X
        assert_eq!(
            MatchOutcome::from_result(GameResult::XWins, true),
            Some(MatchOutcome::Win)
        );
        assert_eq!(
            MatchOutcome::from_result(GameResult::OWins, true),
            Some(MatchOutcome::Loss)
        );
        // 玩家执 O
        assert_eq!(
            MatchOutcome::from_result(GameResult::XWins, false),
            Some(MatchOutcome::Loss)
        );
        assert_eq!(
            MatchOutcome::from_result(GameResult::Draw, false),
            Some(MatchOutcome::Draw)
        );
        assert_eq!(MatchOutcome::from_result(GameResult::None, true), None);
    }
}
