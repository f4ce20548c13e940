//! 对局控制器
//!
//! 状态机持有唯一的棋盘和当前 AI 策略，人类与 AI 的落子
//! 走同一条校验路径，事件通过订阅通道推送给表现层。

use tokio::sync::mpsc;

use tictactoe_ai::{AiFactory, AiPlayer};
use tictactoe_core::{
    Board, CellState, Difficulty, GameEvent, GameMode, GameResult, GameState, MatchOutcome,
};

use crate::storage::StatsRecorder;

/// AI 思考回执
///
/// [`GameController::begin_ai_think`] 发出，延迟结束后凭它调用
/// [`GameController::complete_ai_move`]。携带发出时的版本号，
/// 棋局一旦重置/暂停/退出，旧回执自动失效。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkTicket {
    version: u64,
}

/// 对局控制器（状态机）
pub struct GameController {
    state: GameState,
    /// 暂停前的状态，恢复时回到这里
    state_before_pause: GameState,
    mode: Option<GameMode>,
    difficulty: Option<Difficulty>,
    board: Board,
    ai_player: Option<Box<dyn AiPlayer>>,
    /// VsAi 模式下玩家是否执 X
    player_is_x: bool,
    current_turn: CellState,
    last_result: GameResult,
    /// AI 思考延迟是否进行中
    ai_thinking: bool,
    /// 状态版本号，重置/暂停/退出时递增，用于丢弃过期的 AI 落子
    version: u64,
    subscribers: Vec<mpsc::UnboundedSender<GameEvent>>,
    stats: Option<Box<dyn StatsRecorder>>,
}

impl GameController {
    /// 创建控制器，进入主菜单
    pub fn new() -> Self {
        let mut controller = Self {
            state: GameState::None,
            state_before_pause: GameState::None,
            mode: None,
            difficulty: None,
            board: Board::new(),
            ai_player: None,
            player_is_x: true,
            current_turn: CellState::X,
            last_result: GameResult::None,
            ai_thinking: false,
            version: 0,
            subscribers: Vec::new(),
            stats: None,
        };
        controller.change_state(GameState::MainMenu);
        controller
    }

    /// 设置战绩记录器
    pub fn set_stats_recorder(&mut self, recorder: Box<dyn StatsRecorder>) {
        self.stats = Some(recorder);
    }

    /// 订阅对局事件
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<GameEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    // ========== 状态查询 ==========

    /// 当前状态
    pub fn state(&self) -> GameState {
        self.state
    }

    /// 当前对局模式
    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    /// 当前 AI 难度
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// 当前棋盘
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 当前落子方
    pub fn current_turn(&self) -> CellState {
        self.current_turn
    }

    /// 最近一局结果
    pub fn last_result(&self) -> GameResult {
        self.last_result
    }

    /// VsAi 模式下玩家是否执 X
    pub fn player_is_x(&self) -> bool {
        self.player_is_x
    }

    /// AI 思考延迟是否进行中
    pub fn is_ai_thinking(&self) -> bool {
        self.ai_thinking
    }

    /// 当前状态版本号
    pub fn version(&self) -> u64 {
        self.version
    }

    /// 获胜线的三个格子索引
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        self.board.winning_line()
    }

    // ========== 界面流转 ==========

    /// 直接切换状态机状态（供表现层流转使用）
    pub fn set_state(&mut self, new_state: GameState) {
        self.change_state(new_state);
    }

    /// 进入难度选择
    pub fn go_to_difficulty_select(&mut self) {
        self.change_state(GameState::DifficultySelect);
    }

    /// 进入网络大厅
    pub fn go_to_lobby(&mut self) {
        self.change_state(GameState::Lobby);
    }

    // ========== 开局 ==========

    /// 开始人机对战
    pub fn start_game_vs_ai(&mut self, difficulty: Difficulty, player_is_x: bool) {
        self.mode = Some(GameMode::VsAi);
        self.difficulty = Some(difficulty);
        self.player_is_x = player_is_x;
        self.ai_player = Some(AiFactory::create(difficulty));

        self.start_new_game();
    }

    /// 开始人机对战并为随机策略注入种子（用于可复现测试）
    pub fn start_game_vs_ai_with_seed(
        &mut self,
        difficulty: Difficulty,
        player_is_x: bool,
        seed: u64,
    ) {
        self.mode = Some(GameMode::VsAi);
        self.difficulty = Some(difficulty);
        self.player_is_x = player_is_x;
        self.ai_player = Some(AiFactory::create_with_seed(difficulty, seed));

        self.start_new_game();
    }

    /// 开始本地双人对战
    pub fn start_local_multiplayer(&mut self) {
        self.mode = Some(GameMode::LocalMultiplayer);
        self.ai_player = None;
        self.player_is_x = true;

        self.start_new_game();
    }

    /// 开始网络对战（未实现，进入等待对手状态）
    pub fn start_network_multiplayer(&mut self, is_host: bool) {
        self.mode = Some(GameMode::NetworkMultiplayer);
        self.ai_player = None;
        self.player_is_x = is_host;

        self.cancel_ai_thinking();
        self.change_state(GameState::WaitingForPlayer);
    }

    /// 重开当前模式的一局
    pub fn restart(&mut self) {
        self.cancel_ai_thinking();

        match self.mode {
            Some(GameMode::VsAi) => {
                if let Some(difficulty) = self.difficulty {
                    self.start_game_vs_ai(difficulty, self.player_is_x);
                }
            }
            Some(GameMode::LocalMultiplayer) => self.start_local_multiplayer(),
            Some(GameMode::NetworkMultiplayer) => self.start_new_game(),
            None => {
                tracing::debug!("restart ignored: no game mode selected");
            }
        }
    }

    /// 退出到主菜单
    pub fn quit_to_menu(&mut self) {
        self.cancel_ai_thinking();
        self.ai_player = None;
        self.change_state(GameState::MainMenu);
    }

    /// 暂停对局
    pub fn pause(&mut self) {
        if self.state == GameState::Playing {
            self.state_before_pause = self.state;
            // 暂停使进行中的思考回执失效；恢复后由宿主重新调度
            self.cancel_ai_thinking();
            self.change_state(GameState::Paused);
        }
    }

    /// 恢复对局
    pub fn resume(&mut self) {
        if self.state == GameState::Paused {
            self.change_state(self.state_before_pause);
        }
    }

    // ========== 落子 ==========

    /// 人类落子入口
    ///
    /// 只在 Playing 状态、非 AI 回合且无思考延迟挂起时接受；
    /// 其余情况静默拒绝（返回 false），快速连点属于正常输入。
    pub fn make_move(&mut self, index: usize) -> bool {
        if self.state != GameState::Playing {
            tracing::debug!("move rejected: game not in Playing state");
            return false;
        }

        if self.ai_thinking {
            tracing::debug!("move rejected: AI is thinking");
            return false;
        }

        if self.is_ai_turn() {
            tracing::debug!("move rejected: it's AI's turn");
            return false;
        }

        self.process_move(index)
    }

    // ========== AI 回合调度 ==========

    /// 是否轮到 AI 落子
    pub fn is_ai_turn(&self) -> bool {
        self.mode == Some(GameMode::VsAi)
            && self.ai_player.is_some()
            && self.current_turn == self.ai_symbol()
    }

    /// 是否有待调度的 AI 回合（Playing、轮到 AI 且尚未开始思考）
    pub fn ai_turn_pending(&self) -> bool {
        self.state == GameState::Playing && !self.ai_thinking && self.is_ai_turn()
    }

    /// 标记 AI 开始思考，返回思考回执
    ///
    /// 没有待调度的 AI 回合时返回 None。
    pub fn begin_ai_think(&mut self) -> Option<ThinkTicket> {
        if !self.ai_turn_pending() {
            return None;
        }

        self.ai_thinking = true;
        Some(ThinkTicket {
            version: self.version,
        })
    }

    /// 思考延迟结束，执行 AI 落子
    ///
    /// 先校验回执版本再校验状态：棋局在延迟期间发生过
    /// 重置/暂停/退出的，旧落子直接丢弃。
    pub fn complete_ai_move(&mut self, ticket: ThinkTicket) -> bool {
        if ticket.version != self.version {
            tracing::debug!("discarding stale AI move (state changed while thinking)");
            return false;
        }

        if self.state != GameState::Playing {
            tracing::debug!("discarding AI move: game not in Playing state");
            return false;
        }

        self.ai_thinking = false;

        let symbol = self.ai_symbol();
        let chosen = match self.ai_player.as_mut() {
            Some(ai) => ai.choose_move(&self.board, symbol),
            None => {
                tracing::warn!("AI move requested but no strategy is active");
                return false;
            }
        };

        let index = match chosen {
            Some(index) => index,
            None => {
                tracing::warn!("AI returned no move");
                return false;
            }
        };

        // 策略返回非法落子属于逻辑故障：告警并保持回合不变，避免破坏棋盘
        if !self.board.is_valid_move(index, symbol) {
            tracing::warn!("AI returned invalid move: {}", index);
            return false;
        }

        self.process_move(index)
    }

    // ========== 私有方法 ==========

    /// AI 使用的符号
    fn ai_symbol(&self) -> CellState {
        if self.player_is_x {
            CellState::O
        } else {
            CellState::X
        }
    }

    /// 开新一局的公共逻辑
    fn start_new_game(&mut self) {
        self.cancel_ai_thinking();

        self.board.reset();
        self.current_turn = CellState::X;
        self.last_result = GameResult::None;

        self.change_state(GameState::Playing);
        self.emit(GameEvent::TurnChanged {
            symbol: self.current_turn,
        });
    }

    /// 人类与 AI 共用的落子处理路径
    fn process_move(&mut self, index: usize) -> bool {
        if !self.board.make_move(index, self.current_turn) {
            return false;
        }

        self.emit(GameEvent::MoveMade {
            index,
            symbol: self.current_turn,
        });

        let result = self.board.game_result();
        if result.is_terminal() {
            self.end_game(result);
            return true;
        }

        self.switch_turn();
        true
    }

    /// 切换落子方
    fn switch_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
        self.emit(GameEvent::TurnChanged {
            symbol: self.current_turn,
        });
    }

    /// 终局处理：记录结果并通知表现层
    fn end_game(&mut self, result: GameResult) {
        self.last_result = result;
        self.change_state(GameState::GameOver);

        self.record_result(result);

        self.emit(GameEvent::GameEnded {
            result,
            winning_line: self.board.winning_line(),
        });
    }

    /// 把终局结果写入战绩（每局恰好一次）
    fn record_result(&mut self, result: GameResult) {
        let Some(mode) = self.mode else {
            return;
        };
        let Some(stats) = self.stats.as_mut() else {
            tracing::warn!("statistics recorder not set, result not recorded");
            return;
        };

        // 本地双人以 X 方视角统计，其余模式以玩家视角统计
        let player_is_x = match mode {
            GameMode::LocalMultiplayer => true,
            GameMode::VsAi | GameMode::NetworkMultiplayer => self.player_is_x,
        };
        let Some(outcome) = MatchOutcome::from_result(result, player_is_x) else {
            return;
        };

        let difficulty = match mode {
            GameMode::VsAi => self.difficulty,
            _ => None,
        };
        stats.record_match_result(mode, difficulty, outcome);

        tracing::debug!("game result recorded: {:?} - {:?}", mode, result);
    }

    /// 取消进行中的 AI 思考并使旧回执失效
    fn cancel_ai_thinking(&mut self) {
        if self.ai_thinking {
            tracing::debug!("cancelling pending AI think delay");
        }
        self.ai_thinking = false;
        self.version = self.version.wrapping_add(1);
    }

    /// 切换状态机状态
    fn change_state(&mut self, new_state: GameState) {
        if self.state == new_state {
            return;
        }

        let old_state = self.state;
        self.state = new_state;

        tracing::debug!("state: {:?} -> {:?}", old_state, new_state);

        self.emit(GameEvent::StateChanged { state: new_state });
    }

    /// 推送事件给所有订阅者，清理已关闭的通道
    fn emit(&mut self, event: GameEvent) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// 记录每次调用的测试用战绩记录器
    #[derive(Clone, Default)]
    struct RecordingStats {
        calls: Arc<Mutex<Vec<(GameMode, Option<Difficulty>, MatchOutcome)>>>,
    }

    impl StatsRecorder for RecordingStats {
        fn record_match_result(
            &mut self,
            mode: GameMode,
            difficulty: Option<Difficulty>,
            outcome: MatchOutcome,
        ) {
            self.calls.lock().unwrap().push((mode, difficulty, outcome));
        }

        fn read_statistics(&self) -> tictactoe_core::Statistics {
            tictactoe_core::Statistics::new()
        }
    }

    /// 总是返回同一个格子的测试策略
    struct FixedAi(usize);

    impl AiPlayer for FixedAi {
        fn difficulty(&self) -> Difficulty {
            Difficulty::Easy
        }

        fn choose_move(&mut self, _board: &Board, _ai_symbol: CellState) -> Option<usize> {
            Some(self.0)
        }
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// AI 回合立即走完（跳过思考延迟）
    fn step_ai(controller: &mut GameController) -> bool {
        let ticket = controller.begin_ai_think().expect("AI turn must be pending");
        controller.complete_ai_move(ticket)
    }

    #[test]
    fn test_initial_state() {
        let controller = GameController::new();
        assert_eq!(controller.state(), GameState::MainMenu);
        assert_eq!(controller.mode(), None);
        assert_eq!(controller.last_result(), GameResult::None);
    }

    #[test]
    fn test_menu_navigation() {
        let mut controller = GameController::new();

        controller.go_to_difficulty_select();
        assert_eq!(controller.state(), GameState::DifficultySelect);

        controller.go_to_lobby();
        assert_eq!(controller.state(), GameState::Lobby);

        controller.quit_to_menu();
        assert_eq!(controller.state(), GameState::MainMenu);
    }

    #[test]
    fn test_move_rejected_outside_playing() {
        let mut controller = GameController::new();
        assert!(!controller.make_move(0));

        controller.start_local_multiplayer();
        controller.pause();
        assert!(!controller.make_move(0));

        controller.resume();
        assert!(controller.make_move(0));
    }

    #[test]
    fn test_local_multiplayer_turns_alternate() {
        let mut controller = GameController::new();
        controller.start_local_multiplayer();

        assert_eq!(controller.current_turn(), CellState::X);
        assert!(controller.make_move(0));
        assert_eq!(controller.current_turn(), CellState::O);
        assert!(controller.make_move(4));
        assert_eq!(controller.current_turn(), CellState::X);

        // 已占用的格子被拒绝，回合不变
        assert!(!controller.make_move(0));
        assert_eq!(controller.current_turn(), CellState::X);
    }

    #[test]
    fn test_move_rejected_on_ai_turn_and_while_thinking() {
        let mut controller = GameController::new();
        // 玩家执 O，AI（X）先手
        controller.start_game_vs_ai(Difficulty::Hard, false);

        assert!(controller.ai_turn_pending());
        assert!(!controller.make_move(0));

        let ticket = controller.begin_ai_think().unwrap();
        assert!(controller.is_ai_thinking());
        assert!(!controller.make_move(0));

        assert!(controller.complete_ai_move(ticket));
        // AI（Hard）首手必走中心，随后轮到玩家
        assert_eq!(controller.board().get_cell(4), CellState::X);
        assert!(controller.make_move(0));
    }

    #[test]
    fn test_vs_ai_full_flow_events() {
        let mut controller = GameController::new();
        let mut rx = controller.subscribe();

        controller.start_game_vs_ai(Difficulty::Hard, true);
        let events = drain(&mut rx);
        assert!(events.contains(&GameEvent::StateChanged {
            state: GameState::Playing
        }));
        assert!(events.contains(&GameEvent::TurnChanged {
            symbol: CellState::X
        }));

        assert!(controller.make_move(0));
        let events = drain(&mut rx);
        assert_eq!(
            events[0],
            GameEvent::MoveMade {
                index: 0,
                symbol: CellState::X
            }
        );
        assert_eq!(
            events[1],
            GameEvent::TurnChanged {
                symbol: CellState::O
            }
        );

        assert!(step_ai(&mut controller));
        let events = drain(&mut rx);
        assert!(matches!(
            events[0],
            GameEvent::MoveMade {
                symbol: CellState::O,
                ..
            }
        ));
    }

    #[test]
    fn test_game_over_records_result_once() {
        let mut controller = GameController::new();
        let stats = RecordingStats::default();
        controller.set_stats_recorder(Box::new(stats.clone()));

        controller.start_local_multiplayer();
        // X: 0,1,2 获胜
        for index in [0, 3, 1, 4, 2] {
            assert!(controller.make_move(index));
        }

        assert_eq!(controller.state(), GameState::GameOver);
        assert_eq!(controller.last_result(), GameResult::XWins);
        assert_eq!(controller.winning_line(), Some([0, 1, 2]));

        // 终局后不再接受落子
        assert!(!controller.make_move(5));

        let calls = stats.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![(GameMode::LocalMultiplayer, None, MatchOutcome::Win)]
        );
    }

    #[test]
    fn test_vs_ai_loss_recorded_from_player_view() {
        let mut controller = GameController::new();
        let stats = RecordingStats::default();
        controller.set_stats_recorder(Box::new(stats.clone()));

        // 玩家执 X，给 AI 注入固定策略以走出必胜局面
        controller.start_game_vs_ai(Difficulty::Easy, true);
        controller.ai_player = Some(Box::new(FixedAi(0)));

        // X: 8, O: 0, X: 7, O: 1, X: 5, O: 2 → O 获胜
        let script = [(8, None), (7, Some(1)), (5, Some(2))];
        for (human, ai_override) in script {
            assert!(controller.make_move(human));
            if controller.state() == GameState::GameOver {
                break;
            }
            if let Some(index) = ai_override {
                controller.ai_player = Some(Box::new(FixedAi(index)));
            }
            assert!(step_ai(&mut controller));
        }

        assert_eq!(controller.last_result(), GameResult::OWins);
        let calls = stats.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![(
                GameMode::VsAi,
                Some(Difficulty::Easy),
                MatchOutcome::Loss
            )]
        );
    }

    #[test]
    fn test_restart_resets_board_and_invalidates_tickets() {
        let mut controller = GameController::new();
        controller.start_game_vs_ai(Difficulty::Hard, true);

        assert!(controller.make_move(0));
        let ticket = controller.begin_ai_think().unwrap();

        controller.restart();
        assert_eq!(controller.state(), GameState::Playing);
        assert_eq!(controller.board().move_count(), 0);
        assert_eq!(controller.current_turn(), CellState::X);

        // 旧回执在重开后必须失效
        assert!(!controller.complete_ai_move(ticket));
        assert_eq!(controller.board().move_count(), 0);
    }

    #[test]
    fn test_pause_cancels_thinking_and_resume_leaves_turn_pending() {
        let mut controller = GameController::new();
        controller.start_game_vs_ai(Difficulty::Hard, false);

        let ticket = controller.begin_ai_think().unwrap();
        controller.pause();
        assert_eq!(controller.state(), GameState::Paused);
        assert!(!controller.is_ai_thinking());

        // 暂停期间到达的过期回执被丢弃
        assert!(!controller.complete_ai_move(ticket));
        assert_eq!(controller.board().move_count(), 0);

        controller.resume();
        assert_eq!(controller.state(), GameState::Playing);
        // AI 回合重新等待调度
        assert!(controller.ai_turn_pending());
        assert!(step_ai(&mut controller));
        assert_eq!(controller.board().move_count(), 1);
    }

    #[test]
    fn test_quit_to_menu_cancels_thinking() {
        let mut controller = GameController::new();
        controller.start_game_vs_ai(Difficulty::Easy, false);

        let ticket = controller.begin_ai_think().unwrap();
        controller.quit_to_menu();

        assert_eq!(controller.state(), GameState::MainMenu);
        assert!(!controller.is_ai_thinking());
        assert!(!controller.complete_ai_move(ticket));
    }

    #[test]
    fn test_illegal_ai_move_does_not_advance_turn() {
        let mut controller = GameController::new();
        controller.start_game_vs_ai(Difficulty::Easy, true);

        assert!(controller.make_move(0));
        // 注入返回已占用格子的故障策略
        controller.ai_player = Some(Box::new(FixedAi(0)));

        let ticket = controller.begin_ai_think().unwrap();
        assert!(!controller.complete_ai_move(ticket));

        // 回合未被推进，棋盘未被破坏
        assert_eq!(controller.current_turn(), CellState::O);
        assert_eq!(controller.board().move_count(), 1);
    }

    #[test]
    fn test_network_multiplayer_is_stub() {
        let mut controller = GameController::new();
        controller.start_network_multiplayer(true);

        assert_eq!(controller.state(), GameState::WaitingForPlayer);
        assert_eq!(controller.mode(), Some(GameMode::NetworkMultiplayer));
        assert!(!controller.make_move(0));
    }

    #[test]
    fn test_ai_moves_first_when_player_is_o() {
        let mut controller = GameController::new();
        controller.start_game_vs_ai(Difficulty::Hard, false);

        assert!(controller.ai_turn_pending());
        assert!(step_ai(&mut controller));
        // Hard 先手必走中心
        assert_eq!(controller.board().get_cell(4), CellState::X);
        assert_eq!(controller.current_turn(), CellState::O);
        assert!(!controller.ai_turn_pending());
    }

    #[test]
    fn test_draw_recorded() {
        let mut controller = GameController::new();
        let stats = RecordingStats::default();
        controller.set_stats_recorder(Box::new(stats.clone()));

        controller.start_local_multiplayer();
        // X:{0,2,3,7,8} O:{1,4,5,6}，棋盘满且无完成线 ⇒ 平局
        for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            assert!(controller.make_move(index));
        }

        assert_eq!(controller.last_result(), GameResult::Draw);
        let calls = stats.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![(GameMode::LocalMultiplayer, None, MatchOutcome::Draw)]
        );
    }
}
