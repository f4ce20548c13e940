//! 对局会话
//!
//! 包装控制器并提供 AI 思考延迟的调度与取消。
//! 延迟任务只负责在随机的 300-800ms 后送回思考回执，
//! 落子仍由控制器在当前任务里执行，单线程协作模型不变。

use std::time::Duration;

use rand::Rng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use tictactoe_core::{Difficulty, THINK_DELAY_MAX_MS, THINK_DELAY_MIN_MS};

use crate::controller::{GameController, ThinkTicket};

/// 对局会话：控制器 + AI 思考延迟调度
pub struct GameSession {
    controller: GameController,
    ticket_tx: mpsc::UnboundedSender<ThinkTicket>,
    ticket_rx: mpsc::UnboundedReceiver<ThinkTicket>,
    /// 进行中延迟任务的取消句柄
    think_task: Option<JoinHandle<()>>,
}

impl GameSession {
    /// 用现有控制器创建会话
    pub fn new(controller: GameController) -> Self {
        let (ticket_tx, ticket_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            ticket_tx,
            ticket_rx,
            think_task: None,
        }
    }

    /// 访问控制器
    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// 可变访问控制器
    pub fn controller_mut(&mut self) -> &mut GameController {
        &mut self.controller
    }

    // ========== 委托给控制器的操作 ==========

    /// 开始人机对战
    pub fn start_game_vs_ai(&mut self, difficulty: Difficulty, player_is_x: bool) {
        self.cancel_think_task();
        self.controller.start_game_vs_ai(difficulty, player_is_x);
        self.schedule_ai_turn();
    }

    /// 开始本地双人对战
    pub fn start_local_multiplayer(&mut self) {
        self.cancel_think_task();
        self.controller.start_local_multiplayer();
    }

    /// 开始网络对战（未实现，仅进入等待状态）
    pub fn start_network_multiplayer(&mut self, is_host: bool) {
        self.cancel_think_task();
        self.controller.start_network_multiplayer(is_host);
    }

    /// 人类落子；落子后若轮到 AI 则调度思考延迟
    pub fn make_move(&mut self, index: usize) -> bool {
        let accepted = self.controller.make_move(index);
        self.schedule_ai_turn();
        accepted
    }

    /// 重开一局
    pub fn restart(&mut self) {
        self.cancel_think_task();
        self.controller.restart();
        self.schedule_ai_turn();
    }

    /// 暂停
    pub fn pause(&mut self) {
        self.cancel_think_task();
        self.controller.pause();
    }

    /// 恢复；若暂停打断了 AI 回合则重新调度
    pub fn resume(&mut self) {
        self.controller.resume();
        self.schedule_ai_turn();
    }

    /// 退出到主菜单
    pub fn quit_to_menu(&mut self) {
        self.cancel_think_task();
        self.controller.quit_to_menu();
    }

    // ========== AI 调度 ==========

    /// 处理到期的思考回执，直到没有挂起的 AI 思考
    ///
    /// 过期回执被控制器丢弃后继续等待新的回执。
    pub async fn run_until_idle(&mut self) {
        while self.controller.is_ai_thinking() {
            let Some(ticket) = self.ticket_rx.recv().await else {
                break;
            };
            self.controller.complete_ai_move(ticket);
            self.schedule_ai_turn();
        }
    }

    /// 若有待调度的 AI 回合，启动一次思考延迟任务
    fn schedule_ai_turn(&mut self) {
        let Some(ticket) = self.controller.begin_ai_think() else {
            return;
        };

        let delay_ms = rand::thread_rng().gen_range(THINK_DELAY_MIN_MS..=THINK_DELAY_MAX_MS);
        let tx = self.ticket_tx.clone();

        tracing::debug!("scheduling AI think delay: {}ms", delay_ms);
        self.think_task = Some(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            let _ = tx.send(ticket);
        }));
    }

    /// 取消进行中的思考延迟任务
    ///
    /// 已经送出的回执由控制器的版本校验兜底。
    fn cancel_think_task(&mut self) {
        if let Some(task) = self.think_task.take() {
            task.abort();
        }
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.cancel_think_task();
    }
}
