//! 回合計時器
//!
//! 每個回合擁有自己的時鐘與延遲任務；回合被取代、玩家離開遊戲畫面
//! 或 session 關閉時一併中止。

use tokio::task::JoinHandle;

#[derive(Debug, Default)]
pub struct RoundTimers {
    round_id: u64,
    clock: Option<JoinHandle<()>>,
    deferred: Vec<JoinHandle<()>>,
}

impl RoundTimers {
    pub fn new(round_id: u64) -> Self {
        Self {
            round_id,
            clock: None,
            deferred: Vec::new(),
        }
    }

    pub fn round_id(&self) -> u64 {
        self.round_id
    }

    pub fn set_clock(&mut self, handle: JoinHandle<()>) {
        if let Some(old) = self.clock.replace(handle) {
            old.abort();
        }
    }

    /// 追蹤一個延遲任務（settle / 結算）
    pub fn track(&mut self, handle: JoinHandle<()>) {
        self.deferred.retain(|h| !h.is_finished());
        self.deferred.push(handle);
    }

    /// 仍在執行的任務數
    pub fn live_count(&self) -> usize {
        self.clock.iter().chain(self.deferred.iter()).filter(|h| !h.is_finished()).count()
    }

    pub fn cancel(&mut self) {
        if let Some(clock) = self.clock.take() {
            clock.abort();
        }
        for handle in self.deferred.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for RoundTimers {
    fn drop(&mut self) {
        self.cancel();
    }
}
