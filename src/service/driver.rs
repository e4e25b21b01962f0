//! 回合驅動
//!
//! 以 tokio 任務推動回合：每秒計時、配對後的動畫停留、完成後的結算延遲。
//! 所有任務只持有 session 的 `Weak`，並以回合 id 檢查自己是否已過期。
//! 鎖不會跨越 `.await`。

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, Instant};

use super::session::SessionState;
use super::view::{result_view, round_view_from_state, session_view_from_state};
use crate::config::TimingConfig;
use crate::error::FoodRushError;
use crate::game::{RoundPhase, SelectOutcome};
use crate::proto::session_event::Event;
use crate::proto::SessionEvent;

/// 一個 session 的共享狀態與事件頻道
pub struct SessionCell {
    id: u64,
    state: Mutex<SessionState>,
    events: broadcast::Sender<SessionEvent>,
    last_active: Mutex<Instant>,
}

impl SessionCell {
    pub fn new(state: SessionState, event_capacity: usize) -> Arc<Self> {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        Arc::new(Self {
            id: state.id,
            state: Mutex::new(state),
            events,
            last_active: Mutex::new(Instant::now()),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, SessionState>, FoodRushError> {
        self.state.lock().map_err(|_| FoodRushError::LockPoisoned)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn watcher_count(&self) -> usize {
        self.events.receiver_count()
    }

    /// 記錄一次客戶端存取
    pub fn touch(&self) {
        if let Ok(mut last) = self.last_active.lock() {
            *last = Instant::now();
        }
    }

    pub fn idle_for(&self) -> Duration {
        self.last_active
            .lock()
            .map(|last| last.elapsed())
            .unwrap_or_default()
    }

    /// 沒有觀看者且閒置超過 `limit`
    pub fn is_stale(&self, limit: Duration) -> bool {
        self.watcher_count() == 0 && self.idle_for() >= limit
    }

    /// 發佈事件；沒有訂閱者時直接丟棄
    pub fn publish(&self, event: Event) {
        let _ = self.events.send(SessionEvent {
            session_id: self.id,
            event: Some(event),
        });
    }
}

/// 回合開始後啟動每秒時鐘
pub fn arm_clock(cell: &Arc<SessionCell>, state: &mut SessionState, round_id: u64, tick: Duration) {
    let weak = Arc::downgrade(cell);
    let handle = tokio::spawn(async move {
        let mut interval = time::interval_at(Instant::now() + tick, tick);
        loop {
            interval.tick().await;
            let Some(cell) = weak.upgrade() else { break };
            let view = {
                let Ok(mut state) = cell.lock() else {
                    log::warn!("session {} lock poisoned, stopping clock", cell.id());
                    break;
                };
                match state.round_mut(round_id) {
                    Some(round) => {
                        if !round.tick() {
                            break;
                        }
                        round_view_from_state(round)
                    }
                    None => break,
                }
            };
            cell.publish(Event::ClockTick(view));
        }
    });
    state.timers.set_clock(handle);
}

/// 選牌後依結果排程結算；延遲為 0 時立即結算
pub fn schedule_settle(
    cell: &Arc<SessionCell>,
    state: &mut SessionState,
    round_id: u64,
    outcome: &SelectOutcome,
    timing: &TimingConfig,
) {
    let delay = match outcome {
        SelectOutcome::Matched { .. } => timing.match_settle(),
        SelectOutcome::Mismatched => timing.mismatch_settle(),
        _ => return,
    };

    if delay.is_zero() {
        settle_now(cell, state, round_id, timing);
        return;
    }

    let weak = Arc::downgrade(cell);
    let timing = timing.clone();
    let handle = tokio::spawn(async move {
        time::sleep(delay).await;
        let Some(cell) = weak.upgrade() else { return };
        let Ok(mut state) = cell.lock() else {
            log::warn!("session {} lock poisoned, dropping settle", cell.id());
            return;
        };
        settle_now(&cell, &mut state, round_id, &timing);
    });
    state.timers.track(handle);
}

fn settle_now(
    cell: &Arc<SessionCell>,
    state: &mut SessionState,
    round_id: u64,
    timing: &TimingConfig,
) {
    let Some(round) = state.round_mut(round_id) else { return };
    if round.settle().is_none() {
        return;
    }
    let completing = round.phase == RoundPhase::Completing;
    cell.publish(Event::PairSettled(round_view_from_state(round)));

    if completing {
        schedule_completion(cell, state, round_id, timing.completion_delay());
    }
}

fn schedule_completion(
    cell: &Arc<SessionCell>,
    state: &mut SessionState,
    round_id: u64,
    delay: Duration,
) {
    if delay.is_zero() {
        finish_now(cell, state, round_id);
        return;
    }

    let weak = Arc::downgrade(cell);
    let handle = tokio::spawn(async move {
        time::sleep(delay).await;
        let Some(cell) = weak.upgrade() else { return };
        let Ok(mut state) = cell.lock() else {
            log::warn!("session {} lock poisoned, dropping completion", cell.id());
            return;
        };
        finish_now(&cell, &mut state, round_id);
    });
    state.timers.track(handle);
}

fn finish_now(cell: &Arc<SessionCell>, state: &mut SessionState, round_id: u64) {
    let Some(result) = state.complete_round(round_id) else { return };
    log::info!(
        "session {} finished round {}: score {} in {}s",
        state.id,
        round_id,
        result.score,
        result.elapsed_seconds
    );
    cell.publish(Event::RoundComplete(result_view(&result)));
    cell.publish(Event::ScreenChanged(session_view_from_state(state)));
}
