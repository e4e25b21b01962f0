//! gRPC 服務
//!
//! Session 存活到 `CloseSession` 為止；客戶端未關閉就離線時，
//! 無人觀看且閒置超過 `session_idle_secs` 的 session 會在下一次
//! `CreateSession` 時被回收。

use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tonic::{Request, Response, Status};

use super::driver::{arm_clock, schedule_settle, SessionCell};
use super::session::{Screen, SessionState};
use super::view::{
    leaderboard_response, rewards_response, round_view_from_state, select_response,
    session_view_from_state,
};
use crate::config::ServerConfig;
use crate::error::FoodRushError;
use crate::game::Difficulty;
use crate::proto::food_rush_server::FoodRush;
use crate::proto::session_event::Event;
use crate::proto::{
    CloseSessionResponse, CreateSessionRequest, LeaderboardRequest, LeaderboardResponse,
    NavigateRequest, RewardsResponse, RoundView, SelectTokenRequest, SelectTokenResponse,
    SessionEvent, SessionRequest, SessionView, StartRoundRequest,
};

pub struct FoodRushService {
    sessions: DashMap<u64, Arc<SessionCell>>,
    next_session_id: AtomicU64,
    config: ServerConfig,
}

impl Default for FoodRushService {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

impl FoodRushService {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            next_session_id: AtomicU64::new(1),
            config,
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn session(&self, session_id: u64) -> Result<Arc<SessionCell>, FoodRushError> {
        let cell = self
            .sessions
            .get(&session_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(FoodRushError::UnknownSession(session_id))?;
        cell.touch();
        Ok(cell)
    }

    /// 回收無人觀看且閒置過久的 session，回傳回收數量
    pub fn evict_idle(&self) -> usize {
        let Some(limit) = self.config.session_idle() else {
            return 0;
        };
        let stale: Vec<u64> = self
            .sessions
            .iter()
            .filter(|entry| entry.value().is_stale(limit))
            .map(|entry| *entry.key())
            .collect();

        let mut evicted = 0;
        for session_id in stale {
            let removed = self
                .sessions
                .remove_if(&session_id, |_, cell| cell.is_stale(limit));
            let Some((_, cell)) = removed else {
                continue;
            };
            match cell.lock() {
                Ok(mut state) => state.teardown(),
                Err(err) => log::warn!("session {} evicted with {}", session_id, err),
            }
            log::info!("session {} evicted after {:?} idle", session_id, cell.idle_for());
            evicted += 1;
        }
        evicted
    }

    pub fn create_session(&self, seed: Option<u64>) -> SessionView {
        self.evict_idle();

        let id = self.next_session_id.fetch_add(1, Ordering::Relaxed);
        let seed = seed.or(self.config.seed).unwrap_or_else(rand::random);
        let state =
            SessionState::new(id, seed, &self.config.player, self.config.default_difficulty);
        let view = session_view_from_state(&state);

        self.sessions.insert(id, SessionCell::new(state, self.config.event_capacity));
        log::info!("session {} created", id);
        view
    }

    pub fn close_session(&self, session_id: u64) -> Result<bool, FoodRushError> {
        let Some((_, cell)) = self.sessions.remove(&session_id) else {
            return Ok(false);
        };
        cell.lock()?.teardown();
        log::info!("session {} closed", session_id);
        Ok(true)
    }

    pub fn session_view(&self, session_id: u64) -> Result<SessionView, FoodRushError> {
        let cell = self.session(session_id)?;
        let state = cell.lock()?;
        Ok(session_view_from_state(&state))
    }

    pub fn start_round(
        &self,
        session_id: u64,
        difficulty: Difficulty,
    ) -> Result<RoundView, FoodRushError> {
        let cell = self.session(session_id)?;
        let mut state = cell.lock()?;
        let round_id = state.start_round(difficulty).id;
        self.after_round_start(&cell, &mut state, round_id)
    }

    pub fn play_again(&self, session_id: u64) -> Result<RoundView, FoodRushError> {
        let cell = self.session(session_id)?;
        let mut state = cell.lock()?;
        let round_id = state.play_again().id;
        self.after_round_start(&cell, &mut state, round_id)
    }

    fn after_round_start(
        &self,
        cell: &Arc<SessionCell>,
        state: &mut SessionState,
        round_id: u64,
    ) -> Result<RoundView, FoodRushError> {
        arm_clock(cell, state, round_id, self.config.timing.tick());
        log::info!(
            "session {} started round {} ({})",
            state.id,
            round_id,
            state.difficulty.label()
        );
        cell.publish(Event::ScreenChanged(session_view_from_state(state)));

        let round = state.round_mut(round_id).ok_or(FoodRushError::NoRound)?;
        Ok(round_view_from_state(round))
    }

    pub fn navigate(&self, session_id: u64, screen: Screen) -> Result<SessionView, FoodRushError> {
        let cell = self.session(session_id)?;
        let mut state = cell.lock()?;
        match state.navigate(screen) {
            Some(round_id) => {
                self.after_round_start(&cell, &mut state, round_id)?;
            }
            None => cell.publish(Event::ScreenChanged(session_view_from_state(&state))),
        }
        Ok(session_view_from_state(&state))
    }

    pub fn select_token(
        &self,
        session_id: u64,
        position: usize,
    ) -> Result<SelectTokenResponse, FoodRushError> {
        let cell = self.session(session_id)?;
        let mut state = cell.lock()?;
        let round_id = state.round.as_ref().map(|r| r.id).ok_or(FoodRushError::NoRound)?;

        let round = state.round_mut(round_id).ok_or(FoodRushError::NoRound)?;
        let outcome = round.select_token(position);
        log::debug!(
            "session {} round {} select {}: {:?}",
            session_id,
            round_id,
            position,
            outcome
        );

        schedule_settle(&cell, &mut state, round_id, &outcome, &self.config.timing);

        let round = state.round_mut(round_id).ok_or(FoodRushError::NoRound)?;
        Ok(select_response(&outcome, round))
    }

    pub fn current_round(&self, session_id: u64) -> Result<RoundView, FoodRushError> {
        let cell = self.session(session_id)?;
        let state = cell.lock()?;
        state
            .round
            .as_ref()
            .map(round_view_from_state)
            .ok_or(FoodRushError::NoRound)
    }

    pub fn rewards(&self, session_id: u64) -> Result<RewardsResponse, FoodRushError> {
        let cell = self.session(session_id)?;
        let state = cell.lock()?;
        Ok(rewards_response(state.reward_points, state.stats.is_vip))
    }

    pub fn subscribe(
        &self,
        session_id: u64,
    ) -> Result<broadcast::Receiver<SessionEvent>, FoodRushError> {
        Ok(self.session(session_id)?.subscribe())
    }

    #[cfg(test)]
    pub(crate) fn with_session<T>(
        &self,
        session_id: u64,
        f: impl FnOnce(&mut SessionState) -> T,
    ) -> Result<T, FoodRushError> {
        let cell = self.session(session_id)?;
        let mut state = cell.lock()?;
        Ok(f(&mut state))
    }
}

fn difficulty_from_code(code: i32) -> Result<Difficulty, FoodRushError> {
    Difficulty::from_int(code).ok_or(FoodRushError::InvalidDifficulty(code))
}

fn screen_from_code(code: i32) -> Result<Screen, FoodRushError> {
    Screen::from_int(code).ok_or(FoodRushError::InvalidScreen(code))
}

#[tonic::async_trait]
impl FoodRush for FoodRushService {
    async fn create_session(
        &self,
        request: Request<CreateSessionRequest>,
    ) -> Result<Response<SessionView>, Status> {
        let seed = request.into_inner().seed;
        Ok(Response::new(FoodRushService::create_session(self, seed)))
    }

    async fn get_session(
        &self,
        request: Request<SessionRequest>,
    ) -> Result<Response<SessionView>, Status> {
        let session_id = request.into_inner().session_id;
        Ok(Response::new(self.session_view(session_id)?))
    }

    async fn close_session(
        &self,
        request: Request<SessionRequest>,
    ) -> Result<Response<CloseSessionResponse>, Status> {
        let session_id = request.into_inner().session_id;
        let closed = FoodRushService::close_session(self, session_id)?;
        Ok(Response::new(CloseSessionResponse { closed }))
    }

    async fn navigate(
        &self,
        request: Request<NavigateRequest>,
    ) -> Result<Response<SessionView>, Status> {
        let NavigateRequest { session_id, screen } = request.into_inner();
        let screen = screen_from_code(screen)?;
        Ok(Response::new(FoodRushService::navigate(self, session_id, screen)?))
    }

    async fn start_round(
        &self,
        request: Request<StartRoundRequest>,
    ) -> Result<Response<RoundView>, Status> {
        let StartRoundRequest {
            session_id,
            difficulty,
        } = request.into_inner();
        let difficulty = difficulty_from_code(difficulty)?;
        Ok(Response::new(FoodRushService::start_round(self, session_id, difficulty)?))
    }

    async fn play_again(
        &self,
        request: Request<SessionRequest>,
    ) -> Result<Response<RoundView>, Status> {
        let session_id = request.into_inner().session_id;
        Ok(Response::new(FoodRushService::play_again(self, session_id)?))
    }

    async fn select_token(
        &self,
        request: Request<SelectTokenRequest>,
    ) -> Result<Response<SelectTokenResponse>, Status> {
        let SelectTokenRequest {
            session_id,
            position,
        } = request.into_inner();
        Ok(Response::new(FoodRushService::select_token(
            self,
            session_id,
            position as usize,
        )?))
    }

    async fn get_round(
        &self,
        request: Request<SessionRequest>,
    ) -> Result<Response<RoundView>, Status> {
        let session_id = request.into_inner().session_id;
        Ok(Response::new(self.current_round(session_id)?))
    }

    type WatchSessionStream =
        Pin<Box<dyn Stream<Item = Result<SessionEvent, Status>> + Send + 'static>>;

    async fn watch_session(
        &self,
        request: Request<SessionRequest>,
    ) -> Result<Response<Self::WatchSessionStream>, Status> {
        let session_id = request.into_inner().session_id;
        let receiver = self.subscribe(session_id)?;

        let stream = BroadcastStream::new(receiver).filter_map(move |item| match item {
            Ok(event) => Some(Ok(event)),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                log::warn!("session {} watcher lagged, skipped {} events", session_id, skipped);
                None
            }
        });
        Ok(Response::new(Box::pin(stream)))
    }

    async fn get_leaderboard(
        &self,
        _request: Request<LeaderboardRequest>,
    ) -> Result<Response<LeaderboardResponse>, Status> {
        Ok(Response::new(leaderboard_response()))
    }

    async fn list_rewards(
        &self,
        request: Request<SessionRequest>,
    ) -> Result<Response<RewardsResponse>, Status> {
        let session_id = request.into_inner().session_id;
        Ok(Response::new(self.rewards(session_id)?))
    }
}
