//! Session 狀態管理
//!
//! 一個 session 對應一位玩家：目前畫面、玩家統計、進行中的回合與其計時器。

use rand::{rngs::StdRng, SeedableRng};

use super::timers::RoundTimers;
use crate::config::PlayerProfile;
use crate::game::{
    points_earned, Difficulty, RoundResult, RoundState, SCREEN_GAME, SCREEN_HOME,
    SCREEN_LEADERBOARD, SCREEN_REWARDS,
};

/// 畫面
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Game,
    Leaderboard,
    Rewards,
}

impl Screen {
    pub fn to_int(&self) -> i32 {
        match self {
            Screen::Home => SCREEN_HOME,
            Screen::Game => SCREEN_GAME,
            Screen::Leaderboard => SCREEN_LEADERBOARD,
            Screen::Rewards => SCREEN_REWARDS,
        }
    }

    pub fn from_int(value: i32) -> Option<Screen> {
        match value {
            SCREEN_HOME => Some(Screen::Home),
            SCREEN_GAME => Some(Screen::Game),
            SCREEN_LEADERBOARD => Some(Screen::Leaderboard),
            SCREEN_REWARDS => Some(Screen::Rewards),
            _ => None,
        }
    }
}

/// 玩家統計
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerStats {
    pub total_score: i64,
    pub games_played: u32,
    pub high_score: i64,
    pub is_vip: bool,
}

impl PlayerStats {
    pub fn from_profile(profile: &PlayerProfile) -> Self {
        Self {
            total_score: profile.total_score,
            games_played: profile.games_played,
            high_score: profile.high_score,
            is_vip: profile.is_vip,
        }
    }

    fn record(&mut self, score: i64) {
        self.total_score += points_earned(score);
        self.games_played += 1;
        self.high_score = self.high_score.max(score);
    }
}

/// Session 狀態
pub struct SessionState {
    pub id: u64,
    pub rng: StdRng,
    pub screen: Screen,
    pub difficulty: Difficulty,
    pub stats: PlayerStats,
    pub reward_points: i64,

    // 回合
    pub round: Option<RoundState>,
    pub timers: RoundTimers,
    round_seq: u64,

    // 結算畫面
    pub last_result: Option<RoundResult>,
    pub show_complete: bool,
}

impl SessionState {
    pub fn new(id: u64, seed: u64, profile: &PlayerProfile, difficulty: Difficulty) -> Self {
        Self {
            id,
            rng: StdRng::seed_from_u64(seed),
            screen: Screen::Home,
            difficulty,
            stats: PlayerStats::from_profile(profile),
            reward_points: profile.reward_points,
            round: None,
            timers: RoundTimers::default(),
            round_seq: 0,
            last_result: None,
            show_complete: false,
        }
    }

    /// 開始新回合並切到遊戲畫面；舊回合的計時器一併取消
    pub fn start_round(&mut self, difficulty: Difficulty) -> &RoundState {
        self.abandon_round();

        self.round_seq += 1;
        self.difficulty = difficulty;
        self.screen = Screen::Game;
        self.show_complete = false;
        self.timers = RoundTimers::new(self.round_seq);

        self.round.insert(RoundState::new(self.round_seq, difficulty, &mut self.rng))
    }

    /// 以相同難度再玩一次
    pub fn play_again(&mut self) -> &RoundState {
        self.start_round(self.difficulty)
    }

    /// 切換畫面；進入遊戲畫面會開新回合，離開則放棄進行中的回合。
    /// 有新回合時回傳其 id。
    pub fn navigate(&mut self, screen: Screen) -> Option<u64> {
        if screen == Screen::Game {
            return Some(self.start_round(self.difficulty).id);
        }
        if self.screen == Screen::Game {
            self.abandon_round();
        }
        self.show_complete = false;
        self.screen = screen;
        None
    }

    /// 結算畫面的「回首頁」
    pub fn back_home(&mut self) {
        self.navigate(Screen::Home);
    }

    /// 目前回合（id 必須相符，避免過期計時器改到新回合）
    pub fn round_mut(&mut self, round_id: u64) -> Option<&mut RoundState> {
        self.round.as_mut().filter(|r| r.id == round_id)
    }

    /// 回合完成回呼：更新統計並顯示結算畫面
    pub fn record_round_result(&mut self, score: i64, elapsed_seconds: u32) -> PlayerStats {
        self.stats.record(score);
        self.last_result = Some(RoundResult {
            difficulty: self.difficulty,
            score,
            elapsed_seconds,
        });
        self.show_complete = true;
        self.stats
    }

    /// 結束指定回合並記錄結果；只有第一次呼叫會回傳 Some
    pub fn complete_round(&mut self, round_id: u64) -> Option<RoundResult> {
        let result = self.round_mut(round_id)?.finish()?;
        self.record_round_result(result.score, result.elapsed_seconds);
        Some(result)
    }

    fn abandon_round(&mut self) {
        self.timers.cancel();
        if let Some(round) = self.round.as_mut() {
            if round.abandon() {
                log::info!("session {} abandoned round {}", self.id, round.id);
            }
        }
    }

    /// 關閉 session 前的清理
    pub fn teardown(&mut self) {
        self.abandon_round();
        self.round = None;
    }
}
