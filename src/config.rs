//! 伺服器設定
//!
//! 從 `FOOD_RUSH_CONFIG` 指定的 JSON 檔讀取，所有欄位皆有預設值；
//! `FOOD_RUSH_ADDR` 可覆寫監聽位址。

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::FoodRushError;
use crate::game::{
    Difficulty, CLOCK_TICK_MS, COMPLETION_DELAY_MS, DEFAULT_GAMES_PLAYED, DEFAULT_HIGH_SCORE,
    DEFAULT_IS_VIP, DEFAULT_REWARD_POINTS, DEFAULT_TOTAL_SCORE, MATCH_SETTLE_MS,
    MISMATCH_SETTLE_MS,
};

pub const CONFIG_PATH_ENV: &str = "FOOD_RUSH_CONFIG";
pub const ADDR_ENV: &str = "FOOD_RUSH_ADDR";
pub const DEFAULT_ADDR: &str = "127.0.0.1:50051";
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 30 * 60;

/// 動畫與計時設定（毫秒，0 表示立即）
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub tick_ms: u64,
    pub match_settle_ms: u64,
    pub mismatch_settle_ms: u64,
    pub completion_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_ms: CLOCK_TICK_MS,
            match_settle_ms: MATCH_SETTLE_MS,
            mismatch_settle_ms: MISMATCH_SETTLE_MS,
            completion_delay_ms: COMPLETION_DELAY_MS,
        }
    }
}

impl TimingConfig {
    /// 無動畫：配對與結算都立即完成
    pub fn instant() -> Self {
        Self {
            match_settle_ms: 0,
            mismatch_settle_ms: 0,
            completion_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn match_settle(&self) -> Duration {
        Duration::from_millis(self.match_settle_ms)
    }

    pub fn mismatch_settle(&self) -> Duration {
        Duration::from_millis(self.mismatch_settle_ms)
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }
}

/// 新 session 的玩家初始資料
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlayerProfile {
    pub total_score: i64,
    pub games_played: u32,
    pub high_score: i64,
    pub is_vip: bool,
    pub reward_points: i64,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            total_score: DEFAULT_TOTAL_SCORE,
            games_played: DEFAULT_GAMES_PLAYED,
            high_score: DEFAULT_HIGH_SCORE,
            is_vip: DEFAULT_IS_VIP,
            reward_points: DEFAULT_REWARD_POINTS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    pub timing: TimingConfig,
    pub player: PlayerProfile,
    pub default_difficulty: Difficulty,
    pub event_capacity: usize,
    /// 固定種子（測試用）；未設定時每個 session 隨機
    pub seed: Option<u64>,
    /// 無人觀看且閒置超過此秒數的 session 會被回收；0 表示永不回收
    pub session_idle_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            timing: TimingConfig::default(),
            player: PlayerProfile::default(),
            default_difficulty: Difficulty::Easy,
            event_capacity: 64,
            seed: None,
            session_idle_secs: DEFAULT_SESSION_IDLE_SECS,
        }
    }
}

impl ServerConfig {
    /// 讀取設定檔並套用環境變數
    pub fn load() -> Result<Self, FoodRushError> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Ok(addr) = std::env::var(ADDR_ENV) {
            config.addr = addr;
        }
        Ok(config)
    }

    pub fn session_idle(&self) -> Option<Duration> {
        (self.session_idle_secs > 0).then(|| Duration::from_secs(self.session_idle_secs))
    }

    pub fn from_file(path: &Path) -> Result<Self, FoodRushError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, FoodRushError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, FoodRushError> {
        Ok(self.addr.parse()?)
    }
}
