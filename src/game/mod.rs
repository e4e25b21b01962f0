//! 遊戲核心模組
//!
//! 包含 Food Rush 的核心定義：
//! - `constants`: 遊戲常量
//! - `foods`: 食物種類
//! - `difficulty`: 難度與盤面大小
//! - `board`: 盤面生成
//! - `round`: 回合引擎（選牌、配對、計時、完成偵測）
//! - `scoring`: 計分規則與結算評級
//! - `leaderboard`: 排行榜展示資料
//! - `rewards`: 獎勵商店

pub mod constants;
pub mod foods;
pub mod difficulty;
pub mod board;
pub mod round;
pub mod scoring;
pub mod leaderboard;
pub mod rewards;

pub use constants::*;
pub use foods::FoodKind;
pub use difficulty::Difficulty;
pub use board::{generate_board, Token};
pub use round::{
    RejectReason, Resolution, RoundPhase, RoundResult, RoundState, SelectOutcome, Selection,
};
pub use scoring::{
    combo_bonus, format_time, match_points, perfect_score, points_earned, PerformanceRating,
};
pub use leaderboard::{leaderboard, podium, LeaderboardEntry, RankBadge};
pub use rewards::{reward_catalog, Reward, RewardKind, RewardStatus};
