//! 計分規則
//!
//! 配對分數 = 100 + 連擊數 × 50，連擊數從本次配對起算（第一次配對為 1）

use super::constants::{
    COMBO_BANNER_MIN, COMBO_BONUS_POINTS, MATCH_BASE_POINTS, POINTS_DIVISOR, RATING_AMAZING,
    RATING_GOOD, RATING_GREAT,
};
use super::difficulty::Difficulty;

/// 單次配對得分
pub fn match_points(combo: u32) -> i64 {
    MATCH_BASE_POINTS + combo as i64 * COMBO_BONUS_POINTS
}

/// 連擊橫幅顯示的加成（連擊未達門檻時為 0）
pub fn combo_bonus(combo: u32) -> i64 {
    if combo >= COMBO_BANNER_MIN {
        combo as i64 * COMBO_BONUS_POINTS
    } else {
        0
    }
}

/// 回合分數換算的玩家積分
pub fn points_earned(score: i64) -> i64 {
    score / POINTS_DIVISOR
}

/// 完全不失誤時的最高分
pub fn perfect_score(difficulty: Difficulty) -> i64 {
    (1..=difficulty.pair_count() as u32).map(match_points).sum()
}

/// 秒數格式化為 m:ss
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// 結算畫面的表現評級
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PerformanceRating {
    Amazing,
    Great,
    Good,
    NiceTry,
}

impl PerformanceRating {
    pub fn from_score(score: i64) -> Self {
        if score >= RATING_AMAZING {
            PerformanceRating::Amazing
        } else if score >= RATING_GREAT {
            PerformanceRating::Great
        } else if score >= RATING_GOOD {
            PerformanceRating::Good
        } else {
            PerformanceRating::NiceTry
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceRating::Amazing => "Amazing!",
            PerformanceRating::Great => "Great!",
            PerformanceRating::Good => "Good!",
            PerformanceRating::NiceTry => "Nice Try!",
        }
    }
}
