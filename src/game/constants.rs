//! 遊戲常量定義

// ============================================================================
// 計分常量
// ============================================================================

pub const MATCH_BASE_POINTS: i64 = 100;   // 每次配對基礎分
pub const COMBO_BONUS_POINTS: i64 = 50;   // 每層連擊加成
pub const COMBO_BANNER_MIN: u32 = 2;      // 連擊橫幅顯示門檻
pub const POINTS_DIVISOR: i64 = 10;       // 回合分數換算積分

// 表現評級門檻
pub const RATING_AMAZING: i64 = 1500;
pub const RATING_GREAT: i64 = 1000;
pub const RATING_GOOD: i64 = 500;

// ============================================================================
// 盤面常量
// ============================================================================

pub const SELECTION_LIMIT: usize = 2;     // 同時翻開的最大張數
pub const FOOD_KIND_COUNT: usize = 32;    // 食物種類數量

// ============================================================================
// 時序常量（毫秒）
// ============================================================================

pub const CLOCK_TICK_MS: u64 = 1000;
pub const MATCH_SETTLE_MS: u64 = 600;     // 配對成功後的動畫停留
pub const MISMATCH_SETTLE_MS: u64 = 1000; // 配對失敗後的動畫停留
pub const COMPLETION_DELAY_MS: u64 = 500; // 全部配對後到結算的延遲

// ============================================================================
// 玩家預設資料
// ============================================================================

pub const DEFAULT_TOTAL_SCORE: i64 = 15680;
pub const DEFAULT_GAMES_PLAYED: u32 = 42;
pub const DEFAULT_HIGH_SCORE: i64 = 1850;
pub const DEFAULT_IS_VIP: bool = true;
pub const DEFAULT_REWARD_POINTS: i64 = 2800;

// ============================================================================
// 代碼常量（用於 proto 傳輸）
// ============================================================================

pub const SCREEN_HOME: i32 = 0;
pub const SCREEN_GAME: i32 = 1;
pub const SCREEN_LEADERBOARD: i32 = 2;
pub const SCREEN_REWARDS: i32 = 3;

pub const OUTCOME_REVEALED: i32 = 0;
pub const OUTCOME_MATCHED: i32 = 1;
pub const OUTCOME_MISMATCHED: i32 = 2;
pub const OUTCOME_REJECTED_INACTIVE: i32 = 3;
pub const OUTCOME_REJECTED_OUT_OF_RANGE: i32 = 4;
pub const OUTCOME_REJECTED_FULL: i32 = 5;
pub const OUTCOME_REJECTED_SELECTED: i32 = 6;
pub const OUTCOME_REJECTED_MATCHED: i32 = 7;

pub const HIDDEN_CATEGORY: i32 = -1;     // 面朝下的 token 不揭露種類
