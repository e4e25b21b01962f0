//! 排行榜（固定展示資料）

/// 排行榜條目
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: &'static str,
    pub score: i64,
    pub is_vip: bool,
    pub avatar: &'static str,
}

const fn entry(
    rank: u32,
    name: &'static str,
    score: i64,
    is_vip: bool,
    avatar: &'static str,
) -> LeaderboardEntry {
    LeaderboardEntry {
        rank,
        name,
        score,
        is_vip,
        avatar,
    }
}

const LEADERBOARD: [LeaderboardEntry; 8] = [
    entry(1, "Bold_Gamer", 12580, true, "🏆"),
    entry(2, "Khangai_88", 11200, true, "🌟"),
    entry(3, "TokTok_Pro", 10950, false, "🎯"),
    entry(4, "Nomad_Master", 9870, true, "🚀"),
    entry(5, "FastEater", 9320, false, "⚡"),
    entry(6, "UB_Champion", 8900, false, "🎮"),
    entry(7, "Pizza_Lover", 8450, true, "🍕"),
    entry(8, "Speed_King", 8100, false, "👑"),
];

/// 名次徽章
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RankBadge {
    Gold,
    Silver,
    Bronze,
    Plain,
}

impl RankBadge {
    pub fn for_rank(rank: u32) -> Self {
        match rank {
            1 => RankBadge::Gold,
            2 => RankBadge::Silver,
            3 => RankBadge::Bronze,
            _ => RankBadge::Plain,
        }
    }

    pub fn to_int(&self) -> i32 {
        match self {
            RankBadge::Gold => 0,
            RankBadge::Silver => 1,
            RankBadge::Bronze => 2,
            RankBadge::Plain => 3,
        }
    }
}

impl LeaderboardEntry {
    pub fn badge(&self) -> RankBadge {
        RankBadge::for_rank(self.rank)
    }
}

/// 全部條目（依名次排序）
pub fn leaderboard() -> &'static [LeaderboardEntry] {
    &LEADERBOARD
}

/// 前三名
pub fn podium() -> &'static [LeaderboardEntry] {
    &LEADERBOARD[..3]
}
