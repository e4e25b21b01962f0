//! 獎勵商店
//!
//! 固定的獎勵目錄與兌換資格判定；不處理實際兌換

/// 獎勵類型
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewardKind {
    Coupon,
    Gift,
    Special,
}

impl RewardKind {
    pub fn to_int(&self) -> i32 {
        match self {
            RewardKind::Coupon => 0,
            RewardKind::Gift => 1,
            RewardKind::Special => 2,
        }
    }
}

/// 商店中的獎勵
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reward {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub points: i64,
    pub icon: &'static str,
    pub vip_only: bool,
    pub kind: RewardKind,
}

const REWARDS: [Reward; 6] = [
    Reward {
        id: 1,
        title: "₮10,000 Coupon",
        description: "Valid for any TokTok order",
        points: 1000,
        icon: "🎫",
        vip_only: false,
        kind: RewardKind::Coupon,
    },
    Reward {
        id: 2,
        title: "₮25,000 Coupon",
        description: "Valid for any TokTok order",
        points: 2500,
        icon: "🎟️",
        vip_only: false,
        kind: RewardKind::Coupon,
    },
    Reward {
        id: 3,
        title: "Free Delivery (3x)",
        description: "3 free deliveries on any order",
        points: 1500,
        icon: "🚚",
        vip_only: false,
        kind: RewardKind::Special,
    },
    Reward {
        id: 4,
        title: "₮50,000 VIP Coupon",
        description: "Exclusive VIP discount",
        points: 4000,
        icon: "💎",
        vip_only: true,
        kind: RewardKind::Coupon,
    },
    Reward {
        id: 5,
        title: "Mystery Gift Box",
        description: "Random premium reward",
        points: 3000,
        icon: "🎁",
        vip_only: true,
        kind: RewardKind::Gift,
    },
    Reward {
        id: 6,
        title: "VIP Gold Status",
        description: "1 month of VIP benefits",
        points: 5000,
        icon: "👑",
        vip_only: false,
        kind: RewardKind::Special,
    },
];

/// 全部獎勵
pub fn reward_catalog() -> &'static [Reward] {
    &REWARDS
}

/// 獎勵在玩家眼中的狀態
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewardStatus {
    Affordable,
    NotEnough,
    /// VIP 專屬，玩家非 VIP
    Locked,
}

impl RewardStatus {
    pub fn to_int(&self) -> i32 {
        match self {
            RewardStatus::Affordable => 0,
            RewardStatus::NotEnough => 1,
            RewardStatus::Locked => 2,
        }
    }
}

impl Reward {
    pub fn status(&self, balance: i64, is_vip: bool) -> RewardStatus {
        if self.vip_only && !is_vip {
            RewardStatus::Locked
        } else if balance >= self.points {
            RewardStatus::Affordable
        } else {
            RewardStatus::NotEnough
        }
    }

    pub fn can_redeem(&self, balance: i64, is_vip: bool) -> bool {
        self.status(balance, is_vip) == RewardStatus::Affordable
    }
}
