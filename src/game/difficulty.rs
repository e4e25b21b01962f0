//! 難度定義

use serde::Deserialize;

use super::constants::FOOD_KIND_COUNT;

/// 難度等級，決定盤面邊長
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

// 最難的盤面也必須能由食物種類填滿
const _: () = assert!(Difficulty::Hard.pair_count() <= FOOD_KIND_COUNT);

impl Difficulty {
    /// 盤面邊長 (4x4 / 6x6 / 8x8)
    pub const fn grid_size(&self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 6,
            Difficulty::Hard => 8,
        }
    }

    pub const fn total_cells(&self) -> usize {
        self.grid_size() * self.grid_size()
    }

    /// 完成回合需要的配對數
    pub const fn pair_count(&self) -> usize {
        self.total_cells() / 2
    }

    pub fn to_int(&self) -> i32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    pub fn from_int(value: i32) -> Option<Difficulty> {
        match value {
            0 => Some(Difficulty::Easy),
            1 => Some(Difficulty::Medium),
            2 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}
