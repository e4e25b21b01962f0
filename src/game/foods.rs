//! 食物種類定義
//!
//! 每個種類在一回合中恰好出現兩次（一對）

use super::constants::FOOD_KIND_COUNT;

/// 食物種類
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FoodKind {
    // 經典八種
    Pizza,
    Burger,
    Sushi,
    IceCream,
    Fries,
    Donut,
    Taco,
    Bento,

    // 鹹食
    HotDog,
    Sandwich,
    Burrito,
    Ramen,
    Spaghetti,
    Curry,
    Dumpling,
    Shrimp,
    RiceBall,
    Salad,
    Cheese,
    Bagel,

    // 點心
    Croissant,
    Pancakes,
    Waffle,
    Pretzel,
    Popcorn,
    Cake,
    Cupcake,
    Cookie,
    Pie,
    Chocolate,
    Lollipop,
    Dango,
}

const ALL_FOODS: [FoodKind; FOOD_KIND_COUNT] = [
    FoodKind::Pizza,
    FoodKind::Burger,
    FoodKind::Sushi,
    FoodKind::IceCream,
    FoodKind::Fries,
    FoodKind::Donut,
    FoodKind::Taco,
    FoodKind::Bento,
    FoodKind::HotDog,
    FoodKind::Sandwich,
    FoodKind::Burrito,
    FoodKind::Ramen,
    FoodKind::Spaghetti,
    FoodKind::Curry,
    FoodKind::Dumpling,
    FoodKind::Shrimp,
    FoodKind::RiceBall,
    FoodKind::Salad,
    FoodKind::Cheese,
    FoodKind::Bagel,
    FoodKind::Croissant,
    FoodKind::Pancakes,
    FoodKind::Waffle,
    FoodKind::Pretzel,
    FoodKind::Popcorn,
    FoodKind::Cake,
    FoodKind::Cupcake,
    FoodKind::Cookie,
    FoodKind::Pie,
    FoodKind::Chocolate,
    FoodKind::Lollipop,
    FoodKind::Dango,
];

impl FoodKind {
    /// 所有食物種類（用於隨機選擇）
    pub fn all() -> &'static [FoodKind] {
        &ALL_FOODS
    }

    /// 轉換為整數 ID (用於 proto)
    pub fn to_int(&self) -> i32 {
        *self as i32
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            FoodKind::Pizza => "🍕",
            FoodKind::Burger => "🍔",
            FoodKind::Sushi => "🍣",
            FoodKind::IceCream => "🍦",
            FoodKind::Fries => "🍟",
            FoodKind::Donut => "🍩",
            FoodKind::Taco => "🌮",
            FoodKind::Bento => "🍱",
            FoodKind::HotDog => "🌭",
            FoodKind::Sandwich => "🥪",
            FoodKind::Burrito => "🌯",
            FoodKind::Ramen => "🍜",
            FoodKind::Spaghetti => "🍝",
            FoodKind::Curry => "🍛",
            FoodKind::Dumpling => "🥟",
            FoodKind::Shrimp => "🍤",
            FoodKind::RiceBall => "🍙",
            FoodKind::Salad => "🥗",
            FoodKind::Cheese => "🧀",
            FoodKind::Bagel => "🥯",
            FoodKind::Croissant => "🥐",
            FoodKind::Pancakes => "🥞",
            FoodKind::Waffle => "🧇",
            FoodKind::Pretzel => "🥨",
            FoodKind::Popcorn => "🍿",
            FoodKind::Cake => "🍰",
            FoodKind::Cupcake => "🧁",
            FoodKind::Cookie => "🍪",
            FoodKind::Pie => "🥧",
            FoodKind::Chocolate => "🍫",
            FoodKind::Lollipop => "🍭",
            FoodKind::Dango => "🍡",
        }
    }
}
