//! 盤面生成
//!
//! 依難度抽出 `pair_count` 種食物，每種放入兩張，再以 Fisher-Yates 洗牌

use rand::prelude::*;

use super::difficulty::Difficulty;
use super::foods::FoodKind;

/// 盤面上的一張牌
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub position: usize,
    pub category: FoodKind,
    pub matched: bool,
}

impl Token {
    pub fn new(position: usize, category: FoodKind) -> Self {
        Self {
            position,
            category,
            matched: false,
        }
    }
}

/// 生成洗好的盤面
pub fn generate_board<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Vec<Token> {
    let pairs = difficulty.pair_count();

    let mut categories: Vec<FoodKind> = FoodKind::all()
        .choose_multiple(rng, pairs)
        .copied()
        .collect();
    categories.extend_from_within(..);
    categories.shuffle(rng);

    categories
        .into_iter()
        .enumerate()
        .map(|(position, category)| Token::new(position, category))
        .collect()
}
