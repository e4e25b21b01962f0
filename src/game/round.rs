//! 回合引擎
//!
//! 單一回合的完整狀態機：
//! - 選牌與配對判定 (`select_token`)
//! - 動畫停留後的結算 (`settle`)
//! - 計時 (`tick`)
//! - 完成偵測 (`finish`)，每回合只會回傳一次結果
//!
//! 引擎本身不含任何延遲；延遲由服務層的計時器決定，
//! 無介面的呼叫者可在 `select_token` 後立即 `settle`。

use rand::Rng;

use super::board::{generate_board, Token};
use super::constants::SELECTION_LIMIT;
use super::difficulty::Difficulty;
use super::scoring::match_points;

/// 回合階段
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    Active,
    /// 全部配對完成，等待結算
    Completing,
    Finished,
    /// 玩家離開遊戲畫面
    Abandoned,
}

impl RoundPhase {
    pub fn to_int(&self) -> i32 {
        match self {
            RoundPhase::Active => 0,
            RoundPhase::Completing => 1,
            RoundPhase::Finished => 2,
            RoundPhase::Abandoned => 3,
        }
    }
}

/// 拒絕選牌的原因
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    Inactive,
    OutOfRange,
    SelectionFull,
    AlreadySelected,
    AlreadyMatched,
}

/// 選牌結果
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// 翻開第一張
    Revealed,
    Matched { points: i64, combo: u32 },
    Mismatched,
    Rejected(RejectReason),
}

impl SelectOutcome {
    /// 是否產生待結算的配對
    pub fn needs_settle(&self) -> bool {
        matches!(self, SelectOutcome::Matched { .. } | SelectOutcome::Mismatched)
    }
}

/// 待結算的配對
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Match,
    Mismatch,
}

/// 已翻開但尚未結算的位置（最多兩個）
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    positions: Vec<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self {
            positions: Vec::with_capacity(SELECTION_LIMIT),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.positions.len() >= SELECTION_LIMIT
    }

    pub fn contains(&self, position: usize) -> bool {
        self.positions.contains(&position)
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    fn push(&mut self, position: usize) {
        debug_assert!(!self.is_full());
        self.positions.push(position);
    }

    fn clear(&mut self) {
        self.positions.clear();
    }
}

/// 回合結果（交給 session 記錄）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundResult {
    pub difficulty: Difficulty,
    pub score: i64,
    pub elapsed_seconds: u32,
}

/// 回合狀態
#[derive(Clone, Debug)]
pub struct RoundState {
    pub id: u64,
    pub difficulty: Difficulty,
    pub tokens: Vec<Token>,
    pub selection: Selection,
    pub matched_pairs: usize,
    pub score: i64,
    pub combo: u32,
    pub elapsed_seconds: u32,
    pub phase: RoundPhase,
    pending: Option<Resolution>,
}

impl RoundState {
    pub fn new<R: Rng + ?Sized>(id: u64, difficulty: Difficulty, rng: &mut R) -> Self {
        Self::from_tokens(id, difficulty, generate_board(difficulty, rng))
    }

    /// 以指定盤面建立回合
    pub fn from_tokens(id: u64, difficulty: Difficulty, tokens: Vec<Token>) -> Self {
        Self {
            id,
            difficulty,
            tokens,
            selection: Selection::new(),
            matched_pairs: 0,
            score: 0,
            combo: 0,
            elapsed_seconds: 0,
            phase: RoundPhase::Active,
            pending: None,
        }
    }

    pub fn total_pairs(&self) -> usize {
        self.tokens.len() / 2
    }

    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::Active
    }

    pub fn pending(&self) -> Option<Resolution> {
        self.pending
    }

    /// 該位置目前是否面朝上
    pub fn is_face_up(&self, position: usize) -> bool {
        self.selection.contains(position)
            || self.tokens.get(position).map(|t| t.matched).unwrap_or(false)
    }

    /// 玩家翻開一張牌
    pub fn select_token(&mut self, position: usize) -> SelectOutcome {
        if self.phase != RoundPhase::Active {
            return SelectOutcome::Rejected(RejectReason::Inactive);
        }
        let Some(token) = self.tokens.get(position) else {
            return SelectOutcome::Rejected(RejectReason::OutOfRange);
        };
        if self.selection.is_full() {
            return SelectOutcome::Rejected(RejectReason::SelectionFull);
        }
        if self.selection.contains(position) {
            return SelectOutcome::Rejected(RejectReason::AlreadySelected);
        }
        if token.matched {
            return SelectOutcome::Rejected(RejectReason::AlreadyMatched);
        }

        self.selection.push(position);
        if !self.selection.is_full() {
            return SelectOutcome::Revealed;
        }

        let (first, second) = (self.selection.positions[0], self.selection.positions[1]);
        if self.tokens[first].category == self.tokens[second].category {
            self.combo += 1;
            let points = match_points(self.combo);
            self.score += points;
            self.pending = Some(Resolution::Match);
            SelectOutcome::Matched {
                points,
                combo: self.combo,
            }
        } else {
            self.combo = 0;
            self.pending = Some(Resolution::Mismatch);
            SelectOutcome::Mismatched
        }
    }

    /// 套用待結算的配對；全部配對完成時進入 Completing
    pub fn settle(&mut self) -> Option<Resolution> {
        if self.phase != RoundPhase::Active {
            return None;
        }
        let resolution = self.pending.take()?;

        if resolution == Resolution::Match {
            for &position in self.selection.positions() {
                self.tokens[position].matched = true;
            }
            self.matched_pairs += 1;
        }
        self.selection.clear();

        let total = self.total_pairs();
        if total > 0 && self.matched_pairs == total {
            self.phase = RoundPhase::Completing;
        }
        Some(resolution)
    }

    /// 選牌並立即結算（無動畫）
    pub fn select_and_settle(&mut self, position: usize) -> SelectOutcome {
        let outcome = self.select_token(position);
        if outcome.needs_settle() {
            self.settle();
        }
        outcome
    }

    /// 計時一秒；回合非 Active 時回傳 false
    pub fn tick(&mut self) -> bool {
        if self.phase != RoundPhase::Active {
            return false;
        }
        self.elapsed_seconds += 1;
        true
    }

    /// 結束回合並取出結果，只有第一次呼叫會回傳 Some
    pub fn finish(&mut self) -> Option<RoundResult> {
        if self.phase != RoundPhase::Completing {
            return None;
        }
        self.phase = RoundPhase::Finished;
        Some(RoundResult {
            difficulty: self.difficulty,
            score: self.score,
            elapsed_seconds: self.elapsed_seconds,
        })
    }

    /// 離開遊戲畫面，未結束的回合不再計時或接受選牌
    pub fn abandon(&mut self) -> bool {
        match self.phase {
            RoundPhase::Active | RoundPhase::Completing => {
                self.phase = RoundPhase::Abandoned;
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::foods::FoodKind;
    use crate::game::scoring::perfect_score;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn easy_round(seed: u64) -> RoundState {
        let mut rng = StdRng::seed_from_u64(seed);
        RoundState::new(1, Difficulty::Easy, &mut rng)
    }

    /// 每種食物對應的兩個位置
    fn pair_positions(round: &RoundState) -> Vec<(usize, usize)> {
        let mut seen: HashMap<FoodKind, usize> = HashMap::new();
        let mut pairs = Vec::new();
        for token in &round.tokens {
            if let Some(first) = seen.remove(&token.category) {
                pairs.push((first, token.position));
            } else {
                seen.insert(token.category, token.position);
            }
        }
        pairs
    }

    /// 找出兩個不同種類的位置
    fn mismatched_positions(round: &RoundState) -> (usize, usize) {
        let first = round.tokens[0].category;
        let other = round
            .tokens
            .iter()
            .find(|t| t.category != first)
            .map(|t| t.position)
            .unwrap();
        (0, other)
    }

    #[test]
    fn test_new_round_is_fresh() {
        let round = easy_round(1);
        assert_eq!(round.tokens.len(), 16);
        assert_eq!(round.total_pairs(), 8);
        assert!(round.selection.is_empty());
        assert_eq!(round.score, 0);
        assert_eq!(round.combo, 0);
        assert_eq!(round.elapsed_seconds, 0);
        assert!(round.is_active());
    }

    #[test]
    fn test_perfect_easy_round_scores_2600() {
        let mut round = easy_round(3);
        for (a, b) in pair_positions(&round) {
            assert_eq!(round.select_and_settle(a), SelectOutcome::Revealed);
            assert!(matches!(round.select_and_settle(b), SelectOutcome::Matched { .. }));
        }

        assert_eq!(round.score, 2600);
        assert_eq!(round.score, perfect_score(Difficulty::Easy));
        assert_eq!(round.combo, 8);
        assert_eq!(round.matched_pairs, 8);
        assert_eq!(round.phase, RoundPhase::Completing);
    }

    #[test]
    fn test_match_awards_combo_points() {
        let mut round = easy_round(5);
        let pairs = pair_positions(&round);

        round.select_token(pairs[0].0);
        let outcome = round.select_token(pairs[0].1);
        assert_eq!(outcome, SelectOutcome::Matched { points: 150, combo: 1 });
        assert_eq!(round.score, 150);
        // 尚未結算
        assert_eq!(round.matched_pairs, 0);
        assert_eq!(round.pending(), Some(Resolution::Match));

        assert_eq!(round.settle(), Some(Resolution::Match));
        assert!(round.tokens[pairs[0].0].matched);
        assert!(round.tokens[pairs[0].1].matched);
        assert_eq!(round.matched_pairs, 1);
        assert!(round.selection.is_empty());

        round.select_token(pairs[1].0);
        let outcome = round.select_token(pairs[1].1);
        assert_eq!(outcome, SelectOutcome::Matched { points: 200, combo: 2 });
        assert_eq!(round.score, 350);
    }

    #[test]
    fn test_mismatch_resets_combo_and_keeps_score() {
        let mut round = easy_round(9);
        let pairs = pair_positions(&round);
        round.select_and_settle(pairs[0].0);
        round.select_and_settle(pairs[0].1);
        assert_eq!(round.combo, 1);
        let score_before = round.score;

        let (a, b) = {
            let remaining: Vec<&Token> = round.tokens.iter().filter(|t| !t.matched).collect();
            let first = remaining[0];
            let other = remaining.iter().find(|t| t.category != first.category).unwrap();
            (first.position, other.position)
        };
        round.select_token(a);
        assert_eq!(round.select_token(b), SelectOutcome::Mismatched);
        assert_eq!(round.combo, 0);
        assert_eq!(round.score, score_before);

        assert_eq!(round.settle(), Some(Resolution::Mismatch));
        assert!(round.selection.is_empty());
        assert_eq!(round.matched_pairs, 1);
        assert!(!round.tokens[a].matched);
        assert!(!round.tokens[b].matched);
    }

    #[test]
    fn test_rejections_are_no_ops() {
        let mut round = easy_round(11);
        let (a, b) = mismatched_positions(&round);

        assert_eq!(
            round.select_token(99),
            SelectOutcome::Rejected(RejectReason::OutOfRange)
        );

        round.select_token(a);
        assert_eq!(
            round.select_token(a),
            SelectOutcome::Rejected(RejectReason::AlreadySelected)
        );
        assert_eq!(round.selection.len(), 1);

        round.select_token(b);
        let third = (0..16).find(|p| *p != a && *p != b).unwrap();
        assert_eq!(
            round.select_token(third),
            SelectOutcome::Rejected(RejectReason::SelectionFull)
        );
        assert_eq!(round.selection.positions(), &[a, b]);
    }

    #[test]
    fn test_matched_token_cannot_be_selected() {
        let mut round = easy_round(13);
        let (a, b) = pair_positions(&round)[0];
        round.select_and_settle(a);
        round.select_and_settle(b);

        let score = round.score;
        assert_eq!(
            round.select_token(a),
            SelectOutcome::Rejected(RejectReason::AlreadyMatched)
        );
        assert!(round.selection.is_empty());
        assert_eq!(round.score, score);
    }

    #[test]
    fn test_finish_fires_once_with_score_and_time() {
        let mut round = easy_round(17);
        assert_eq!(round.finish(), None);

        round.tick();
        round.tick();
        for (a, b) in pair_positions(&round) {
            round.select_and_settle(a);
            round.select_and_settle(b);
        }

        // 完成後時鐘停止
        assert!(!round.tick());

        let result = round.finish().unwrap();
        assert_eq!(result.score, 2600);
        assert_eq!(result.elapsed_seconds, 2);
        assert_eq!(result.difficulty, Difficulty::Easy);
        assert_eq!(round.phase, RoundPhase::Finished);
        assert_eq!(round.finish(), None);
        assert_eq!(
            round.select_token(0),
            SelectOutcome::Rejected(RejectReason::Inactive)
        );
    }

    #[test]
    fn test_abandon_stops_clock_and_drops_pending() {
        let mut round = easy_round(19);
        let (a, b) = mismatched_positions(&round);
        round.select_token(a);
        round.select_token(b);

        assert!(round.abandon());
        assert!(!round.tick());
        assert_eq!(round.settle(), None);
        assert_eq!(round.finish(), None);
        assert!(!round.abandon());
    }

    #[test]
    fn test_empty_board_never_completes() {
        let mut round = RoundState::from_tokens(1, Difficulty::Easy, Vec::new());
        assert_eq!(round.settle(), None);
        assert_eq!(round.phase, RoundPhase::Active);
        assert_eq!(round.finish(), None);
    }

    proptest! {
        #[test]
        fn prop_random_play_keeps_invariants(
            seed in any::<u64>(),
            picks in proptest::collection::vec(0usize..20, 0..200),
        ) {
            let mut round = easy_round(seed);
            let total = round.total_pairs();
            let mut last_score = 0;
            let mut finished = 0;

            for pick in picks {
                let combo_before = round.combo;
                let outcome = round.select_token(pick);
                match outcome {
                    SelectOutcome::Matched { points, combo } => {
                        prop_assert_eq!(combo, combo_before + 1);
                        prop_assert_eq!(points, match_points(combo));
                    }
                    SelectOutcome::Mismatched => prop_assert_eq!(round.combo, 0),
                    _ => {}
                }
                prop_assert!(round.selection.len() <= 2);
                if outcome.needs_settle() {
                    round.settle();
                }
                prop_assert!(round.score >= last_score);
                prop_assert!(round.matched_pairs <= total);
                last_score = round.score;
                if round.finish().is_some() {
                    finished += 1;
                }
            }

            prop_assert!(finished <= 1);
            prop_assert_eq!(finished == 1, round.matched_pairs == total);
        }
    }
}
