//! 可選位置遮罩
//!
//! 對應介面上的「停用」狀態：翻開兩張等待結算時全部停用，已配對的牌永遠停用。

use crate::game::RoundState;

/// 每個位置目前是否可被選取
pub fn selectable_mask_from_round(round: &RoundState) -> Vec<bool> {
    if !round.is_active() || round.selection.is_full() {
        return vec![false; round.tokens.len()];
    }

    round
        .tokens
        .iter()
        .map(|token| !token.matched && !round.selection.contains(token.position))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Difficulty, SelectOutcome};
    use rand::{rngs::StdRng, SeedableRng};

    fn round() -> RoundState {
        RoundState::new(1, Difficulty::Easy, &mut StdRng::seed_from_u64(21))
    }

    #[test]
    fn test_fresh_round_all_selectable() {
        let r = round();
        assert!(selectable_mask_from_round(&r).iter().all(|&s| s));
    }

    #[test]
    fn test_selected_and_full_selection() {
        let mut r = round();
        r.select_token(0);
        let mask = selectable_mask_from_round(&r);
        assert!(!mask[0]);
        assert_eq!(mask.iter().filter(|&&s| s).count(), 15);

        let partner = (1..16).find(|&p| r.tokens[p].category != r.tokens[0].category).unwrap();
        assert_eq!(r.select_token(partner), SelectOutcome::Mismatched);
        assert!(selectable_mask_from_round(&r).iter().all(|&s| !s));

        r.settle();
        assert!(selectable_mask_from_round(&r).iter().all(|&s| s));
    }

    #[test]
    fn test_matched_tokens_disabled() {
        let mut r = round();
        let partner = (1..16).find(|&p| r.tokens[p].category == r.tokens[0].category).unwrap();
        r.select_and_settle(0);
        r.select_and_settle(partner);

        let mask = selectable_mask_from_round(&r);
        assert!(!mask[0]);
        assert!(!mask[partner]);
        assert_eq!(mask.iter().filter(|&&s| s).count(), 14);
    }

    #[test]
    fn test_abandoned_round_disabled() {
        let mut r = round();
        r.abandon();
        assert!(selectable_mask_from_round(&r).iter().all(|&s| !s));
    }
}
