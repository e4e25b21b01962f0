//! View 構建
//!
//! 將遊戲與 session 狀態轉為 proto 訊息；面朝下的牌不揭露種類。

use super::selectable::selectable_mask_from_round;
use super::session::{PlayerStats, SessionState};
use crate::game::{
    combo_bonus, format_time, leaderboard, perfect_score, podium, points_earned, reward_catalog,
    LeaderboardEntry, PerformanceRating, RejectReason, RoundResult, RoundState, SelectOutcome,
    HIDDEN_CATEGORY, OUTCOME_MATCHED, OUTCOME_MISMATCHED, OUTCOME_REJECTED_FULL,
    OUTCOME_REJECTED_INACTIVE, OUTCOME_REJECTED_MATCHED, OUTCOME_REJECTED_OUT_OF_RANGE,
    OUTCOME_REJECTED_SELECTED, OUTCOME_REVEALED,
};
use crate::proto::{
    LeaderboardEntryView, LeaderboardResponse, PlayerStatsView, RewardView, RewardsResponse,
    RoundResultView, RoundView, SelectTokenResponse, SessionView, TokenView,
};

pub fn round_view_from_state(round: &RoundState) -> RoundView {
    let selectable = selectable_mask_from_round(round);

    let tokens = round
        .tokens
        .iter()
        .zip(selectable)
        .map(|(token, selectable)| {
            let face_up = round.is_face_up(token.position);
            TokenView {
                position: token.position as u32,
                category: if face_up { token.category.to_int() } else { HIDDEN_CATEGORY },
                emoji: if face_up { token.category.emoji().to_string() } else { String::new() },
                matched: token.matched,
                face_up,
                selectable,
            }
        })
        .collect();

    RoundView {
        round_id: round.id,
        difficulty: round.difficulty.to_int(),
        grid_size: round.difficulty.grid_size() as u32,
        tokens,
        selection: round.selection.positions().iter().map(|&p| p as u32).collect(),
        matched_pairs: round.matched_pairs as u32,
        total_pairs: round.total_pairs() as u32,
        score: round.score,
        combo: round.combo,
        elapsed_seconds: round.elapsed_seconds,
        phase: round.phase.to_int(),
        combo_bonus: combo_bonus(round.combo),
    }
}

pub fn stats_view(stats: &PlayerStats) -> PlayerStatsView {
    PlayerStatsView {
        total_score: stats.total_score,
        games_played: stats.games_played,
        high_score: stats.high_score,
        is_vip: stats.is_vip,
    }
}

pub fn result_view(result: &RoundResult) -> RoundResultView {
    RoundResultView {
        difficulty: result.difficulty.to_int(),
        score: result.score,
        elapsed_seconds: result.elapsed_seconds,
        points_earned: points_earned(result.score),
        rating: PerformanceRating::from_score(result.score).label().to_string(),
        formatted_time: format_time(result.elapsed_seconds),
        perfect_score: perfect_score(result.difficulty),
    }
}

pub fn session_view_from_state(state: &SessionState) -> SessionView {
    SessionView {
        session_id: state.id,
        screen: state.screen.to_int(),
        difficulty: state.difficulty.to_int(),
        stats: Some(stats_view(&state.stats)),
        last_result: state.last_result.as_ref().map(result_view),
        show_complete: state.show_complete,
    }
}

pub fn outcome_code(outcome: &SelectOutcome) -> i32 {
    match outcome {
        SelectOutcome::Revealed => OUTCOME_REVEALED,
        SelectOutcome::Matched { .. } => OUTCOME_MATCHED,
        SelectOutcome::Mismatched => OUTCOME_MISMATCHED,
        SelectOutcome::Rejected(reason) => match reason {
            RejectReason::Inactive => OUTCOME_REJECTED_INACTIVE,
            RejectReason::OutOfRange => OUTCOME_REJECTED_OUT_OF_RANGE,
            RejectReason::SelectionFull => OUTCOME_REJECTED_FULL,
            RejectReason::AlreadySelected => OUTCOME_REJECTED_SELECTED,
            RejectReason::AlreadyMatched => OUTCOME_REJECTED_MATCHED,
        },
    }
}

pub fn select_response(outcome: &SelectOutcome, round: &RoundState) -> SelectTokenResponse {
    let points_awarded = match outcome {
        SelectOutcome::Matched { points, .. } => *points,
        _ => 0,
    };
    SelectTokenResponse {
        outcome: outcome_code(outcome),
        points_awarded,
        round: Some(round_view_from_state(round)),
    }
}

fn leaderboard_entry_view(entry: &LeaderboardEntry) -> LeaderboardEntryView {
    LeaderboardEntryView {
        rank: entry.rank,
        name: entry.name.to_string(),
        score: entry.score,
        is_vip: entry.is_vip,
        avatar: entry.avatar.to_string(),
        badge: entry.badge().to_int(),
    }
}

pub fn leaderboard_response() -> LeaderboardResponse {
    LeaderboardResponse {
        entries: leaderboard().iter().map(leaderboard_entry_view).collect(),
        podium: podium().iter().map(leaderboard_entry_view).collect(),
    }
}

pub fn rewards_response(balance: i64, is_vip: bool) -> RewardsResponse {
    RewardsResponse {
        balance,
        is_vip,
        rewards: reward_catalog()
            .iter()
            .map(|r| RewardView {
                id: r.id,
                title: r.title.to_string(),
                description: r.description.to_string(),
                points: r.points,
                icon: r.icon.to_string(),
                vip_only: r.vip_only,
                kind: r.kind.to_int(),
                status: r.status(balance, is_vip).to_int(),
                redeemable: r.can_redeem(balance, is_vip),
            })
            .collect(),
    }
}
