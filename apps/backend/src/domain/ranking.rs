//! Finishing ranks and round termination.

use time::OffsetDateTime;

use super::state::{FinishRank, Hand, Round};

/// Rank the next hand to go out receives: one past the worst assigned so
/// far, or 0 when nobody has finished.
pub fn next_rank(hands: &[Hand]) -> FinishRank {
    hands
        .iter()
        .filter_map(|h| h.end_rank)
        .max()
        .map_or(0, |worst| worst.saturating_add(1))
}

/// Assign `next_rank` to the hand at `index`. No-op if already ranked.
pub fn rank_hand(round: &mut Round, index: usize) -> FinishRank {
    if let Some(rank) = round.hands[index].end_rank {
        return rank;
    }
    let rank = next_rank(&round.hands);
    round.hands[index].end_rank = Some(rank);
    rank
}

pub fn unranked_count(hands: &[Hand]) -> usize {
    hands.iter().filter(|h| h.end_rank.is_none()).count()
}

/// The round is over once fewer than two hands are still unranked.
pub fn round_should_end(hands: &[Hand]) -> bool {
    unranked_count(hands) < 2
}

/// Close the round: rank every remaining hand in seat order, stamp
/// `ended_at`, and deactivate everybody.
pub fn finish_round(round: &mut Round, now: OffsetDateTime) {
    for index in 0..round.hands.len() {
        if round.hands[index].end_rank.is_none() {
            rank_hand(round, index);
        }
    }
    for hand in round.hands.iter_mut() {
        hand.is_active = false;
    }
    round.ended_at = Some(now);
}
