//! Card passing between rounds.
//!
//! Seats pair up by complementary start rank (0 with n-1, 1 with n-2, ...).
//! The worse half of the table owes its best cards; the better half gives
//! back cards of its own choosing.

use super::cards_logic::CardCatalog;
use super::state::{FinishRank, Hand, PlayerId, Round};
use super::Card;
use crate::errors::domain::{DomainError, InvariantKind, ValidationKind};

/// The rank a hand exchanges cards with, or `None` if `rank` is off the table.
pub fn complementary_rank(rank: FinishRank, hand_count: usize) -> Option<FinishRank> {
    let rank = rank as usize;
    if rank >= hand_count {
        return None;
    }
    FinishRank::try_from(hand_count - rank - 1).ok()
}

/// Cards a hand of start rank `rank` owes its partner.
pub fn cards_owed(rank: FinishRank, hand_count: usize) -> usize {
    match complementary_rank(rank, hand_count) {
        None => 0,
        Some(partner) if partner == rank => 0,
        Some(_) if hand_count == 3 => 1,
        Some(_) => {
            let rank = rank as usize;
            if rank == 0 || rank == hand_count - 1 {
                2
            } else if rank == 1 || rank == hand_count - 2 {
                1
            } else {
                0
            }
        }
    }
}

/// Whether a hand of this start rank must give up its highest cards.
pub fn passes_high_cards(rank: FinishRank, hand_count: usize) -> bool {
    rank as usize >= hand_count.div_ceil(2)
}

/// The `owed` best cards in `cards`: power cards first, then by ordinal.
pub fn suggest_pass(cards: &[Card], owed: usize, catalog: &CardCatalog) -> Vec<Card> {
    let mut ranked = cards.to_vec();
    catalog.sort_cards(&mut ranked);
    ranked.into_iter().rev().take(owed).collect()
}

/// Who a hand passes to, and the giver's start rank that set the terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassPartner {
    /// Index of the hand holding the complementary start rank.
    pub index: usize,
    pub giver_rank: FinishRank,
}

pub fn pass_partner(round: &Round, giver: usize) -> Result<PassPartner, DomainError> {
    let hand = &round.hands[giver];
    hand.start_rank
        .and_then(|giver_rank| {
            let partner_rank = complementary_rank(giver_rank, round.hands.len())?;
            let index = round
                .hands
                .iter()
                .position(|h| h.start_rank == Some(partner_rank))?;
            Some(PassPartner { index, giver_rank })
        })
        .ok_or_else(|| {
            DomainError::invariant(
                InvariantKind::NoComplementaryPartner,
                format!(
                    "Unable to determine a passing partner for player {} (start rank {:?})",
                    hand.player_id, hand.start_rank
                ),
            )
        })
}

/// Move `cards` from `giver` to `receiver` and mark the giver ready to play.
///
/// Nothing is changed unless every check passes.
pub fn pass_cards(
    round: &mut Round,
    catalog: &CardCatalog,
    giver: PlayerId,
    receiver: PlayerId,
    cards: &[Card],
) -> Result<(), DomainError> {
    let giver_idx = round.hand_index(giver).ok_or_else(|| not_in_round(giver))?;
    if round.hands[giver_idx].ready_to_play {
        return Err(DomainError::validation(
            ValidationKind::NotAwaitingPass,
            format!("Player {giver} does not owe any cards"),
        ));
    }

    let PassPartner {
        index: partner_idx,
        giver_rank,
    } = pass_partner(round, giver_idx)?;
    if round.hands[partner_idx].player_id != receiver {
        return Err(DomainError::validation(
            ValidationKind::WrongPassRecipient,
            format!(
                "Player {giver} must pass to player {}, not {receiver}",
                round.hands[partner_idx].player_id
            ),
        ));
    }

    let hand_count = round.hands.len();
    let owed = cards_owed(giver_rank, hand_count);
    if cards.len() != owed {
        return Err(DomainError::validation(
            ValidationKind::WrongPassCount,
            format!("Player {giver} owes {owed} card(s), got {}", cards.len()),
        ));
    }

    let mut giving: Hand = round.hands[giver_idx].clone();
    let passed = giving.take_cards(cards)?;

    if passes_high_cards(giver_rank, hand_count)
        && !gives_best_cards(catalog, &passed, &giving.cards)
    {
        return Err(DomainError::validation(
            ValidationKind::MustPassHighCards,
            format!("Player {giver} must pass their highest card(s)"),
        ));
    }

    giving.ready_to_play = true;
    round.hands[giver_idx] = giving;

    let receiving = &mut round.hands[partner_idx];
    receiving.cards.extend(passed);
    catalog.sort_cards(&mut receiving.cards);
    Ok(())
}

fn gives_best_cards(catalog: &CardCatalog, passed: &[Card], kept: &[Card]) -> bool {
    let lowest_passed = passed.iter().map(|c| catalog.ordinal(*c)).min();
    let highest_kept = kept.iter().map(|c| catalog.ordinal(*c)).max();
    match (lowest_passed, highest_kept) {
        (Some(passed), Some(kept)) => passed >= kept,
        _ => true,
    }
}

fn not_in_round(player_id: PlayerId) -> DomainError {
    DomainError::validation(
        ValidationKind::PlayerNotInRound,
        format!("Player {player_id} has no hand in this round"),
    )
}
