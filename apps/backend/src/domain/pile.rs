//! Pile engine: moving plays onto the active pile and clearing it.

use std::fmt;

use time::OffsetDateTime;

use super::cards_logic::CardCatalog;
use super::state::{PlayerId, Round, Turn};
use super::Card;
use crate::errors::domain::DomainError;

/// Why a play took the pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearReason {
    /// A lone power card was played.
    PowerCard(Card),
    /// Consecutive same-rank plays reached the explode count.
    OfAKind(u8),
}

impl fmt::Display for ClearReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClearReason::PowerCard(card) => write!(f, "the power card ({card})"),
            ClearReason::OfAKind(count) => write!(f, "{count} of a kind"),
        }
    }
}

/// Move `cards` from the hand at `hand_index` onto the active pile.
///
/// Fails with `CardNotInHand` (and changes nothing) if any card is missing.
pub fn apply_play(
    round: &mut Round,
    hand_index: usize,
    cards: &[Card],
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    let hand = &mut round.hands[hand_index];
    let played = hand.take_cards(cards)?;
    let player_id: PlayerId = hand.player_id;
    round.active_pile.push(Turn {
        cards: played,
        player_id,
        played_at: now,
        took_the_pile: false,
    });
    Ok(())
}

/// Decide whether the most recent play clears the pile.
///
/// The explode walk goes backward from the last turn, summing cards while
/// each turn has the same rank and the same size as the last one. Plays are
/// already forced to match size within a pile, so the size check only pins
/// down what "consecutive" means. An explode count of zero disables it.
pub fn detect_pile_clear(
    active_pile: &[Turn],
    catalog: &CardCatalog,
    explode_count: u8,
) -> Option<ClearReason> {
    let last = active_pile.last()?;

    if catalog.is_lone_power(&last.cards) {
        return Some(ClearReason::PowerCard(catalog.power_card()));
    }

    let target = explode_count as usize;
    let size = last.cards.len();
    if target == 0 || size == 0 || target % size != 0 {
        return None;
    }

    let rank = catalog.uniform_ordinal(&last.cards)?;
    let mut count = 0usize;
    for turn in active_pile.iter().rev() {
        if turn.cards.len() != size || catalog.uniform_ordinal(&turn.cards) != Some(rank) {
            return None;
        }
        count += size;
        if count == target {
            return Some(ClearReason::OfAKind(explode_count));
        }
    }
    None
}

/// Move every active turn onto the discard pile.
///
/// The last moved turn is flagged as having taken the pile. No-op on an
/// empty pile.
pub fn clear_pile(round: &mut Round) {
    if round.active_pile.is_empty() {
        return;
    }
    let mut cleared = std::mem::take(&mut round.active_pile);
    if let Some(last) = cleared.last_mut() {
        last.took_the_pile = true;
    }
    round.discard_pile.append(&mut cleared);
}

/// After a clearing play, nobody else gets to answer it.
pub fn mark_others_passed(round: &mut Round, clearer: PlayerId) {
    for hand in round.hands.iter_mut().filter(|h| h.player_id != clearer) {
        hand.has_passed = true;
    }
}
