//! Table rules and the turn validator.

use super::cards_logic::CardCatalog;
use super::state::Turn;
use super::Card;
use crate::errors::domain::{DomainError, ValidationKind};

pub const MIN_PLAYERS: usize = 3;
/// Finishing ranks are stored as `u8`.
pub const MAX_PLAYERS: usize = u8::MAX as usize;

/// Check that `candidate` may be played on top of `previous`.
///
/// Rules, in order:
/// 1. A lone power card is always legal.
/// 2. All cards must share one ordinal.
/// 3. On a non-empty pile the set must match the previous play's size and
///    be at least its ordinal.
/// 4. On an empty pile any uniform set leads.
///
/// An empty candidate is a pass and is handled by the caller; here it is
/// rejected so a zero-card "play" can never reach the pile.
pub fn validate_play(
    catalog: &CardCatalog,
    candidate: &[Card],
    previous: Option<&Turn>,
) -> Result<(), DomainError> {
    if candidate.is_empty() {
        return Err(illegal("A play needs at least one card"));
    }

    if catalog.is_lone_power(candidate) {
        return Ok(());
    }

    let Some(ordinal) = catalog.uniform_ordinal(candidate) else {
        return Err(illegal("All cards in a play must share the same rank"));
    };

    let Some(previous) = previous else {
        return Ok(());
    };

    if candidate.len() != previous.cards.len() {
        return Err(illegal(format!(
            "Must play {} card(s) to match the pile",
            previous.cards.len()
        )));
    }

    let to_beat = previous
        .cards
        .iter()
        .map(|c| catalog.ordinal(*c))
        .max()
        .unwrap_or(0);
    if ordinal < to_beat {
        return Err(illegal(format!(
            "{} does not beat {}",
            join_aliases(candidate),
            join_aliases(&previous.cards)
        )));
    }

    Ok(())
}

/// Preview helper: whether `candidate` would be accepted.
pub fn can_play(catalog: &CardCatalog, candidate: &[Card], previous: Option<&Turn>) -> bool {
    validate_play(catalog, candidate, previous).is_ok()
}

pub fn join_aliases(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::alias)
        .collect::<Vec<_>>()
        .join(", ")
}

fn illegal(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::IllegalPlay, detail)
}
