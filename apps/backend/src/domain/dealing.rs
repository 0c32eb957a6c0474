//! Shuffling and dealing.

use rand::seq::SliceRandom;
use rand::Rng;

use super::cards_logic::CardCatalog;
use super::Card;
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of an even deal: one hand per seat plus leftovers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub hands: Vec<Vec<Card>>,
    pub excess: Vec<Card>,
}

/// Shuffle `deck_count` decks and deal them evenly into `hand_count` hands.
///
/// Uses a uniform Fisher-Yates shuffle driven by the caller's RNG, so a
/// seeded RNG gives a reproducible deal. Each hand gets
/// `floor(cards / hand_count)` cards, sorted low to high; the remainder is
/// returned as `excess`.
pub fn shuffle_and_deal<R: Rng + ?Sized>(
    catalog: &CardCatalog,
    deck_count: u8,
    hand_count: usize,
    rng: &mut R,
) -> Result<Deal, DomainError> {
    if hand_count == 0 {
        return Err(DomainError::validation(
            ValidationKind::NotEnoughPlayers,
            "Cannot deal to zero hands",
        ));
    }

    let mut deck = catalog.full_deck(deck_count);
    if hand_count > deck.len() {
        return Err(DomainError::validation(
            ValidationKind::TooManyPlayers,
            format!("{hand_count} hands cannot share {} cards", deck.len()),
        ));
    }

    deck.shuffle(rng);

    let per_hand = deck.len() / hand_count;
    let dealt = per_hand * hand_count;
    let excess = deck.split_off(dealt);

    let hands = deck
        .chunks(per_hand)
        .map(|chunk| {
            let mut hand = chunk.to_vec();
            catalog.sort_cards(&mut hand);
            hand
        })
        .collect();

    Ok(Deal { hands, excess })
}
