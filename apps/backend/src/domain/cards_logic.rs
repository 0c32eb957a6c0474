//! Card ordering for a game: the rank ladder plus the configured power card.

use super::cards_types::{Card, Rank, Suit};

/// Ordinal of the power card, one step above the natural top rank (Two).
pub const POWER_ORDINAL: u8 = 13;

pub const CARDS_PER_DECK: usize = 52;

/// Per-game card ordering.
///
/// Built from a `GameConfig`; every rules decision that compares cards goes
/// through here so the power card is never special-cased elsewhere.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CardCatalog {
    power_card: Card,
}

impl CardCatalog {
    pub const fn new(power_card: Card) -> Self {
        Self { power_card }
    }

    pub const fn power_card(&self) -> Card {
        self.power_card
    }

    pub fn is_power(&self, card: Card) -> bool {
        card == self.power_card
    }

    /// Ladder position for ordinary cards, `POWER_ORDINAL` for the power card.
    pub fn ordinal(&self, card: Card) -> u8 {
        if self.is_power(card) {
            POWER_ORDINAL
        } else {
            card.rank.ladder()
        }
    }

    /// True if `cards` is a single power card.
    pub fn is_lone_power(&self, cards: &[Card]) -> bool {
        matches!(cards, [only] if self.is_power(*only))
    }

    /// The shared ordinal of a non-empty set of equal-ordinal cards.
    pub fn uniform_ordinal(&self, cards: &[Card]) -> Option<u8> {
        let (first, rest) = cards.split_first()?;
        let ordinal = self.ordinal(*first);
        rest.iter()
            .all(|c| self.ordinal(*c) == ordinal)
            .then_some(ordinal)
    }

    /// `deck_count` standard decks, rank-major order.
    pub fn full_deck(&self, deck_count: u8) -> Vec<Card> {
        let mut deck = Vec::with_capacity(CARDS_PER_DECK * deck_count as usize);
        for rank in Rank::ALL {
            for suit in Suit::ALL {
                for _ in 0..deck_count {
                    deck.push(Card { suit, rank });
                }
            }
        }
        deck
    }

    /// Sort low to high by ordinal, suit as tiebreak for stable display.
    pub fn sort_cards(&self, cards: &mut [Card]) {
        cards.sort_by_key(|c| (self.ordinal(*c), c.suit));
    }
}
