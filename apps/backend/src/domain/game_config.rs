//! Per-game rules, fixed when the game is created.

use serde::{Deserialize, Serialize};

use super::cards_logic::CardCatalog;
use super::cards_parsing::parse_card_lenient;
use super::cards_types::{Card, THREE_OF_CLUBS};
use crate::errors::domain::{DomainError, ValidationKind};

pub const DEFAULT_DECK_COUNT: u8 = 1;
pub const DEFAULT_EXPLODE_PILE_COUNT: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of standard 52-card decks shuffled together.
    pub deck_count: u8,
    /// Whether players may see how many cards opponents hold.
    pub show_hand_counts: bool,
    /// Consecutive same-rank cards that clear the pile; 0 disables.
    pub explode_pile_count: u8,
    /// The card that beats everything when led alone.
    pub power_card: Card,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            deck_count: DEFAULT_DECK_COUNT,
            show_hand_counts: true,
            explode_pile_count: DEFAULT_EXPLODE_PILE_COUNT,
            power_card: THREE_OF_CLUBS,
        }
    }
}

impl GameConfig {
    pub fn with_deck_count(mut self, deck_count: u8) -> Self {
        self.deck_count = deck_count;
        self
    }

    pub fn with_show_hand_counts(mut self, show: bool) -> Self {
        self.show_hand_counts = show;
        self
    }

    pub fn with_explode_pile_count(mut self, count: u8) -> Self {
        self.explode_pile_count = count;
        self
    }

    pub fn with_power_card(mut self, card: Card) -> Self {
        self.power_card = card;
        self
    }

    /// Set the power card from a user-entered alias ("3c", "10H").
    pub fn with_power_card_alias(self, alias: &str) -> Result<Self, DomainError> {
        let card = parse_card_lenient(alias).map_err(|_| {
            DomainError::validation(
                ValidationKind::InvalidConfig,
                format!("invalid power card entered: {alias}"),
            )
        })?;
        Ok(self.with_power_card(card))
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.deck_count == 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                "deck count must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn catalog(&self) -> CardCatalog {
        CardCatalog::new(self.power_card)
    }

    pub fn power_card_alias(&self) -> String {
        self.power_card.alias()
    }
}
