//! Round snapshot types: Player, Game, Hand, Turn, Round.
//!
//! The engine treats a `Round` as a value: operations take a reference and
//! return a new snapshot. Persisting and broadcasting it is the caller's job.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::game_config::GameConfig;
use super::rules::join_aliases;
use super::Card;
use crate::errors::domain::{DomainError, ValidationKind};

pub type PlayerId = i64;
pub type GameId = i64;
/// Finishing position; 0 is the winner.
pub type FinishRank = u8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Game-level data the engine needs: rules and seating order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub name: String,
    pub host_id: PlayerId,
    pub config: GameConfig,
    /// Seating order; hands are dealt in this order.
    pub players: Vec<Player>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub started_at: Option<OffsetDateTime>,
}

impl Game {
    /// Display name for log lines.
    pub fn player_name(&self, id: PlayerId) -> &str {
        self.players
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
            .unwrap_or("UNKNOWN PLAYER")
    }

    pub fn has_player(&self, id: PlayerId) -> bool {
        self.players.iter().any(|p| p.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub player_id: PlayerId,
    pub cards: Vec<Card>,
    pub is_active: bool,
    pub has_passed: bool,
    pub ready_to_play: bool,
    pub start_rank: Option<FinishRank>,
    pub end_rank: Option<FinishRank>,
}

impl Hand {
    pub fn new(player_id: PlayerId, cards: Vec<Card>) -> Self {
        Self {
            player_id,
            cards,
            is_active: false,
            has_passed: false,
            ready_to_play: true,
            start_rank: None,
            end_rank: None,
        }
    }

    /// Still holding cards and not yet ranked.
    pub fn is_in(&self) -> bool {
        self.end_rank.is_none() && !self.cards.is_empty()
    }

    /// Remove `wanted` from the hand, first matching copy each.
    ///
    /// All or nothing: if any card is missing the hand is left untouched.
    pub fn take_cards(&mut self, wanted: &[Card]) -> Result<Vec<Card>, DomainError> {
        let mut remaining = self.cards.clone();
        let mut taken = Vec::with_capacity(wanted.len());
        for card in wanted {
            let Some(pos) = remaining.iter().position(|c| c == card) else {
                return Err(DomainError::validation(
                    ValidationKind::CardNotInHand,
                    format!(
                        "Unable to find one or more of the following cards in player {}'s hand: {}",
                        self.player_id,
                        join_aliases(wanted)
                    ),
                ));
            };
            taken.push(remaining.remove(pos));
        }
        self.cards = remaining;
        Ok(taken)
    }
}

/// One play into the pile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub cards: Vec<Card>,
    pub player_id: PlayerId,
    #[serde(with = "time::serde::rfc3339")]
    pub played_at: OffsetDateTime,
    #[serde(default)]
    pub took_the_pile: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    NotStarted,
    Active,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based position of this round within its game.
    pub round_no: u32,
    pub hands: Vec<Hand>,
    pub active_pile: Vec<Turn>,
    pub discard_pile: Vec<Turn>,
    /// Cards left over after an even deal; never played.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excess_cards: Vec<Card>,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub started_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub ended_at: Option<OffsetDateTime>,
}

impl Round {
    pub fn phase(&self) -> RoundPhase {
        match (self.started_at, self.ended_at) {
            (_, Some(_)) => RoundPhase::Ended,
            (Some(_), None) => RoundPhase::Active,
            (None, None) => RoundPhase::NotStarted,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase() == RoundPhase::Active
    }

    pub fn hand_index(&self, player_id: PlayerId) -> Option<usize> {
        self.hands.iter().position(|h| h.player_id == player_id)
    }

    pub fn hand(&self, player_id: PlayerId) -> Option<&Hand> {
        self.hands.iter().find(|h| h.player_id == player_id)
    }

    pub fn active_hand_index(&self) -> Option<usize> {
        self.hands.iter().position(|h| h.is_active)
    }

    /// The play to beat, if the pile is not empty.
    pub fn last_turn(&self) -> Option<&Turn> {
        self.active_pile.last()
    }

    /// Every card in the round: hands, both piles, and excess.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.hands
            .iter()
            .flat_map(|h| h.cards.iter())
            .chain(self.active_pile.iter().flat_map(|t| t.cards.iter()))
            .chain(self.discard_pile.iter().flat_map(|t| t.cards.iter()))
            .chain(self.excess_cards.iter())
    }

    pub fn card_count(&self) -> usize {
        self.all_cards().count()
    }
}
