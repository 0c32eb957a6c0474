//! Player view of a round: what one seat is allowed to see.
//!
//! Opponents' cards are never exposed. Their hand sizes are shown only when
//! the game's `show_hand_counts` rule is on.
//!
//! `PlayerView` is also what bots decide from; use [`PlayerView::legal_plays`]
//! rather than re-implementing the rules.

use std::collections::BTreeMap;

use serde::Serialize;

use super::cards_logic::CardCatalog;
use super::passing::{cards_owed, pass_partner, passes_high_cards, suggest_pass};
use super::rules::can_play;
use super::state::{FinishRank, Game, PlayerId, Round, RoundPhase, Turn};
use super::Card;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpponentView {
    pub player_id: PlayerId,
    pub name: String,
    /// `None` when hand counts are hidden.
    pub card_count: Option<usize>,
    pub is_active: bool,
    pub has_passed: bool,
    pub end_rank: Option<FinishRank>,
}

/// Cards this player still owes before they can play.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassObligation {
    pub receiver_id: PlayerId,
    pub receiver_name: String,
    pub cards_owed: usize,
    /// Must the highest cards be given up?
    pub high_cards: bool,
    /// Pre-selected cards; only filled in for high-card passers.
    pub suggested: Vec<Card>,
}

impl PassObligation {
    /// One-line prompt for the owing player.
    pub fn prompt(&self) -> String {
        format!(
            "you owe your {} {} card{} to {}",
            self.cards_owed,
            if self.high_cards { "highest" } else { "least desired" },
            if self.cards_owed > 1 { "s" } else { "" },
            self.receiver_name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub round_no: u32,
    pub phase: RoundPhase,
    pub player_id: PlayerId,
    pub hand: Vec<Card>,
    pub is_active: bool,
    pub ready_to_play: bool,
    pub has_passed: bool,
    pub start_rank: Option<FinishRank>,
    pub end_rank: Option<FinishRank>,
    /// Every other seat, in seating order.
    pub opponents: Vec<OpponentView>,
    pub play_to_beat: Option<Turn>,
    pub pass_obligation: Option<PassObligation>,
    pub power_card: Card,
}

impl PlayerView {
    pub fn for_player(round: &Round, game: &Game, player_id: PlayerId) -> Result<Self, DomainError> {
        let idx = round.hand_index(player_id).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::PlayerNotInRound,
                format!("Player {player_id} has no hand in round {}", round.round_no),
            )
        })?;
        let own = &round.hands[idx];
        let show_counts = game.config.show_hand_counts;

        let opponents = round
            .hands
            .iter()
            .filter(|h| h.player_id != player_id)
            .map(|h| OpponentView {
                player_id: h.player_id,
                name: game.player_name(h.player_id).to_owned(),
                card_count: show_counts.then_some(h.cards.len()),
                is_active: h.is_active,
                has_passed: h.has_passed,
                end_rank: h.end_rank,
            })
            .collect();

        let pass_obligation = if own.ready_to_play || !round.is_active() {
            None
        } else {
            pass_obligation(round, game, idx)?
        };

        Ok(Self {
            round_no: round.round_no,
            phase: round.phase(),
            player_id,
            hand: own.cards.clone(),
            is_active: own.is_active,
            ready_to_play: own.ready_to_play,
            has_passed: own.has_passed,
            start_rank: own.start_rank,
            end_rank: own.end_rank,
            opponents,
            play_to_beat: round.last_turn().cloned(),
            pass_obligation,
            power_card: game.config.power_card,
        })
    }

    /// May this player act right now?
    pub fn can_act(&self) -> bool {
        self.phase == RoundPhase::Active && self.is_active && self.ready_to_play
    }

    /// Every distinct legal play from this hand, lowest first.
    ///
    /// Copies of the same card are not distinguished, so each ordinal yields
    /// at most one candidate per set size.
    pub fn legal_plays(&self) -> Vec<Vec<Card>> {
        let catalog = CardCatalog::new(self.power_card);
        let previous = self.play_to_beat.as_ref();

        let mut by_ordinal: BTreeMap<u8, Vec<Card>> = BTreeMap::new();
        for card in &self.hand {
            by_ordinal.entry(catalog.ordinal(*card)).or_default().push(*card);
        }

        let sizes = |available: usize| -> Vec<usize> {
            match previous {
                Some(turn) => vec![turn.cards.len()],
                None => (1..=available).collect(),
            }
        };

        let mut plays: Vec<Vec<Card>> = Vec::new();
        for group in by_ordinal.values() {
            for size in sizes(group.len()) {
                if size > group.len() {
                    continue;
                }
                let candidate = group[..size].to_vec();
                if can_play(&catalog, &candidate, previous) {
                    plays.push(candidate);
                }
            }
        }

        if previous.is_some_and(|t| t.cards.len() != 1) && self.hand.contains(&self.power_card) {
            plays.push(vec![self.power_card]);
        }
        plays
    }

    /// The cheapest legal play, if any.
    pub fn lowest_legal_play(&self) -> Option<Vec<Card>> {
        self.legal_plays().into_iter().next()
    }
}

fn pass_obligation(
    round: &Round,
    game: &Game,
    idx: usize,
) -> Result<Option<PassObligation>, DomainError> {
    let hand = &round.hands[idx];
    let Some(rank) = hand.start_rank else {
        return Ok(None);
    };
    let hand_count = round.hands.len();
    let owed = cards_owed(rank, hand_count);
    if owed == 0 {
        return Ok(None);
    }

    let partner = &round.hands[pass_partner(round, idx)?.index];
    let high_cards = passes_high_cards(rank, hand_count);
    let suggested = if high_cards {
        suggest_pass(&hand.cards, owed, &game.config.catalog())
    } else {
        Vec::new()
    };

    Ok(Some(PassObligation {
        receiver_id: partner.player_id,
        receiver_name: game.player_name(partner.player_id).to_owned(),
        cards_owed: owed,
        high_cards,
        suggested,
    }))
}
