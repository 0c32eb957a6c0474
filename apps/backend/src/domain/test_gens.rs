// Proptest generators and fixtures for domain types.

use proptest::prelude::*;
use time::OffsetDateTime;

use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::game_config::GameConfig;
use crate::domain::state::{Game, Hand, Player, Round, Turn};
use crate::domain::{Card, PlayerId, Rank, Suit};

/// Generate a random Suit
pub fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

/// Generate a random Rank
pub fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

pub fn card() -> impl Strategy<Value = Card> {
    (rank(), suit()).prop_map(|(rank, suit)| Card::new(rank, suit))
}

/// A uniform set of 1-4 cards sharing one rank (distinct suits).
pub fn uniform_set() -> impl Strategy<Value = Vec<Card>> {
    (rank(), 1usize..=4).prop_flat_map(|(rank, size)| {
        Just(Suit::ALL.to_vec())
            .prop_shuffle()
            .prop_map(move |suits| {
                suits
                    .into_iter()
                    .take(size)
                    .map(|suit| Card::new(rank, suit))
                    .collect()
            })
    })
}

/// Table shape for a full-round simulation.
#[derive(Debug, Clone)]
pub struct TableSetup {
    pub players: usize,
    pub config: GameConfig,
    pub seed: u64,
}

pub fn table_setup() -> impl Strategy<Value = TableSetup> {
    (3usize..=7, 1u8..=2, 0u8..=4, card(), any::<u64>()).prop_map(
        |(players, deck_count, explode, power_card, seed)| TableSetup {
            players,
            config: GameConfig::default()
                .with_deck_count(deck_count)
                .with_explode_pile_count(explode)
                .with_power_card(power_card),
            seed,
        },
    )
}

/// Seat flags for turn-order properties: (has_passed, has_cards, ranked).
pub fn seat_flags() -> impl Strategy<Value = (Vec<(bool, bool, bool)>, usize)> {
    prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 2..=8)
        .prop_flat_map(|flags| {
            let len = flags.len();
            (Just(flags), 0..len)
        })
}

pub fn hands_from_flags(flags: &[(bool, bool, bool)]) -> Vec<Hand> {
    flags
        .iter()
        .enumerate()
        .map(|(i, &(passed, has_cards, ranked))| {
            let cards = if has_cards { cards(&["4H"]) } else { vec![] };
            let mut hand = Hand::new(i as PlayerId + 1, cards);
            hand.has_passed = passed;
            hand.end_rank = ranked.then_some(i as u8);
            hand
        })
        .collect()
}

// Fixtures

pub fn cards(aliases: &[&str]) -> Vec<Card> {
    try_parse_cards(aliases).unwrap()
}

pub fn epoch() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH
}

/// Players 1..=n named "P1".."Pn"; game not yet started.
pub fn game_with_players(n: usize, config: GameConfig) -> Game {
    Game {
        id: 1,
        name: "test table".into(),
        host_id: 1,
        config,
        players: (1..=n as PlayerId)
            .map(|id| Player::new(id, format!("P{id}")))
            .collect(),
        created_at: epoch(),
        started_at: None,
    }
}

/// An active round with the given hands; seat 0 is active.
pub fn active_round(hands: &[&[&str]]) -> Round {
    let mut hands: Vec<Hand> = hands
        .iter()
        .enumerate()
        .map(|(i, aliases)| Hand::new(i as PlayerId + 1, cards(aliases)))
        .collect();
    hands[0].is_active = true;
    Round {
        round_no: 1,
        hands,
        active_pile: vec![],
        discard_pile: vec![],
        excess_cards: vec![],
        started_at: Some(epoch()),
        ended_at: None,
    }
}

pub fn turn(player_id: PlayerId, aliases: &[&str]) -> Turn {
    Turn {
        cards: cards(aliases),
        player_id,
        played_at: epoch(),
        took_the_pile: false,
    }
}
