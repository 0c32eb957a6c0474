//! Domain layer: the round engine. Pure rules, no I/O.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod game_config;
pub mod passing;
pub mod pile;
pub mod player_view;
pub mod ranking;
pub mod round_lifecycle;
pub mod rules;
pub mod state;
pub mod turn_order;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_engine;
#[cfg(test)]
mod tests_round_lifecycle;

// Re-exports for ergonomics
pub use cards_logic::CardCatalog;
pub use cards_parsing::{parse_card_lenient, try_parse_cards};
pub use cards_types::{Card, Rank, Suit};
pub use dealing::{shuffle_and_deal, Deal};
pub use game_config::GameConfig;
pub use pile::ClearReason;
pub use player_view::{OpponentView, PassObligation, PlayerView};
pub use round_lifecycle::{
    deal_new_round, pass_cards, play_turn, start_first_round, start_new_round, TurnOutcome,
};
pub use rules::{can_play, validate_play, MAX_PLAYERS, MIN_PLAYERS};
pub use state::{FinishRank, Game, GameId, Hand, Player, PlayerId, Round, RoundPhase, Turn};
