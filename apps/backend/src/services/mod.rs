//! Service layer: orchestrates the round engine over the repositories.

pub mod game_flow;

pub use game_flow::{GameFlowService, GameState, MutationOutcome};
