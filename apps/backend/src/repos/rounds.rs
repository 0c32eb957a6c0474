//! Round repository seam.

use async_trait::async_trait;

use super::games::Versioned;
use crate::domain::{GameId, Round};
use crate::errors::domain::DomainError;

#[async_trait]
pub trait RoundRepo: Send + Sync {
    /// All rounds of a game ordered by `round_no`.
    async fn list_rounds(&self, game_id: GameId) -> Result<Vec<Versioned<Round>>, DomainError>;

    /// The round that is started and not ended, if any.
    async fn current_round(&self, game_id: GameId)
        -> Result<Option<Versioned<Round>>, DomainError>;

    /// The round with the highest `round_no`, whatever its phase.
    async fn latest_round(&self, game_id: GameId) -> Result<Option<Versioned<Round>>, DomainError>;

    /// Store a new round. Fails with `OptimisticLock` if its `round_no` is taken.
    async fn create_round(
        &self,
        game_id: GameId,
        round: Round,
    ) -> Result<Versioned<Round>, DomainError>;

    /// Overwrite the round with the same `round_no` if it is still at
    /// `expected_version`.
    async fn replace_round(
        &self,
        game_id: GameId,
        round: Round,
        expected_version: i32,
    ) -> Result<Versioned<Round>, DomainError>;
}
