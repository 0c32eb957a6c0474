use std::future::Future;

use time::OffsetDateTime;
use tracing::{error, warn};

use super::GameFlowService;
use crate::domain::cards_logic::CARDS_PER_DECK;
use crate::domain::{Game, GameId, Round};
use crate::error::AppError;
use crate::errors::domain::{DomainError, InvariantKind};
use crate::realtime::UpdatePublisher;
use crate::repos::{GameRepo, RoundRepo, Versioned};

/// Result of a successful round mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    pub round: Versioned<Round>,
    /// Lines appended to the action log.
    pub log: Vec<String>,
}

impl<S, P> GameFlowService<S, P>
where
    S: GameRepo + RoundRepo,
    P: UpdatePublisher,
{
    /// Run `attempt` until it succeeds, fails for a non-retryable reason, or
    /// runs out of conflict retries.
    pub(super) async fn with_conflict_retries<T, F, Fut>(
        &self,
        game_id: GameId,
        operation: &'static str,
        mut attempt: F,
    ) -> Result<T, AppError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let max_retries = self.settings.max_conflict_retries;
        let mut retries = 0u32;
        loop {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && retries < max_retries => {
                    retries += 1;
                    warn!(game_id, operation, retries, detail = err.detail(), "Stale version, retrying");
                }
                Err(err) => {
                    if err.is_fatal() {
                        error!(game_id, operation, code = %err.code(), detail = err.detail(), "Game is corrupted");
                    } else if err.is_retryable() {
                        warn!(game_id, operation, retries, "Giving up after repeated conflicts");
                    }
                    return Err(err);
                }
            }
        }
    }

    /// Append the action log lines and notify observers.
    pub(super) async fn finish_mutation(
        &self,
        game_id: GameId,
        log: &[String],
    ) -> Result<(), AppError> {
        if !log.is_empty() {
            self.store
                .append_actions(game_id, log.to_vec(), OffsetDateTime::now_utc())
                .await?;
        }
        self.publisher.publish(game_id).await;
        Ok(())
    }
}

/// Every dealt card must still be somewhere in the round.
pub(super) fn check_conservation(game: &Game, round: &Round) -> Result<(), DomainError> {
    let expected = CARDS_PER_DECK * usize::from(game.config.deck_count);
    let actual = round.card_count();
    if actual != expected {
        return Err(DomainError::invariant(
            InvariantKind::CardConservation,
            format!(
                "Round {} of game {} holds {actual} cards, expected {expected}",
                round.round_no, game.id
            ),
        ));
    }
    Ok(())
}
