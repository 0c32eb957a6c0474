use time::OffsetDateTime;
use tracing::info;

use super::mutation::check_conservation;
use super::GameFlowService;
use crate::domain::{self, GameId, Round};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::realtime::UpdatePublisher;
use crate::repos::{GameRepo, RoundRepo, Versioned};

impl<S, P> GameFlowService<S, P>
where
    S: GameRepo + RoundRepo,
    P: UpdatePublisher,
{
    /// Mark the game started and deal its first round.
    pub async fn start_game(&self, game_id: GameId) -> Result<Versioned<Round>, AppError> {
        info!(game_id, "Starting game");
        let round = self
            .with_conflict_retries(game_id, "start_game", || self.try_start_game(game_id))
            .await?;
        self.finish_mutation(game_id, &[]).await?;
        info!(
            game_id,
            round_no = round.value.round_no,
            players = round.value.hands.len(),
            "Game started"
        );
        Ok(round)
    }

    /// Deal the next round from the finished latest one.
    pub async fn start_new_round(&self, game_id: GameId) -> Result<Versioned<Round>, AppError> {
        let round = self
            .with_conflict_retries(game_id, "start_new_round", || {
                self.try_start_new_round(game_id)
            })
            .await?;
        self.finish_mutation(game_id, &[]).await?;
        info!(game_id, round_no = round.value.round_no, "New round started");
        Ok(round)
    }

    async fn try_start_game(&self, game_id: GameId) -> Result<Versioned<Round>, AppError> {
        let game = self.store.get_game(game_id).await?;
        let now = OffsetDateTime::now_utc();
        let round = {
            let mut rng = self.rng.lock();
            domain::start_first_round(&game.value, &mut *rng, now)?
        };
        check_conservation(&game.value, &round)?;

        // Claiming the game first means a lost race fails before any round exists.
        let mut started = game.value;
        started.started_at = Some(now);
        self.store.replace_game(started, game.version).await?;

        Ok(self.store.create_round(game_id, round).await?)
    }

    async fn try_start_new_round(&self, game_id: GameId) -> Result<Versioned<Round>, AppError> {
        let game = self.store.get_game(game_id).await?;
        if game.value.started_at.is_none() {
            return Err(DomainError::validation(
                ValidationKind::GameNotStarted,
                format!("Game {game_id} has not started"),
            )
            .into());
        }
        let previous = self.store.latest_round(game_id).await?.ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Round,
                format!("No previous round could be determined for game {game_id}"),
            )
        })?;

        let round = {
            let mut rng = self.rng.lock();
            domain::start_new_round(&previous.value, &game.value, &mut *rng, OffsetDateTime::now_utc())?
        };
        check_conservation(&game.value, &round)?;

        Ok(self.store.create_round(game_id, round).await?)
    }
}
