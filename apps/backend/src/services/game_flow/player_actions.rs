use time::OffsetDateTime;
use tracing::{debug, info};

use super::mutation::{check_conservation, MutationOutcome};
use super::GameFlowService;
use crate::domain::{self, GameId, PlayerId, Round, TurnOutcome};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::realtime::UpdatePublisher;
use crate::repos::{GameRepo, RoundRepo, Versioned};

impl<S, P> GameFlowService<S, P>
where
    S: GameRepo + RoundRepo,
    P: UpdatePublisher,
{
    /// Play cards (or pass, with no aliases) for the active player.
    pub async fn play_turn(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        aliases: &[String],
    ) -> Result<MutationOutcome, AppError> {
        debug!(game_id, player_id, cards = ?aliases, "Playing turn");

        let outcome = self
            .with_conflict_retries(game_id, "play_turn", || {
                self.try_play_turn(game_id, player_id, aliases)
            })
            .await?;
        self.finish_mutation(game_id, &outcome.log).await?;

        let round = &outcome.round;
        if !round.value.is_active() {
            info!(
                game_id,
                round_no = round.value.round_no,
                version = round.version,
                "Round finished"
            );
        }
        Ok(outcome)
    }

    /// Hand owed cards from `giver` to `receiver` at the start of a round.
    pub async fn pass_cards(
        &self,
        game_id: GameId,
        giver: PlayerId,
        receiver: PlayerId,
        aliases: &[String],
    ) -> Result<MutationOutcome, AppError> {
        debug!(game_id, giver, receiver, count = aliases.len(), "Passing cards");

        let outcome = self
            .with_conflict_retries(game_id, "pass_cards", || {
                self.try_pass_cards(game_id, giver, receiver, aliases)
            })
            .await?;
        self.finish_mutation(game_id, &outcome.log).await?;
        Ok(outcome)
    }

    /// Free-form line into the game's action log.
    pub async fn post_message(&self, game_id: GameId, message: &str) -> Result<(), AppError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::Other("EMPTY_MESSAGE".into()),
                "Message must not be empty",
            )
            .into());
        }
        self.store.get_game(game_id).await?;
        self.finish_mutation(game_id, &[message.to_owned()]).await
    }

    async fn try_play_turn(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        aliases: &[String],
    ) -> Result<MutationOutcome, AppError> {
        let game = self.store.get_game(game_id).await?;
        let current = self.require_current_round(game_id, game.value.started_at.is_some()).await?;

        let TurnOutcome { round, log } = domain::play_turn(
            &current.value,
            &game.value,
            player_id,
            aliases,
            OffsetDateTime::now_utc(),
        )?;
        check_conservation(&game.value, &round)?;

        let stored = self
            .store
            .replace_round(game_id, round, current.version)
            .await?;
        Ok(MutationOutcome { round: stored, log })
    }

    async fn try_pass_cards(
        &self,
        game_id: GameId,
        giver: PlayerId,
        receiver: PlayerId,
        aliases: &[String],
    ) -> Result<MutationOutcome, AppError> {
        let game = self.store.get_game(game_id).await?;
        let current = self.require_current_round(game_id, game.value.started_at.is_some()).await?;

        let TurnOutcome { round, log } =
            domain::pass_cards(&current.value, &game.value, giver, receiver, aliases)?;
        check_conservation(&game.value, &round)?;

        let stored = self
            .store
            .replace_round(game_id, round, current.version)
            .await?;
        Ok(MutationOutcome { round: stored, log })
    }

    pub(super) async fn require_current_round(
        &self,
        game_id: GameId,
        game_started: bool,
    ) -> Result<Versioned<Round>, AppError> {
        if !game_started {
            return Err(DomainError::validation(
                ValidationKind::GameNotStarted,
                format!("Game {game_id} has not started"),
            )
            .into());
        }
        self.store.current_round(game_id).await?.ok_or_else(|| {
            DomainError::validation(
                ValidationKind::NoCurrentRound,
                format!("No active round found for game {game_id}"),
            )
            .into()
        })
    }
}
