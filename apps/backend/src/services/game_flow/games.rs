use time::OffsetDateTime;
use tracing::{debug, info};

use super::{GameFlowService, GameState};
use crate::domain::{Game, GameConfig, GameId, Player, PlayerId, PlayerView, MAX_PLAYERS};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::realtime::UpdatePublisher;
use crate::repos::{GameRepo, NewGame, RoundRepo, Versioned};

impl<S, P> GameFlowService<S, P>
where
    S: GameRepo + RoundRepo,
    P: UpdatePublisher,
{
    /// Create a game hosted (and joined) by `host`.
    pub async fn create_game(
        &self,
        name: &str,
        host: Player,
        config: GameConfig,
    ) -> Result<Versioned<Game>, AppError> {
        config.validate()?;
        let host_id = host.id;
        let game = self
            .store
            .create_game(NewGame {
                name: name.trim().to_owned(),
                host,
                config,
                created_at: OffsetDateTime::now_utc(),
            })
            .await?;
        info!(game_id = game.value.id, host_id, "Game created");
        Ok(game)
    }

    /// Seat a player at the end of the table. Only before the game starts.
    pub async fn add_player(
        &self,
        game_id: GameId,
        player: Player,
    ) -> Result<Versioned<Game>, AppError> {
        let game = self
            .with_conflict_retries(game_id, "add_player", || {
                self.try_add_player(game_id, player.clone())
            })
            .await?;
        self.finish_mutation(game_id, &[]).await?;
        info!(
            game_id,
            player_id = player.id,
            seats = game.value.players.len(),
            "Player joined"
        );
        Ok(game)
    }

    /// What `player_id` may see of the latest round.
    pub async fn player_view(
        &self,
        game_id: GameId,
        player_id: PlayerId,
    ) -> Result<PlayerView, AppError> {
        let game = self.store.get_game(game_id).await?;
        let round = self.store.latest_round(game_id).await?.ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Round,
                format!("Game {game_id} has no rounds yet"),
            )
        })?;
        Ok(PlayerView::for_player(&round.value, &game.value, player_id)?)
    }

    pub async fn game_state(&self, game_id: GameId) -> Result<GameState, AppError> {
        let game = self.store.get_game(game_id).await?;
        let round = self.store.latest_round(game_id).await?;
        let log = self.store.action_log(game_id).await?;
        Ok(GameState { game, round, log })
    }

    async fn try_add_player(
        &self,
        game_id: GameId,
        player: Player,
    ) -> Result<Versioned<Game>, AppError> {
        let Versioned { value: mut game, version } = self.store.get_game(game_id).await?;
        if game.started_at.is_some() {
            return Err(DomainError::validation(
                ValidationKind::GameAlreadyStarted,
                format!("Game {game_id} has already started"),
            )
            .into());
        }
        if game.has_player(player.id) {
            return Err(DomainError::validation(
                ValidationKind::PlayerAlreadyJoined,
                format!("Player {} is already in game {game_id}", player.id),
            )
            .into());
        }
        if game.players.len() >= MAX_PLAYERS {
            return Err(DomainError::validation(
                ValidationKind::TooManyPlayers,
                format!("Game {game_id} is full"),
            )
            .into());
        }

        debug!(game_id, player_id = player.id, version, "Seating player");
        game.players.push(player);
        Ok(self.store.replace_game(game, version).await?)
    }
}
