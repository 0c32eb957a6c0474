//! Game repository seam.
//!
//! Every read returns the aggregate together with its lock version; writes
//! are compare-and-swap on that version and fail with
//! `ConflictKind::OptimisticLock` when another writer got there first.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::{Game, GameConfig, GameId, Player};
use crate::errors::domain::DomainError;

/// A stored value plus the lock version it was read at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Versioned<T> {
    pub value: T,
    pub version: i32,
}

impl<T> Versioned<T> {
    pub fn new(value: T, version: i32) -> Self {
        Self { value, version }
    }
}

/// Everything needed to create a game; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
    pub name: String,
    pub host: Player,
    pub config: GameConfig,
    pub created_at: OffsetDateTime,
}

/// One human-readable line in a game's action log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[async_trait]
pub trait GameRepo: Send + Sync {
    /// Create a game with the host as its only player.
    async fn create_game(&self, new_game: NewGame) -> Result<Versioned<Game>, DomainError>;

    /// `NotFoundKind::Game` if no such game.
    async fn get_game(&self, game_id: GameId) -> Result<Versioned<Game>, DomainError>;

    /// Overwrite the game if it is still at `expected_version`.
    async fn replace_game(
        &self,
        game: Game,
        expected_version: i32,
    ) -> Result<Versioned<Game>, DomainError>;

    async fn append_actions(
        &self,
        game_id: GameId,
        messages: Vec<String>,
        at: OffsetDateTime,
    ) -> Result<(), DomainError>;

    /// Oldest first.
    async fn action_log(&self, game_id: GameId) -> Result<Vec<ActionLogEntry>, DomainError>;
}
