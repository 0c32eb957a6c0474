//! In-memory store implementing the game and round repositories.
//!
//! Each game's aggregate lives in one `DashMap` entry, so a write locks only
//! that game's shard. Versions start at 1 and bump on every write.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use time::OffsetDateTime;
use tracing::debug;

use crate::domain::{Game, GameId, Round};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::{ActionLogEntry, GameRepo, NewGame, RoundRepo, Versioned};

const INITIAL_VERSION: i32 = 1;

#[derive(Debug)]
struct GameRecord {
    game: Versioned<Game>,
    rounds: Vec<Versioned<Round>>,
    actions: Vec<ActionLogEntry>,
}

#[derive(Debug)]
pub struct MemoryStore {
    next_id: AtomicI64,
    games: DashMap<GameId, GameRecord>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            games: DashMap::new(),
        }
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }
}

fn game_not_found(game_id: GameId) -> DomainError {
    DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
}

fn stale(what: &str, expected: i32, actual: i32) -> DomainError {
    DomainError::conflict(
        ConflictKind::OptimisticLock,
        format!(
            "{what} was modified concurrently (expected version {expected}, actual version {actual}). Please refresh and retry."
        ),
    )
}

#[async_trait]
impl GameRepo for MemoryStore {
    async fn create_game(&self, new_game: NewGame) -> Result<Versioned<Game>, DomainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let game = Game {
            id,
            name: new_game.name,
            host_id: new_game.host.id,
            config: new_game.config,
            players: vec![new_game.host],
            created_at: new_game.created_at,
            started_at: None,
        };
        let versioned = Versioned::new(game, INITIAL_VERSION);
        self.games.insert(
            id,
            GameRecord {
                game: versioned.clone(),
                rounds: Vec::new(),
                actions: Vec::new(),
            },
        );
        debug!(game_id = id, "Game stored");
        Ok(versioned)
    }

    async fn get_game(&self, game_id: GameId) -> Result<Versioned<Game>, DomainError> {
        self.games
            .get(&game_id)
            .map(|record| record.game.clone())
            .ok_or_else(|| game_not_found(game_id))
    }

    async fn replace_game(
        &self,
        game: Game,
        expected_version: i32,
    ) -> Result<Versioned<Game>, DomainError> {
        let mut record = self
            .games
            .get_mut(&game.id)
            .ok_or_else(|| game_not_found(game.id))?;
        let current = record.game.version;
        if current != expected_version {
            return Err(stale("Game", expected_version, current));
        }
        record.game = Versioned::new(game, current + 1);
        Ok(record.game.clone())
    }

    async fn append_actions(
        &self,
        game_id: GameId,
        messages: Vec<String>,
        at: OffsetDateTime,
    ) -> Result<(), DomainError> {
        let mut record = self
            .games
            .get_mut(&game_id)
            .ok_or_else(|| game_not_found(game_id))?;
        record
            .actions
            .extend(messages.into_iter().map(|message| ActionLogEntry {
                message,
                created_at: at,
            }));
        Ok(())
    }

    async fn action_log(&self, game_id: GameId) -> Result<Vec<ActionLogEntry>, DomainError> {
        self.games
            .get(&game_id)
            .map(|record| record.actions.clone())
            .ok_or_else(|| game_not_found(game_id))
    }
}

#[async_trait]
impl RoundRepo for MemoryStore {
    async fn list_rounds(&self, game_id: GameId) -> Result<Vec<Versioned<Round>>, DomainError> {
        self.games
            .get(&game_id)
            .map(|record| record.rounds.clone())
            .ok_or_else(|| game_not_found(game_id))
    }

    async fn current_round(
        &self,
        game_id: GameId,
    ) -> Result<Option<Versioned<Round>>, DomainError> {
        let record = self
            .games
            .get(&game_id)
            .ok_or_else(|| game_not_found(game_id))?;
        Ok(record
            .rounds
            .iter()
            .find(|r| r.value.is_active())
            .cloned())
    }

    async fn latest_round(
        &self,
        game_id: GameId,
    ) -> Result<Option<Versioned<Round>>, DomainError> {
        let record = self
            .games
            .get(&game_id)
            .ok_or_else(|| game_not_found(game_id))?;
        Ok(record
            .rounds
            .iter()
            .max_by_key(|r| r.value.round_no)
            .cloned())
    }

    async fn create_round(
        &self,
        game_id: GameId,
        round: Round,
    ) -> Result<Versioned<Round>, DomainError> {
        let mut record = self
            .games
            .get_mut(&game_id)
            .ok_or_else(|| game_not_found(game_id))?;
        if record
            .rounds
            .iter()
            .any(|r| r.value.round_no == round.round_no)
        {
            return Err(DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!("Round {} of game {game_id} already exists", round.round_no),
            ));
        }
        let versioned = Versioned::new(round, INITIAL_VERSION);
        record.rounds.push(versioned.clone());
        record.rounds.sort_by_key(|r| r.value.round_no);
        Ok(versioned)
    }

    async fn replace_round(
        &self,
        game_id: GameId,
        round: Round,
        expected_version: i32,
    ) -> Result<Versioned<Round>, DomainError> {
        let mut record = self
            .games
            .get_mut(&game_id)
            .ok_or_else(|| game_not_found(game_id))?;
        let round_no = round.round_no;
        let slot = record
            .rounds
            .iter_mut()
            .find(|r| r.value.round_no == round_no)
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Round,
                    format!("Round {round_no} of game {game_id} not found"),
                )
            })?;
        if slot.version != expected_version {
            return Err(stale("Round", expected_version, slot.version));
        }
        *slot = Versioned::new(round, slot.version + 1);
        Ok(slot.clone())
    }
}
