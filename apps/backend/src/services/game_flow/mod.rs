//! Game flow orchestration service: bridges the pure round engine with the
//! repositories and the update publisher.
//!
//! Each public operation loads the aggregate, runs one engine step, writes
//! the result back with a version check, appends the action log, and
//! publishes a notice. Stale writes are re-run up to
//! `EngineSettings::max_conflict_retries` times.

mod games;
mod mutation;
mod player_actions;
mod round_lifecycle;

use std::sync::Arc;

use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;

use crate::config::EngineSettings;
use crate::domain::{Game, Round};
use crate::realtime::UpdatePublisher;
use crate::repos::{ActionLogEntry, GameRepo, RoundRepo, Versioned};

pub use mutation::MutationOutcome;

/// Everything an observer needs to redraw a game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    pub game: Versioned<Game>,
    /// Latest round, live or finished.
    pub round: Option<Versioned<Round>>,
    pub log: Vec<ActionLogEntry>,
}

pub struct GameFlowService<S, P> {
    store: Arc<S>,
    publisher: Arc<P>,
    settings: EngineSettings,
    rng: Mutex<ChaCha8Rng>,
}

impl<S, P> GameFlowService<S, P>
where
    S: GameRepo + RoundRepo,
    P: UpdatePublisher,
{
    pub fn new(store: Arc<S>, publisher: Arc<P>, settings: EngineSettings) -> Self {
        let rng = match settings.deal_seed {
            Some(seed) => {
                info!(seed, "Dealing from a fixed seed");
                ChaCha8Rng::seed_from_u64(seed)
            }
            None => ChaCha8Rng::from_os_rng(),
        };
        Self {
            store,
            publisher,
            settings,
            rng: Mutex::new(rng),
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}
