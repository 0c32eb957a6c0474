#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod realtime;
pub mod repos;
pub mod services;
pub mod telemetry;

// Re-exports for public API
pub use adapters::MemoryStore;
pub use config::EngineSettings;
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use realtime::{BroadcastBroker, EventEnvelope, NoopPublisher, UpdatePublisher};
pub use repos::{ActionLogEntry, GameRepo, NewGame, RoundRepo, Versioned};
pub use services::{GameFlowService, GameState, MutationOutcome};

// Prelude for test convenience
pub mod prelude {
    pub use super::config::*;
    pub use super::domain::*;
    pub use super::error::*;
    pub use super::errors::*;
    pub use super::realtime::*;
    pub use super::repos::*;
    pub use super::services::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
