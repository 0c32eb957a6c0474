//! Repository traits for the service layer.

pub mod games;
pub mod rounds;

pub use games::{ActionLogEntry, GameRepo, NewGame, Versioned};
pub use rounds::RoundRepo;
