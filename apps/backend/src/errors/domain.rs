//! Domain-level error type used by the round engine and the game-flow service.
//!
//! This error type is transport- and storage-agnostic. Service callers receive
//! `crate::error::AppError`, converted from `DomainError` via
//! `From<DomainError> for AppError`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Rule violations a player can recover from by submitting a different intent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    OutOfTurn,
    CardNotInHand,
    IllegalPlay,
    NoCurrentRound,
    NotAwaitingPass,
    AwaitingCardPass,
    WrongPassRecipient,
    WrongPassCount,
    MustPassHighCards,
    PreviousRoundUnterminated,
    GameAlreadyStarted,
    GameNotStarted,
    NotEnoughPlayers,
    TooManyPlayers,
    PlayerNotInRound,
    PlayerAlreadyJoined,
    ParseCard,
    InvalidConfig,
    Other(String),
}

/// States that can only be reached through a corrupted round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvariantKind {
    NoEligiblePlayer,
    MissingRank,
    NoComplementaryPartner,
    CardConservation,
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Round,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    OptimisticLock,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Illegal intent; nothing was mutated
    Validation(ValidationKind, String),
    /// Corrupted round; the game cannot continue without intervention
    Invariant(InvariantKind, String),
    /// Stale aggregate version
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Invariant(kind, d) => write!(f, "invariant violated {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn invariant(kind: InvariantKind, detail: impl Into<String>) -> Self {
        Self::Invariant(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    /// The validation kind, if this is a validation error.
    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            _ => None,
        }
    }

    /// The invariant kind, if this error reports a corrupted round.
    pub fn invariant_kind(&self) -> Option<&InvariantKind> {
        match self {
            DomainError::Invariant(kind, _) => Some(kind),
            _ => None,
        }
    }
}
