//! Error codes exposed to callers of the game-flow service.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and stable across releases.

use core::fmt;

use crate::errors::domain::{ConflictKind, InvariantKind, NotFoundKind, ValidationKind};

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Play validation
    /// Acting hand is not the active hand
    OutOfTurn,
    /// Named card is not in the hand
    CardNotInHand,
    /// Cards do not beat the pile
    IllegalPlay,
    /// Game has no live round
    NoCurrentRound,
    /// Player must pass cards before playing
    AwaitingCardPass,
    /// Player does not owe any cards
    NotAwaitingPass,
    /// Cards passed to the wrong player
    WrongPassRecipient,
    /// Wrong number of cards passed
    WrongPassCount,
    /// Loser tried to keep a better card than one passed
    MustPassHighCards,
    /// Player has no hand in this round
    PlayerNotInRound,
    /// Card alias could not be parsed
    ParseCard,

    // Lifecycle validation
    /// A round is still being played
    PreviousRoundUnterminated,
    /// Game was already started
    GameAlreadyStarted,
    /// Game has not been started
    GameNotStarted,
    /// Fewer than three players
    NotEnoughPlayers,
    /// More players than the table supports
    TooManyPlayers,
    /// Player already seated in the game
    PlayerAlreadyJoined,
    /// Game config rejected
    InvalidConfig,
    /// General validation error
    ValidationError,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// Round not found
    RoundNotFound,
    /// General not found error
    NotFound,

    // Concurrency
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict
    Conflict,

    // Corrupted state
    /// No player can take the next turn
    NoEligiblePlayer,
    /// A finished round has an unranked hand
    MissingRank,
    /// Card passing partner cannot be determined
    NoComplementaryPartner,
    /// Cards were created or destroyed
    CardConservation,

    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::IllegalPlay => "ILLEGAL_PLAY",
            Self::NoCurrentRound => "NO_CURRENT_ROUND",
            Self::AwaitingCardPass => "AWAITING_CARD_PASS",
            Self::NotAwaitingPass => "NOT_AWAITING_PASS",
            Self::WrongPassRecipient => "WRONG_PASS_RECIPIENT",
            Self::WrongPassCount => "WRONG_PASS_COUNT",
            Self::MustPassHighCards => "MUST_PASS_HIGH_CARDS",
            Self::PlayerNotInRound => "PLAYER_NOT_IN_ROUND",
            Self::ParseCard => "PARSE_CARD",

            Self::PreviousRoundUnterminated => "PREVIOUS_ROUND_UNTERMINATED",
            Self::GameAlreadyStarted => "GAME_ALREADY_STARTED",
            Self::GameNotStarted => "GAME_NOT_STARTED",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::TooManyPlayers => "TOO_MANY_PLAYERS",
            Self::PlayerAlreadyJoined => "PLAYER_ALREADY_JOINED",
            Self::InvalidConfig => "INVALID_CONFIG",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::NoEligiblePlayer => "NO_ELIGIBLE_PLAYER",
            Self::MissingRank => "MISSING_RANK",
            Self::NoComplementaryPartner => "NO_COMPLEMENTARY_PARTNER",
            Self::CardConservation => "CARD_CONSERVATION",

            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&ValidationKind> for ErrorCode {
    fn from(kind: &ValidationKind) -> Self {
        match kind {
            ValidationKind::OutOfTurn => Self::OutOfTurn,
            ValidationKind::CardNotInHand => Self::CardNotInHand,
            ValidationKind::IllegalPlay => Self::IllegalPlay,
            ValidationKind::NoCurrentRound => Self::NoCurrentRound,
            ValidationKind::NotAwaitingPass => Self::NotAwaitingPass,
            ValidationKind::AwaitingCardPass => Self::AwaitingCardPass,
            ValidationKind::WrongPassRecipient => Self::WrongPassRecipient,
            ValidationKind::WrongPassCount => Self::WrongPassCount,
            ValidationKind::MustPassHighCards => Self::MustPassHighCards,
            ValidationKind::PreviousRoundUnterminated => Self::PreviousRoundUnterminated,
            ValidationKind::GameAlreadyStarted => Self::GameAlreadyStarted,
            ValidationKind::GameNotStarted => Self::GameNotStarted,
            ValidationKind::NotEnoughPlayers => Self::NotEnoughPlayers,
            ValidationKind::TooManyPlayers => Self::TooManyPlayers,
            ValidationKind::PlayerNotInRound => Self::PlayerNotInRound,
            ValidationKind::PlayerAlreadyJoined => Self::PlayerAlreadyJoined,
            ValidationKind::ParseCard => Self::ParseCard,
            ValidationKind::InvalidConfig => Self::InvalidConfig,
            ValidationKind::Other(_) => Self::ValidationError,
        }
    }
}

impl From<&InvariantKind> for ErrorCode {
    fn from(kind: &InvariantKind) -> Self {
        match kind {
            InvariantKind::NoEligiblePlayer => Self::NoEligiblePlayer,
            InvariantKind::MissingRank => Self::MissingRank,
            InvariantKind::NoComplementaryPartner => Self::NoComplementaryPartner,
            InvariantKind::CardConservation => Self::CardConservation,
        }
    }
}

impl From<&NotFoundKind> for ErrorCode {
    fn from(kind: &NotFoundKind) -> Self {
        match kind {
            NotFoundKind::Game => Self::GameNotFound,
            NotFoundKind::Round => Self::RoundNotFound,
            NotFoundKind::Other(_) => Self::NotFound,
        }
    }
}

impl From<&ConflictKind> for ErrorCode {
    fn from(kind: &ConflictKind) -> Self {
        match kind {
            ConflictKind::OptimisticLock => Self::OptimisticLock,
            ConflictKind::Other(_) => Self::Conflict,
        }
    }
}
