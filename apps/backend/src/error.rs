use thiserror::Error;

use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;

/// Error returned by the game-flow service.
///
/// Each variant keeps a stable [`ErrorCode`] so callers can render a targeted
/// message ("not your turn") rather than a generic failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Game is corrupted: {detail}")]
    Corrupted { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Helper method to extract error code from any error variant
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::Corrupted { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Helper method to extract error detail from any error variant
    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. } => detail,
            AppError::NotFound { detail, .. } => detail,
            AppError::Conflict { detail, .. } => detail,
            AppError::Corrupted { detail, .. } => detail,
            AppError::Config { detail } => detail,
        }
    }

    /// Whether re-fetching and re-submitting the same intent may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Conflict { code, .. } if *code == ErrorCode::OptimisticLock)
    }

    /// Whether the game is in a state the engine refuses to continue from.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Corrupted { .. })
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => AppError::Validation {
                code: ErrorCode::from(&kind),
                detail,
            },
            DomainError::Invariant(kind, detail) => AppError::Corrupted {
                code: ErrorCode::from(&kind),
                detail,
            },
            DomainError::Conflict(kind, detail) => AppError::Conflict {
                code: ErrorCode::from(&kind),
                detail,
            },
            DomainError::NotFound(kind, detail) => AppError::NotFound {
                code: ErrorCode::from(&kind),
                detail,
            },
        }
    }
}
