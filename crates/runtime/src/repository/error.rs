//! Error types raised by repository implementations.

use maze_core::{ErrorSeverity, GameError, SnapshotError};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("save repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("no saved game at {0}")]
    NotFound(String),

    #[error("saved game is inconsistent: {0}")]
    Snapshot(#[from] SnapshotError),
}

impl GameError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RepositoryError::NotFound(_) => ErrorSeverity::Recoverable,
            RepositoryError::Io(_) => ErrorSeverity::Recoverable,
            RepositoryError::Serialization(_)
            | RepositoryError::Json(_)
            | RepositoryError::Snapshot(_) => ErrorSeverity::Validation,
            RepositoryError::LockPoisoned => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RepositoryError::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            RepositoryError::Io(_) => "REPOSITORY_IO",
            RepositoryError::Serialization(_) => "REPOSITORY_SERIALIZATION",
            RepositoryError::Json(_) => "REPOSITORY_JSON",
            RepositoryError::NotFound(_) => "REPOSITORY_NOT_FOUND",
            RepositoryError::Snapshot(_) => "REPOSITORY_SNAPSHOT",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
