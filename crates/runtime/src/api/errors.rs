//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from maze generation, save repositories and the question
//! protocol so clients can bubble them up with consistent context.
use maze_core::{ErrorSeverity, GameError, GeneratorError, QuestionError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to generate maze")]
    Generation(#[from] GeneratorError),

    #[error("save/load failed")]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Question(#[from] QuestionError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Generation(error) => error.severity(),
            RuntimeError::Repository(error) => error.severity(),
            RuntimeError::Question(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Generation(error) => error.error_code(),
            RuntimeError::Repository(error) => error.error_code(),
            RuntimeError::Question(error) => error.error_code(),
        }
    }
}
