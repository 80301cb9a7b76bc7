//! Data-driven content for the trivia maze.
//!
//! - Question catalogs (data-driven via RON)
//! - Game settings and maze layout (data-driven via TOML)
//! - [`QuestionPool`], the shuffled question source handed to maze generators
//!
//! Content is loaded once at start-up and injected; nothing here is global.

pub mod pool;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use pool::{PoolError, QuestionPool};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, GameConfigFile, QuestionCatalog, QuestionLoader};
