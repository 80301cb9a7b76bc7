//! Repository layer for saved games.
//!
//! Static content (question catalogs, configuration) is handled by
//! `maze-content` loaders, not repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileSaveRepository, SaveFormat};
pub use memory::InMemorySaveRepository;
pub use traits::SaveRepository;
