//! Repository contract for saving and loading a game.

use maze_core::GameSnapshot;

use crate::repository::Result;

/// Single-slot storage for a saved game.
///
/// Saving replaces whatever was stored before; there is no partial or
/// incremental save.
pub trait SaveRepository: Send + Sync {
    /// Persist `snapshot`, replacing any previous save.
    fn save(&self, snapshot: &GameSnapshot) -> Result<()>;

    /// Load the saved game, or `None` if nothing was saved.
    fn load(&self) -> Result<Option<GameSnapshot>>;

    /// Check if a save exists
    fn exists(&self) -> bool;

    /// Delete the save, if any
    fn delete(&self) -> Result<()>;

    /// Where the save lives, for messages.
    fn location(&self) -> String;
}
