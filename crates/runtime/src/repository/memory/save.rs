//! In-memory SaveRepository implementation for tests and local runs.

use std::sync::RwLock;

use maze_core::GameSnapshot;

use crate::repository::{RepositoryError, Result, SaveRepository};

/// Keeps the saved game in memory.
#[derive(Debug, Default)]
pub struct InMemorySaveRepository {
    slot: RwLock<Option<GameSnapshot>>,
}

impl InMemorySaveRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with an existing save.
    pub fn with_snapshot(snapshot: GameSnapshot) -> Self {
        Self {
            slot: RwLock::new(Some(snapshot)),
        }
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, snapshot: &GameSnapshot) -> Result<()> {
        let mut slot = self.slot.write().map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<GameSnapshot>> {
        let slot = self.slot.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slot.clone())
    }

    fn exists(&self) -> bool {
        self.slot.read().map(|slot| slot.is_some()).unwrap_or(false)
    }

    fn delete(&self) -> Result<()> {
        let mut slot = self.slot.write().map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = None;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_owned()
    }
}
