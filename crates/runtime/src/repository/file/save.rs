//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use maze_core::GameSnapshot;

use crate::repository::{RepositoryError, Result, SaveRepository};

/// On-disk encoding of a save file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SaveFormat {
    /// Compact binary encoding.
    #[default]
    Bincode,
    /// Pretty-printed JSON, for inspecting saves by hand.
    Json,
}

impl SaveFormat {
    /// `.json` files are JSON; anything else is bincode.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SaveFormat::Json,
            _ => SaveFormat::Bincode,
        }
    }

    fn encode(self, snapshot: &GameSnapshot) -> Result<Vec<u8>> {
        match self {
            SaveFormat::Bincode => bincode::serialize(snapshot)
                .map_err(|e| RepositoryError::Serialization(e.to_string())),
            SaveFormat::Json => serde_json::to_vec_pretty(snapshot)
                .map_err(|e| RepositoryError::Json(e.to_string())),
        }
    }

    fn decode(self, bytes: &[u8]) -> Result<GameSnapshot> {
        match self {
            SaveFormat::Bincode => bincode::deserialize(bytes)
                .map_err(|e| RepositoryError::Serialization(e.to_string())),
            SaveFormat::Json => {
                serde_json::from_slice(bytes).map_err(|e| RepositoryError::Json(e.to_string()))
            }
        }
    }
}

/// File-based implementation of SaveRepository.
///
/// Writes go to a temporary sibling file first and are renamed into place, so
/// a crash mid-save leaves the previous save intact.
#[derive(Debug, Clone)]
pub struct FileSaveRepository {
    path: PathBuf,
    format: SaveFormat,
}

impl FileSaveRepository {
    /// Create a repository at `path`, picking the format from its extension.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let format = SaveFormat::from_path(&path);
        Self::with_format(path, format)
    }

    pub fn with_format(path: impl AsRef<Path>, format: SaveFormat) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(RepositoryError::Io)?;
        }
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SaveFormat {
        self.format
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, snapshot: &GameSnapshot) -> Result<()> {
        let temp_path = self.temp_path();
        let bytes = self.format.encode(snapshot)?;

        // Write to temp file
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;

        // Atomic rename
        if let Err(error) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(RepositoryError::Io(error));
        }

        tracing::debug!("Saved game to {}", self.path.display());

        Ok(())
    }

    fn load(&self) -> Result<Option<GameSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path).map_err(RepositoryError::Io)?;
        let snapshot = self.format.decode(&bytes)?;

        tracing::debug!("Loaded game from {}", self.path.display());

        Ok(Some(snapshot))
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn delete(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted save {}", self.path.display());
        }

        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::{GameSettings, GameState, Maze, Room, RoomType, Tile};

    fn snapshot() -> GameSnapshot {
        let room = Room::new(RoomType::Start, vec![vec![Tile::Empty; 3]; 3]).unwrap();
        let maze = Maze::new(vec![vec![room]], Vec::new(), (0, 0), (0, 0)).unwrap();
        GameState::new(GameSettings::default(), maze).snapshot()
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(SaveFormat::from_path(Path::new("save.json")), SaveFormat::Json);
        assert_eq!(SaveFormat::from_path(Path::new("save.JSON")), SaveFormat::Json);
        assert_eq!(SaveFormat::from_path(Path::new("gamesave.ser")), SaveFormat::Bincode);
        assert_eq!(SaveFormat::from_path(Path::new("gamesave")), SaveFormat::Bincode);
    }

    #[test]
    fn creates_parent_and_keeps_temp_file_alongside() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path().join("nested/slot.json")).unwrap();

        assert!(dir.path().join("nested").is_dir());
        assert_eq!(repo.format(), SaveFormat::Json);
        assert_eq!(repo.temp_path(), dir.path().join("nested/slot.json.tmp"));
        assert!(!repo.exists());
        assert!(repo.load().unwrap().is_none());
        assert!(repo.delete().is_ok());
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("occupied.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), b"x").unwrap();
        let repo = FileSaveRepository::new(&target).unwrap();

        assert!(matches!(repo.save(&snapshot()), Err(RepositoryError::Io(_))));
        assert!(!repo.temp_path().exists());
        assert!(target.join("keep").exists());
    }

    #[test]
    fn save_replaces_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path().join("slot.ser")).unwrap();

        repo.save(&snapshot()).unwrap();
        repo.save(&snapshot()).unwrap();

        assert!(!repo.temp_path().exists());
        assert_eq!(repo.load().unwrap(), Some(snapshot()));
    }
}
