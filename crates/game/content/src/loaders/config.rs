//! Game configuration loader.

use std::path::Path;

use maze_core::{GameSettings, MazeConfig};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Settings and maze layout read from one TOML file.
///
/// ```toml
/// [settings]
/// initial_lives = 3
/// correct_answer_score_delta = 10
/// wrong_answer_score_delta = -5
///
/// [maze]
/// maze_height = 4
/// maze_width = 4
/// room_height = 7
/// room_width = 7
/// ```
///
/// Missing tables and keys fall back to their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfigFile {
    pub settings: GameSettings,
    pub maze: MazeConfig,
}

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfigFile> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfigFile> {
        let config: GameConfigFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        assert_eq!(ConfigLoader::parse("").unwrap(), GameConfigFile::default());
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config = ConfigLoader::parse(
            "[settings]\ninitial_lives = 1\n\n[maze]\nmaze_width = 5\nseed = 42\nexit = [4, 0]\n",
        )
        .unwrap();

        assert_eq!(config.settings.initial_lives, 1);
        assert_eq!(config.settings.correct_answer_score_delta, 10);
        assert_eq!(config.maze.maze_width, 5);
        assert_eq!(config.maze.maze_height, MazeConfig::DEFAULT_MAZE_SIZE);
        assert_eq!(config.maze.seed, Some(42));
        assert_eq!(config.maze.exit, Some((4, 0)));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let error = ConfigLoader::parse("[settings\n").unwrap_err();
        assert!(error.to_string().contains("Failed to parse config TOML"));
    }
}
