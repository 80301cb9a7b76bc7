/// Scoring and lives configuration for a single game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameSettings {
    /// Lives the player starts with.
    pub initial_lives: i32,
    /// Added to the score after a correct answer.
    pub correct_answer_score_delta: i32,
    /// Added to the score after an incorrect answer (usually negative).
    pub wrong_answer_score_delta: i32,
}

impl GameSettings {
    pub const DEFAULT_INITIAL_LIVES: i32 = 3;
    pub const DEFAULT_CORRECT_ANSWER_SCORE: i32 = 10;
    pub const DEFAULT_WRONG_ANSWER_SCORE: i32 = -5;

    pub const fn new(
        initial_lives: i32,
        correct_answer_score_delta: i32,
        wrong_answer_score_delta: i32,
    ) -> Self {
        Self {
            initial_lives,
            correct_answer_score_delta,
            wrong_answer_score_delta,
        }
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_INITIAL_LIVES,
            Self::DEFAULT_CORRECT_ANSWER_SCORE,
            Self::DEFAULT_WRONG_ANSWER_SCORE,
        )
    }
}

/// Dimensions and room placement handed to the rectangle maze generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MazeConfig {
    /// Maze height in rooms.
    pub maze_height: usize,
    /// Maze width in rooms.
    pub maze_width: usize,
    /// Room height in tiles.
    pub room_height: usize,
    /// Room width in tiles.
    pub room_width: usize,
    /// Starting room `(x, y)`; centre-biased random room when absent.
    pub start: Option<(usize, usize)>,
    /// Exit room `(x, y)`; random edge room when absent.
    pub exit: Option<(usize, usize)>,
    /// Seed for random start/exit placement.
    pub seed: Option<u64>,
}

impl MazeConfig {
    pub const DEFAULT_MAZE_SIZE: usize = 3;
    pub const DEFAULT_ROOM_SIZE: usize = 7;
    /// Smallest room that still has an interior and a door slot on every side.
    pub const MIN_ROOM_SIZE: usize = 3;

    pub fn new(
        maze_height: usize,
        maze_width: usize,
        room_height: usize,
        room_width: usize,
    ) -> Self {
        Self {
            maze_height,
            maze_width,
            room_height,
            room_width,
            start: None,
            exit: None,
            seed: None,
        }
    }

    pub fn with_start(mut self, x: usize, y: usize) -> Self {
        self.start = Some((x, y));
        self
    }

    pub fn with_exit(mut self, x: usize, y: usize) -> Self {
        self.exit = Some((x, y));
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for MazeConfig {
    /// A 3x3 maze of 7x7 rooms, entered bottom-left, exited top-right.
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MAZE_SIZE,
            Self::DEFAULT_MAZE_SIZE,
            Self::DEFAULT_ROOM_SIZE,
            Self::DEFAULT_ROOM_SIZE,
        )
        .with_start(0, 0)
        .with_exit(Self::DEFAULT_MAZE_SIZE - 1, Self::DEFAULT_MAZE_SIZE - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_maze_runs_bottom_left_to_top_right() {
        let config = MazeConfig::default();

        assert_eq!((config.maze_height, config.maze_width), (3, 3));
        assert_eq!((config.room_height, config.room_width), (7, 7));
        assert_eq!(config.start, Some((0, 0)));
        assert_eq!(config.exit, Some((2, 2)));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn default_settings() {
        let settings = GameSettings::default();

        assert_eq!(settings.initial_lives, 3);
        assert_eq!(settings.correct_answer_score_delta, 10);
        assert_eq!(settings.wrong_answer_score_delta, -5);
    }
}
