//! Maze generation.
//!
//! [`RectangleMazeGenerator`] lays out a fixed grid of equally sized rooms.
//! Every room is walled in, with one door slot in the middle of each side.
//! Doors are only created toward the top and right neighbours, so each shared
//! wall gets exactly one [`DoorController`]; slots facing the maze edge are
//! walled off.

use thiserror::Error;
use tracing::debug;

use crate::config::MazeConfig;
use crate::door::{DoorController, DoorId, DoorSide};
use crate::error::{ErrorSeverity, GameError};
use crate::grid::GridError;
use crate::maze::Maze;
use crate::question::QuestionSource;
use crate::rng::{PcgRng, RngOracle, clock_seed, compute_seed};
use crate::room::{Room, RoomType};
use crate::tile::Tile;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("maze must have at least one room (got {height}x{width})")]
    EmptyMaze { height: usize, width: usize },

    #[error("rooms must be at least {min}x{min} tiles (got {height}x{width})")]
    RoomTooSmall {
        height: usize,
        width: usize,
        min: usize,
    },

    #[error("{role} room ({x}, {y}) is outside the {width}x{height} maze")]
    RoomOutOfBounds {
        role: RoomType,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("no question source configured")]
    MissingQuestionSource,

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl GameError for GeneratorError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            GeneratorError::Grid(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            GeneratorError::EmptyMaze { .. } => "GENERATOR_EMPTY_MAZE",
            GeneratorError::RoomTooSmall { .. } => "GENERATOR_ROOM_TOO_SMALL",
            GeneratorError::RoomOutOfBounds { .. } => "GENERATOR_ROOM_OUT_OF_BOUNDS",
            GeneratorError::MissingQuestionSource => "GENERATOR_NO_QUESTION_SOURCE",
            GeneratorError::Grid(_) => "GENERATOR_GRID",
        }
    }
}

/// Produces a fresh [`Maze`] per call.
pub trait MazeGenerator {
    fn generate(&mut self) -> Result<Maze, GeneratorError>;
}

impl<G: MazeGenerator + ?Sized> MazeGenerator for Box<G> {
    fn generate(&mut self) -> Result<Maze, GeneratorError> {
        (**self).generate()
    }
}

// Roll contexts so start and exit placement never share a seed.
const ROLL_START_X: u32 = 1;
const ROLL_START_Y: u32 = 2;
const ROLL_EXIT_EDGE: u32 = 3;
const ROLL_EXIT_OFFSET: u32 = 4;

pub struct RectangleMazeGenerator {
    config: MazeConfig,
    source: Option<Box<dyn QuestionSource>>,
    base_seed: u64,
    generation: u64,
}

impl RectangleMazeGenerator {
    pub fn new(config: MazeConfig, source: impl QuestionSource + 'static) -> Self {
        let mut generator = Self::without_source(config);
        generator.source = Some(Box::new(source));
        generator
    }

    /// Generator that refuses to run until [`set_question_source`] is called.
    ///
    /// [`set_question_source`]: Self::set_question_source
    pub fn without_source(config: MazeConfig) -> Self {
        let base_seed = config.seed.unwrap_or_else(clock_seed);
        Self {
            config,
            source: None,
            base_seed,
            generation: 0,
        }
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn set_maze_dimensions(&mut self, height: usize, width: usize) {
        self.config.maze_height = height;
        self.config.maze_width = width;
    }

    pub fn set_room_dimensions(&mut self, height: usize, width: usize) {
        self.config.room_height = height;
        self.config.room_width = width;
    }

    pub fn set_start_coordinates(&mut self, x: usize, y: usize) {
        self.config.start = Some((x, y));
    }

    pub fn set_exit_coordinates(&mut self, x: usize, y: usize) {
        self.config.exit = Some((x, y));
    }

    pub fn set_question_source(&mut self, source: impl QuestionSource + 'static) {
        self.source = Some(Box::new(source));
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.config.seed = Some(seed);
        self.base_seed = seed;
        self.generation = 0;
    }

    fn validate(&self) -> Result<(), GeneratorError> {
        let MazeConfig {
            maze_height: height,
            maze_width: width,
            room_height,
            room_width,
            ..
        } = self.config;

        if height == 0 || width == 0 {
            return Err(GeneratorError::EmptyMaze { height, width });
        }
        if room_height < MazeConfig::MIN_ROOM_SIZE || room_width < MazeConfig::MIN_ROOM_SIZE {
            return Err(GeneratorError::RoomTooSmall {
                height: room_height,
                width: room_width,
                min: MazeConfig::MIN_ROOM_SIZE,
            });
        }

        for (role, placement) in [
            (RoomType::Start, self.config.start),
            (RoomType::Exit, self.config.exit),
        ] {
            let Some((x, y)) = placement else {
                continue;
            };
            if x >= width || y >= height {
                return Err(GeneratorError::RoomOutOfBounds {
                    role,
                    x,
                    y,
                    width,
                    height,
                });
            }
        }

        if self.source.is_none() {
            return Err(GeneratorError::MissingQuestionSource);
        }
        Ok(())
    }

    fn roll(&self, context: u32) -> u64 {
        compute_seed(self.base_seed, self.generation, 0, context)
    }

    /// One of the central rooms; even dimensions pick between the two middle
    /// cells.
    fn random_start(&self) -> (usize, usize) {
        let rng = PcgRng;
        let centre = |size: usize, context: u32| {
            let mid = size / 2;
            if size % 2 == 0 && rng.coin(self.roll(context)) {
                mid - 1
            } else {
                mid
            }
        };
        (
            centre(self.config.maze_width, ROLL_START_X),
            centre(self.config.maze_height, ROLL_START_Y),
        )
    }

    /// A room on a uniformly chosen edge of the maze.
    fn random_exit(&self) -> (usize, usize) {
        let rng = PcgRng;
        let (width, height) = (self.config.maze_width, self.config.maze_height);
        let offset = |size: usize| {
            rng.range(self.roll(ROLL_EXIT_OFFSET), 0, size.saturating_sub(1) as u32) as usize
        };

        match rng.range(self.roll(ROLL_EXIT_EDGE), 0, 3) {
            0 => (offset(width), height - 1),
            1 => (offset(width), 0),
            2 => (0, offset(height)),
            _ => (width - 1, offset(height)),
        }
    }

    fn build(
        &mut self,
        start: (usize, usize),
        exit: (usize, usize),
    ) -> Result<Maze, GeneratorError> {
        let MazeConfig {
            maze_height,
            maze_width,
            room_height,
            room_width,
            ..
        } = self.config;
        let source = self
            .source
            .as_mut()
            .ok_or(GeneratorError::MissingQuestionSource)?;

        let door_row = room_height / 2;
        let door_column = room_width / 2;
        let top = room_height - 1;
        let right = room_width - 1;

        // tiles[room_y][room_x][y][x]
        let mut tiles =
            vec![vec![vec![vec![Tile::Empty; room_width]; room_height]; maze_width]; maze_height];
        let mut doors = Vec::new();

        for room_y in 0..maze_height {
            for room_x in 0..maze_width {
                let room = &mut tiles[room_y][room_x];
                for (y, row) in room.iter_mut().enumerate() {
                    if y != door_row {
                        row[0] = Tile::Wall;
                        row[right] = Tile::Wall;
                    }
                }
                for x in (0..room_width).filter(|&x| x != door_column) {
                    room[0][x] = Tile::Wall;
                    room[top][x] = Tile::Wall;
                }

                if room_y == 0 {
                    room[0][door_column] = Tile::Wall;
                }
                if room_x == 0 {
                    room[door_row][0] = Tile::Wall;
                }

                if room_y + 1 == maze_height {
                    tiles[room_y][room_x][top][door_column] = Tile::Wall;
                } else {
                    let door =
                        DoorController::new(DoorId(doors.len() as u32), source.next_question());
                    tiles[room_y][room_x][top][door_column] =
                        Tile::Door(door.door(DoorSide::Near).clone());
                    tiles[room_y + 1][room_x][0][door_column] =
                        Tile::Door(door.door(DoorSide::Far).clone());
                    doors.push(door);
                }

                if room_x + 1 == maze_width {
                    tiles[room_y][room_x][door_row][right] = Tile::Wall;
                } else {
                    let door =
                        DoorController::new(DoorId(doors.len() as u32), source.next_question());
                    tiles[room_y][room_x][door_row][right] =
                        Tile::Door(door.door(DoorSide::Near).clone());
                    tiles[room_y][room_x + 1][door_row][0] =
                        Tile::Door(door.door(DoorSide::Far).clone());
                    doors.push(door);
                }
            }
        }

        let rooms = tiles
            .into_iter()
            .enumerate()
            .map(|(room_y, row)| {
                row.into_iter()
                    .enumerate()
                    .map(|(room_x, room_tiles)| {
                        let kind = if (room_x, room_y) == start {
                            RoomType::Start
                        } else if (room_x, room_y) == exit {
                            RoomType::Exit
                        } else {
                            RoomType::Standard
                        };
                        Room::new(kind, room_tiles)
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Maze::new(rooms, doors, start, exit)?)
    }
}

impl MazeGenerator for RectangleMazeGenerator {
    fn generate(&mut self) -> Result<Maze, GeneratorError> {
        self.validate()?;

        let start = self.config.start.unwrap_or_else(|| self.random_start());
        let exit = self.config.exit.unwrap_or_else(|| self.random_exit());
        let maze = self.build(start, exit)?;
        self.generation += 1;

        debug!(
            generation = self.generation,
            height = maze.height(),
            width = maze.width(),
            doors = maze.doors().len(),
            ?start,
            ?exit,
            "generated maze\n{maze}"
        );
        Ok(maze)
    }
}

impl std::fmt::Debug for RectangleMazeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RectangleMazeGenerator")
            .field("config", &self.config)
            .field("has_source", &self.source.is_some())
            .field("generation", &self.generation)
            .finish()
    }
}
