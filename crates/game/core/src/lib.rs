//! Deterministic rules of the trivia maze.
//!
//! `maze-core` owns the maze model (rooms, tiles, doors), the question
//! protocol that gates doors, maze generation and the [`GameState`] phase
//! machine. Everything here is synchronous and single-threaded: operations run
//! to completion and listeners are called in registration order on the
//! caller's stack. Listeners must not call back into the object notifying
//! them.
pub mod config;
pub mod coordinates;
pub mod door;
pub mod error;
pub mod game_state;
pub mod generator;
pub mod grid;
pub mod listeners;
pub mod maze;
pub mod player;
pub mod question;
pub mod question_controller;
pub mod rng;
pub mod room;
pub mod snapshot;
pub mod tile;

pub use config::{GameSettings, MazeConfig};
pub use coordinates::{Coordinates, Direction};
pub use door::{DoorController, DoorId, DoorSide, DoorState, DoorTile};
pub use error::{ErrorSeverity, GameError};
pub use game_state::{GamePhase, GameState, GameStateUpdate};
pub use generator::{GeneratorError, MazeGenerator, RectangleMazeGenerator};
pub use grid::GridError;
pub use listeners::{ListenerId, Listeners};
pub use maze::Maze;
pub use player::Player;
pub use question::{
    AnswerCallback, QuestionError, QuestionHandler, QuestionResult, QuestionSource,
    QuestionType, SharedQuestionHandler, TriviaQuestion,
};
pub use question_controller::{QuestionController, QuestionUpdate};
pub use rng::{PcgRng, RngOracle, clock_seed, compute_seed};
pub use room::{Room, RoomType};
pub use snapshot::{
    DoorSnapshot, GameSnapshot, MazeSnapshot, PlayerSnapshot, RoomSnapshot, SnapshotError,
    TileSnapshot,
};
pub use tile::{Tile, TileId};
