//! Session layer for the trivia maze.
//!
//! This crate wraps a [`maze_core::GameState`] into a [`GameModel`] that can
//! start new games, save and load them through a [`SaveRepository`], and
//! re-broadcast state changes on an [`EventBus`] for view layers.
//!
//! Modules are organized by responsibility:
//! - [`model`] hosts the session wrapper
//! - [`api`] exposes the error types downstream clients interact with
//! - [`events`] provides the broadcast bus and event payloads
//! - [`repository`] provides save file adapters
pub mod api;
pub mod events;
pub mod model;
pub mod repository;

pub use api::{Result, RuntimeError};
pub use events::{EventBus, GameEvent};
pub use model::GameModel;
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveFormat, SaveRepository,
};
