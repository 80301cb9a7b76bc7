//! Event bus for session events.
//!
//! The model publishes every game state notification here so consumers can
//! observe the game without holding a borrow of it.

mod bus;
mod game_event;

pub use bus::EventBus;
pub use game_event::GameEvent;
