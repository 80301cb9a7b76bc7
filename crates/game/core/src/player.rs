use std::fmt;

use crate::coordinates::Coordinates;
use crate::listeners::{ListenerId, Listeners};

pub type PlayerListener = dyn FnMut(&Player);

/// Position, score and remaining lives. Every mutation notifies listeners.
#[derive(Default)]
pub struct Player {
    position: Coordinates,
    score: i32,
    lives: i32,
    listeners: Listeners<PlayerListener>,
}

impl Player {
    pub fn new(position: Coordinates, lives: i32) -> Self {
        Self {
            position,
            score: 0,
            lives,
            listeners: Listeners::new(),
        }
    }

    pub fn position(&self) -> Coordinates {
        self.position
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn set_position(&mut self, position: Coordinates) {
        self.position = position;
        self.notify();
    }

    pub fn set_score(&mut self, score: i32) {
        self.score = score;
        self.notify();
    }

    pub fn set_lives(&mut self, lives: i32) {
        self.lives = lives;
        self.notify();
    }

    pub fn adjust_score(&mut self, delta: i32) {
        self.set_score(self.score.saturating_add(delta));
    }

    /// Removes one life, never going below zero, and returns what is left.
    pub fn lose_life(&mut self) -> i32 {
        self.set_lives((self.lives - 1).max(0));
        self.lives
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub fn add_listener(&mut self, listener: impl FnMut(&Player) + 'static) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn notify(&mut self) {
        let mut listeners = self.listeners.detach();
        listeners.for_each(|listener| listener(self));
        self.listeners.reattach(listeners);
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("position", &self.position)
            .field("score", &self.score)
            .field("lives", &self.lives)
            .finish_non_exhaustive()
    }
}
