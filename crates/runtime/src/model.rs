//! Game session wrapper.

use std::fmt;

use maze_core::{GameSettings, GameState, MazeGenerator, QuestionResult};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::api::Result;
use crate::events::{EventBus, GameEvent};
use crate::repository::{RepositoryError, SaveRepository};

/// Owns the current [`GameState`] and everything needed to replace it: the
/// maze generator for new games and the repository for saves.
///
/// Every game state notification is republished on the model's [`EventBus`].
pub struct GameModel {
    generator: Box<dyn MazeGenerator>,
    repository: Box<dyn SaveRepository>,
    settings: GameSettings,
    state: GameState,
    bus: EventBus,
}

impl GameModel {
    /// Generates the first maze and starts a game on it.
    pub fn new(
        mut generator: impl MazeGenerator + 'static,
        settings: GameSettings,
        repository: impl SaveRepository + 'static,
    ) -> Result<Self> {
        let maze = generator.generate()?;
        let bus = EventBus::new();
        let state = attach(GameState::new(settings, maze), &bus);

        Ok(Self {
            generator: Box::new(generator),
            repository: Box::new(repository),
            settings,
            state,
            bus,
        })
    }

    /// Discards the current game and starts another on a fresh maze.
    pub fn new_game(&mut self) -> Result<()> {
        let maze = self.generator.generate()?;
        self.state = attach(GameState::new(self.settings, maze), &self.bus);
        info!("started new game");
        self.bus.publish(GameEvent::NewGame);
        Ok(())
    }

    /// Persists the current game. A pending question is not saved.
    pub fn save_game(&self) -> Result<()> {
        self.repository.save(&self.state.snapshot())?;
        let location = self.repository.location();
        info!(%location, "saved game");
        self.bus.publish(GameEvent::Saved { location });
        Ok(())
    }

    /// Replaces the current game with the saved one. The current game is kept
    /// if the save cannot be read.
    pub fn load_game(&mut self) -> Result<()> {
        let snapshot = self
            .repository
            .load()?
            .ok_or_else(|| RepositoryError::NotFound(self.repository.location()))?;
        let state = GameState::from_snapshot(snapshot).map_err(RepositoryError::from)?;

        self.state = attach(state, &self.bus);
        info!(location = %self.repository.location(), "loaded game");
        self.bus.publish(GameEvent::Loaded);
        Ok(())
    }

    /// Grades `input` against the pending question of the current game.
    pub fn answer_question(&mut self, input: &str) -> Result<QuestionResult> {
        let result = self.state.answer_question(input)?;
        debug!(%result, "question answered");
        Ok(result)
    }

    /// Abandons the pending question; its door stays unanswered.
    pub fn cancel_question(&mut self) -> Result<()> {
        self.state.cancel_question()?;
        Ok(())
    }

    pub fn has_save(&self) -> bool {
        self.repository.exists()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.bus.subscribe()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }
}

/// Republishes state and question notifications on `bus`.
fn attach(mut state: GameState, bus: &EventBus) -> GameState {
    let updates = bus.clone();
    state.add_update_listener(move |update, state| {
        updates.publish(GameEvent::from_update(update, state));
    });

    let questions = bus.clone();
    state.add_question_listener(move |update, _| {
        questions.publish(GameEvent::Question { update });
    });
    state
}

impl fmt::Debug for GameModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameModel")
            .field("settings", &self.settings)
            .field("state", &self.state)
            .field("save", &self.repository.location())
            .finish_non_exhaustive()
    }
}
