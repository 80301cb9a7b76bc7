//! Session events re-broadcast from the game state.

use maze_core::{Coordinates, GamePhase, GameState, GameStateUpdate, QuestionUpdate};
use serde::{Deserialize, Serialize};

/// High-level occurrences a view layer reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh maze was generated and a new game began.
    NewGame,

    /// A saved game replaced the current one.
    Loaded,

    /// The current game was written to the save repository.
    Saved { location: String },

    /// The game phase changed.
    PhaseChanged { phase: GamePhase },

    /// A move was attempted or the player's stats changed.
    PlayerChanged {
        position: Coordinates,
        score: i32,
        lives: i32,
    },

    /// At least one door changed state.
    DoorsChanged,

    /// The question controller asked, graded or cancelled a question.
    Question { update: QuestionUpdate },
}

impl GameEvent {
    /// Translates a game state notification into an event.
    pub fn from_update(update: GameStateUpdate, state: &GameState) -> Self {
        match update {
            GameStateUpdate::Phase => GameEvent::PhaseChanged {
                phase: state.phase(),
            },
            GameStateUpdate::Player => {
                let player = state.player();
                GameEvent::PlayerChanged {
                    position: player.position(),
                    score: player.score(),
                    lives: player.lives(),
                }
            }
            GameStateUpdate::Doors => GameEvent::DoorsChanged,
        }
    }

    /// Events that end the session.
    pub fn is_game_over(&self) -> bool {
        matches!(self, GameEvent::PhaseChanged { phase } if phase.is_terminal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_terminal_phases_end_the_game() {
        assert!(GameEvent::PhaseChanged { phase: GamePhase::Victory }.is_game_over());
        assert!(GameEvent::PhaseChanged { phase: GamePhase::Failure }.is_game_over());
        assert!(!GameEvent::PhaseChanged { phase: GamePhase::Trivia }.is_game_over());
        assert!(!GameEvent::NewGame.is_game_over());
    }
}
