//! The phase state machine tying the player, maze and question controller
//! together.
//!
//! ```text
//! NotStarted -> InProgress <-> Trivia -> InProgress | Victory | Failure
//!                   ^  v
//!                  Paused
//! ```
//!
//! Door and question controllers report back through listeners that
//! [`GameState`] registers when it is built. Those listeners only enqueue a
//! signal; the state drains the queue after each step it drives, so no
//! callback ever needs a borrow of the state itself.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, info};

use crate::config::GameSettings;
use crate::coordinates::Direction;
use crate::door::DoorId;
use crate::listeners::{ListenerId, Listeners};
use crate::maze::Maze;
use crate::player::Player;
use crate::question::{QuestionError, QuestionResult, SharedQuestionHandler, TriviaQuestion};
use crate::question_controller::{QuestionController, QuestionUpdate};
use crate::snapshot::{GameSnapshot, PlayerSnapshot, SnapshotError};
use crate::tile::Tile;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GamePhase {
    #[default]
    NotStarted,
    InProgress,
    Paused,
    Trivia,
    Victory,
    Failure,
}

impl GamePhase {
    /// Victory and failure end the session.
    pub const fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::Failure)
    }
}

/// What changed when game state listeners are called.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStateUpdate {
    Phase,
    Player,
    Doors,
}

pub type GameStateListener = dyn FnMut(GameStateUpdate, &GameState);

#[derive(Debug)]
enum Signal {
    Question(QuestionUpdate),
    Door(DoorId),
}

pub struct GameState {
    settings: GameSettings,
    maze: Maze,
    player: Player,
    questions: Rc<RefCell<QuestionController>>,
    phase: GamePhase,
    stored_phase: GamePhase,
    signals: Receiver<Signal>,
    listeners: Listeners<GameStateListener>,
}

impl GameState {
    /// Places a fresh player at the centre of the start room and wires every
    /// door of `maze` to a new question controller.
    pub fn new(settings: GameSettings, maze: Maze) -> Self {
        let player = Player::new(maze.start_position(), settings.initial_lives);
        Self::assemble(settings, maze, player)
    }

    fn assemble(settings: GameSettings, maze: Maze, player: Player) -> Self {
        let (sender, signals) = mpsc::channel();
        let questions = Rc::new(RefCell::new(QuestionController::new()));

        let question_sender = sender.clone();
        questions.borrow_mut().add_listener(move |update, _| {
            // The receiver lives as long as the state that owns every sender.
            let _ = question_sender.send(Signal::Question(update));
        });

        let handler: SharedQuestionHandler = questions.clone();
        for door in maze.doors() {
            door.set_handler(Rc::clone(&handler));
            let door_sender: Sender<Signal> = sender.clone();
            door.add_update_listener(move |door| {
                let _ = door_sender.send(Signal::Door(door.id()));
            });
        }

        Self {
            settings,
            maze,
            player,
            questions,
            phase: GamePhase::NotStarted,
            stored_phase: GamePhase::NotStarted,
            signals,
            listeners: Listeners::new(),
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Direct access for registering player listeners. Changes made here do
    /// not go through the phase machine.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Phase to return to once the pending question resolves.
    pub fn stored_phase(&self) -> GamePhase {
        self.stored_phase
    }

    pub fn has_question(&self) -> bool {
        self.questions.borrow().has_question()
    }

    pub fn active_question(&self) -> Option<TriviaQuestion> {
        self.questions.borrow().question().cloned()
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        let previous = std::mem::replace(&mut self.phase, phase);
        match phase {
            GamePhase::Victory | GamePhase::Failure => {
                info!(%previous, %phase, score = self.player.score(), "game over")
            }
            _ => debug!(%previous, %phase, "phase changed"),
        }
        self.notify(GameStateUpdate::Phase);
    }

    /// Starts a game that has not started yet. Returns whether the phase changed.
    pub fn start(&mut self) -> bool {
        self.transition(GamePhase::NotStarted, GamePhase::InProgress)
    }

    pub fn pause(&mut self) -> bool {
        self.transition(GamePhase::InProgress, GamePhase::Paused)
    }

    pub fn resume(&mut self) -> bool {
        self.transition(GamePhase::Paused, GamePhase::InProgress)
    }

    fn transition(&mut self, from: GamePhase, to: GamePhase) -> bool {
        if self.phase != from {
            return false;
        }
        self.set_phase(to);
        true
    }

    /// Moves the player one tile toward `direction`.
    ///
    /// A pending question is cancelled first. Walls and the maze edge reject
    /// the move; an unanswered door asks its question instead of letting the
    /// player through. Player listeners are notified whatever happens.
    pub fn move_player(&mut self, direction: Direction) {
        match self.phase {
            GamePhase::Paused | GamePhase::Victory | GamePhase::Failure => {
                debug!(phase = %self.phase, %direction, "move ignored");
                self.notify(GameStateUpdate::Player);
                return;
            }
            GamePhase::NotStarted => self.set_phase(GamePhase::InProgress),
            GamePhase::Trivia => {
                if self.has_question() {
                    let _ = self.questions.borrow_mut().cancel_question();
                }
                self.process_signals();
            }
            GamePhase::InProgress => {}
        }

        let from = self.player.position();
        let to = self.maze.move_coordinates(from, direction);
        if to != from {
            let passable = self.maze.tile(to).is_some_and(Tile::try_move_to);
            self.process_signals();

            if passable {
                self.player.set_position(to);
                if !to.same_room(&from) && self.maze.is_exit_room(&to) {
                    self.set_phase(GamePhase::Victory);
                }
            }
        }

        self.notify(GameStateUpdate::Player);
    }

    /// Grades `input` against the pending question.
    pub fn answer_question(&mut self, input: &str) -> Result<QuestionResult, QuestionError> {
        let result = self.questions.borrow_mut().answer_question(input);
        self.process_signals();
        result
    }

    pub fn cancel_question(&mut self) -> Result<(), QuestionError> {
        let result = self.questions.borrow_mut().cancel_question();
        self.process_signals();
        result
    }

    /// Registers a listener on the question controller.
    ///
    /// Must not be called from inside a question listener.
    pub fn add_question_listener(
        &self,
        listener: impl FnMut(QuestionUpdate, &QuestionController) + 'static,
    ) -> ListenerId {
        self.questions.borrow_mut().add_listener(listener)
    }

    pub fn remove_question_listener(&self, id: ListenerId) -> bool {
        self.questions.borrow_mut().remove_listener(id)
    }

    pub fn add_update_listener(
        &mut self,
        listener: impl FnMut(GameStateUpdate, &GameState) + 'static,
    ) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    pub fn remove_update_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn process_signals(&mut self) {
        while let Ok(signal) = self.signals.try_recv() {
            match signal {
                Signal::Question(update) => self.handle_question_update(update),
                Signal::Door(door) => {
                    debug!(%door, "door changed");
                    self.notify(GameStateUpdate::Doors);
                }
            }
        }
    }

    fn handle_question_update(&mut self, update: QuestionUpdate) {
        match update {
            QuestionUpdate::NewQuestion => {
                self.stored_phase = self.phase;
                self.set_phase(GamePhase::Trivia);
            }
            QuestionUpdate::AnsweredCorrectly => {
                self.player.adjust_score(self.settings.correct_answer_score_delta);
                self.set_phase(self.stored_phase);
            }
            QuestionUpdate::AnsweredIncorrectly => {
                self.player.adjust_score(self.settings.wrong_answer_score_delta);
                if self.player.lose_life() <= 0 {
                    self.set_phase(GamePhase::Failure);
                } else {
                    self.set_phase(self.stored_phase);
                }
            }
            QuestionUpdate::Cancelled => self.set_phase(self.stored_phase),
        }
    }

    fn notify(&mut self, update: GameStateUpdate) {
        let mut listeners = self.listeners.detach();
        listeners.for_each(|listener| listener(update, self));
        self.listeners.reattach(listeners);
    }

    /// Captures everything needed to resume this game later.
    ///
    /// A pending question is not saved: its door stays unanswered and the game
    /// resumes in the phase it was in before the question.
    pub fn snapshot(&self) -> GameSnapshot {
        let phase = match self.phase {
            GamePhase::Trivia => self.stored_phase,
            phase => phase,
        };
        GameSnapshot {
            settings: self.settings,
            maze: crate::snapshot::MazeSnapshot::capture(&self.maze),
            player: PlayerSnapshot {
                position: self.player.position(),
                score: self.player.score(),
                lives: self.player.lives(),
            },
            phase,
            stored_phase: self.stored_phase,
        }
    }

    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self, SnapshotError> {
        let maze = snapshot.maze.restore()?;
        let PlayerSnapshot {
            position,
            score,
            lives,
        } = snapshot.player;
        if maze.tile(position).is_none() {
            return Err(SnapshotError::PlayerOutOfBounds(position));
        }

        let mut player = Player::new(position, lives);
        player.set_score(score);

        let mut state = Self::assemble(snapshot.settings, maze, player);
        state.phase = match snapshot.phase {
            GamePhase::Trivia => snapshot.stored_phase,
            phase => phase,
        };
        state.stored_phase = snapshot.stored_phase;
        Ok(state)
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("settings", &self.settings)
            .field("phase", &self.phase)
            .field("stored_phase", &self.stored_phase)
            .field("player", &self.player)
            .field("maze", &self.maze)
            .field("has_question", &self.has_question())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::Coordinates;
    use crate::door::{DoorController, DoorSide, DoorState};
    use crate::question::QuestionType;
    use crate::room::{Room, RoomType};

    /// Two 3x3 rooms stacked vertically, joined by a door answered with "X".
    fn two_room_state(settings: GameSettings) -> GameState {
        let door = DoorController::new(
            DoorId(0),
            TriviaQuestion::new("Pick X", "X", QuestionType::ShortAnswer),
        );
        let mut bottom = vec![
            vec![Tile::Wall; 3],
            vec![Tile::Wall, Tile::Empty, Tile::Wall],
            vec![Tile::Wall; 3],
        ];
        bottom[2][1] = Tile::Door(door.door(DoorSide::Near).clone());
        let mut top = vec![
            vec![Tile::Wall; 3],
            vec![Tile::Wall, Tile::Empty, Tile::Wall],
            vec![Tile::Wall; 3],
        ];
        top[0][1] = Tile::Door(door.door(DoorSide::Far).clone());

        let rooms = vec![
            vec![Room::new(RoomType::Start, bottom).unwrap()],
            vec![Room::new(RoomType::Exit, top).unwrap()],
        ];
        let maze = Maze::new(rooms, vec![door], (0, 0), (0, 1)).unwrap();
        GameState::new(settings, maze)
    }

    fn door_state(state: &GameState) -> DoorState {
        state.maze().door(DoorId(0)).unwrap().state()
    }

    #[test]
    fn new_state_places_player_in_start_room() {
        let state = two_room_state(GameSettings::default());

        assert_eq!(state.phase(), GamePhase::NotStarted);
        assert_eq!(state.player().position(), Coordinates::new(0, 0, 1, 1));
        assert_eq!(state.player().lives(), 3);
        assert_eq!(state.player().score(), 0);
    }

    #[test]
    fn approaching_door_enters_trivia() {
        let mut state = two_room_state(GameSettings::default());

        state.move_player(Direction::Up);

        assert_eq!(state.phase(), GamePhase::Trivia);
        assert_eq!(state.stored_phase(), GamePhase::InProgress);
        assert!(state.has_question());
        assert_eq!(state.player().position(), Coordinates::new(0, 0, 1, 1));
        assert_eq!(state.active_question().unwrap().answer(), "X");
    }

    #[test]
    fn correct_answer_then_walk_through_wins() {
        let mut state = two_room_state(GameSettings::default());
        state.move_player(Direction::Up);

        assert_eq!(state.answer_question("X"), Ok(QuestionResult::Correct));
        assert_eq!(state.phase(), GamePhase::InProgress);
        assert_eq!(door_state(&state), DoorState::Open);
        assert_eq!(state.player().score(), 10);

        state.move_player(Direction::Up);
        assert_eq!(state.player().position(), Coordinates::new(0, 0, 1, 2));
        assert_eq!(state.phase(), GamePhase::InProgress);

        state.move_player(Direction::Up);
        assert_eq!(state.player().position(), Coordinates::new(0, 1, 1, 0));
        assert_eq!(state.phase(), GamePhase::Victory);
    }

    #[test]
    fn wrong_answer_on_last_life_fails() {
        let mut state = two_room_state(GameSettings::new(1, 10, -5));
        state.move_player(Direction::Up);

        assert_eq!(state.answer_question("x"), Ok(QuestionResult::Incorrect));
        assert_eq!(state.phase(), GamePhase::Failure);
        assert_eq!(state.player().lives(), 0);
        assert_eq!(state.player().score(), -5);
        assert_eq!(door_state(&state), DoorState::Locked);
    }

    #[test]
    fn wrong_answer_with_lives_left_resumes() {
        let mut state = two_room_state(GameSettings::default());
        state.move_player(Direction::Up);
        state.answer_question("nope").unwrap();

        assert_eq!(state.phase(), GamePhase::InProgress);
        assert_eq!(state.player().lives(), 2);

        state.move_player(Direction::Up);
        assert_eq!(state.phase(), GamePhase::InProgress);
        assert_eq!(state.player().position(), Coordinates::new(0, 0, 1, 1));
    }

    #[test]
    fn moving_away_cancels_question() {
        let mut state = two_room_state(GameSettings::default());
        state.move_player(Direction::Up);

        state.move_player(Direction::Down);

        assert_eq!(state.phase(), GamePhase::InProgress);
        assert!(!state.has_question());
        assert_eq!(door_state(&state), DoorState::Unanswered);
        assert_eq!(state.player().score(), 0);
        assert_eq!(state.player().lives(), 3);
    }

    #[test]
    fn answering_without_question_is_rejected() {
        let mut state = two_room_state(GameSettings::default());

        assert_eq!(state.answer_question("X"), Err(QuestionError::NoActiveQuestion));
        assert_eq!(state.cancel_question(), Err(QuestionError::NoActiveQuestion));
        assert_eq!(state.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn pause_blocks_movement_but_still_notifies() {
        let mut state = two_room_state(GameSettings::default());
        assert!(state.start());
        assert!(!state.start());
        assert!(state.pause());

        let updates = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&updates);
        state.add_update_listener(move |update, _| sink.borrow_mut().push(update));

        state.move_player(Direction::Up);
        assert_eq!(*updates.borrow(), vec![GameStateUpdate::Player]);
        assert!(!state.has_question());

        assert!(state.resume());
        assert_eq!(state.phase(), GamePhase::InProgress);
    }

    #[test]
    fn listeners_see_phase_door_and_player_updates() {
        let mut state = two_room_state(GameSettings::default());
        state.start();
        let updates = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&updates);
        state.add_update_listener(move |update, state| sink.borrow_mut().push((update, state.phase())));

        state.move_player(Direction::Up);

        assert_eq!(
            *updates.borrow(),
            vec![
                (GameStateUpdate::Phase, GamePhase::Trivia),
                (GameStateUpdate::Doors, GamePhase::Trivia),
                (GameStateUpdate::Player, GamePhase::Trivia),
            ]
        );
    }

    #[test]
    fn snapshot_during_trivia_resumes_before_question() {
        let mut state = two_room_state(GameSettings::default());
        state.move_player(Direction::Up);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, GamePhase::InProgress);

        let mut restored = GameState::from_snapshot(snapshot).unwrap();
        assert_eq!(restored.phase(), GamePhase::InProgress);
        assert!(!restored.has_question());

        restored.move_player(Direction::Up);
        assert_eq!(restored.phase(), GamePhase::Trivia);
        assert_eq!(restored.active_question().unwrap().question(), "Pick X");
    }
}
