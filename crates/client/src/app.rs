//! Line-oriented terminal front-end.
//!
//! Outside a question, each line is a command (`w`/`a`/`s`/`d` or
//! `up`/`left`/`down`/`right` to move, `save`, `load`, `new`, `pause`,
//! `resume`, `map`, `help`, `quit`). While a question is pending every line is
//! an answer; commands then need a leading `/`, e.g. `/cancel` or `/down`.

use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use maze_core::{Direction, GamePhase};
use runtime::{GameEvent, GameModel};
use tokio::sync::broadcast::Receiver;

/// Player intent parsed from one input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Answer(String),
    Cancel,
    Save,
    Load,
    New,
    Pause,
    Resume,
    Map,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let input = input.trim();
        let (word, rest) = input.split_once(' ').unwrap_or((input, ""));

        let command = match word.to_ascii_lowercase().as_str() {
            "w" | "up" => Command::Move(Direction::Up),
            "s" | "down" => Command::Move(Direction::Down),
            "a" | "left" => Command::Move(Direction::Left),
            "d" | "right" => Command::Move(Direction::Right),
            "answer" => Command::Answer(rest.to_owned()),
            "cancel" => Command::Cancel,
            "save" => Command::Save,
            "load" => Command::Load,
            "new" => Command::New,
            "pause" | "p" => Command::Pause,
            "resume" | "r" => Command::Resume,
            "map" | "m" => Command::Map,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => return Err(anyhow!("unknown command `{}` (try `help`)", input)),
        };
        Ok(command)
    }
}

impl Command {
    /// Interprets a raw line in the context of the current phase.
    pub fn parse_line(line: &str, phase: GamePhase) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if phase == GamePhase::Trivia {
            return match line.trim_start().strip_prefix('/') {
                Some(command) => command.parse(),
                None => Ok(Command::Answer(line.to_owned())),
            };
        }
        let line = line.trim();
        line.strip_prefix('/').unwrap_or(line).parse()
    }
}

const HELP: &str = "\
Move with w/a/s/d (or up/left/down/right). Doors (?) ask a question:
answer it to open the door (/), a wrong answer locks it (X) and costs a life.
Commands: save, load, new, pause, resume, map, help, quit.
While a question is open, type the answer or prefix commands with '/'.";

pub struct App<R, W> {
    model: GameModel,
    events: Receiver<GameEvent>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(model: GameModel, input: R, output: W) -> Self {
        let events = model.subscribe();
        Self {
            model,
            events,
            input,
            output,
        }
    }

    #[cfg(test)]
    fn into_model(self) -> GameModel {
        self.model
    }

    /// Reads commands until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Trivia Maze. Reach the exit room.\n{HELP}\n")?;
        self.draw()?;

        let mut line = String::new();
        loop {
            self.prompt()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            let command = match Command::parse_line(&line, self.model.state().phase()) {
                Ok(command) => command,
                Err(error) => {
                    writeln!(self.output, "{error}")?;
                    continue;
                }
            };

            tracing::debug!(?command, "command");
            if let ControlFlow::Break(()) = self.execute(command)? {
                break;
            }
            self.report_events()?;
        }

        tracing::info!(
            phase = %self.model.state().phase(),
            score = self.model.state().player().score(),
            "leaving game"
        );
        writeln!(self.output, "Bye.")?;
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<ControlFlow<()>> {
        match command {
            Command::Move(direction) => {
                self.model.state_mut().move_player(direction);
                self.draw()?;
            }
            Command::Answer(answer) => match self.model.answer_question(&answer) {
                Ok(result) => writeln!(self.output, "{result}!")?,
                Err(error) => self.report_error(error)?,
            },
            Command::Cancel => {
                if let Err(error) = self.model.cancel_question() {
                    self.report_error(error)?;
                }
            }
            Command::Save => match self.model.save_game() {
                Ok(()) => writeln!(self.output, "Game saved.")?,
                Err(error) => self.report_error(error)?,
            },
            Command::Load if !self.model.has_save() => writeln!(self.output, "No saved game.")?,
            Command::Load => match self.model.load_game() {
                Ok(()) => {
                    writeln!(self.output, "Game loaded.")?;
                    self.draw()?;
                }
                Err(error) => self.report_error(error)?,
            },
            Command::New => match self.model.new_game() {
                Ok(()) => {
                    writeln!(self.output, "New maze generated.")?;
                    self.draw()?;
                }
                Err(error) => self.report_error(error)?,
            },
            Command::Pause => {
                if !self.model.state_mut().pause() {
                    writeln!(self.output, "Nothing to pause.")?;
                }
            }
            Command::Resume => {
                if !self.model.state_mut().resume() {
                    writeln!(self.output, "Not paused.")?;
                }
            }
            Command::Map => self.draw()?,
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Quit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }

    fn report_error(&mut self, error: runtime::RuntimeError) -> Result<()> {
        tracing::warn!(%error, "command failed");
        let cause = std::error::Error::source(&error)
            .map(|source| format!(": {source}"))
            .unwrap_or_default();
        writeln!(self.output, "{error}{cause}")?;
        Ok(())
    }

    fn report_events(&mut self) -> Result<()> {
        while let Ok(event) = self.events.try_recv() {
            match &event {
                GameEvent::PhaseChanged {
                    phase: GamePhase::Victory,
                } => writeln!(
                    self.output,
                    "You found the exit! Final score: {}",
                    self.model.state().player().score()
                )?,
                GameEvent::PhaseChanged {
                    phase: GamePhase::Failure,
                } => writeln!(self.output, "Out of lives.")?,
                GameEvent::PhaseChanged {
                    phase: GamePhase::Paused,
                } => writeln!(self.output, "Paused.")?,
                _ => {}
            }
            if event.is_game_over() {
                writeln!(self.output, "Type `new` or `load` to play again.")?;
            }
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let state = self.model.state();
        let player = state.player();
        write!(self.output, "{}", state.maze().render(Some(player.position())))?;
        writeln!(
            self.output,
            "Room {:?}  Score {}  Lives {}  [{}]",
            player.position().room(),
            player.score(),
            player.lives(),
            state.phase()
        )?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        if let Some(question) = self.model.state().active_question() {
            writeln!(self.output, "\n{}", question.question())?;
            write!(self.output, "answer> ")?;
        } else {
            write!(self.output, "> ")?;
        }
        self.output.flush()?;
        Ok(())
    }
}
