//! Trivia maze terminal client.
//!
//! This binary is the composition root: it reads configuration from the
//! environment, sets up file logging, loads question and game content, and
//! hands a [`runtime::GameModel`] to the line-based front-end.
//!
//! ```bash
//! TRIVIA_CONFIG_FILE=game.toml TRIVIA_SAVE_FILE=save.json cargo run -p trivia-maze
//! ```

mod app;
mod config;
mod logging;

use std::io;

use anyhow::{Context, Result};
use maze_content::{ConfigLoader, GameConfigFile, QuestionLoader, QuestionPool};
use maze_core::{RectangleMazeGenerator, clock_seed};
use runtime::{FileSaveRepository, GameModel};

use app::App;
use config::ClientConfig;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(&config)?;

    tracing::info!("Starting trivia maze");
    tracing::info!("Save file: {}", config.save_file.display());

    let game_config = match &config.config_file {
        Some(path) => ConfigLoader::load(path)?,
        None => GameConfigFile::default(),
    };
    let questions = match &config.questions_file {
        Some(path) => QuestionLoader::load(path)?,
        None => QuestionLoader::builtin()?,
    };
    tracing::info!("Loaded {} questions", questions.len());

    let seed = game_config.maze.seed.unwrap_or_else(clock_seed);
    let pool = QuestionPool::new(questions, seed).context("question catalog is empty")?;
    let generator = RectangleMazeGenerator::new(game_config.maze, pool);
    let repository = FileSaveRepository::new(&config.save_file)
        .with_context(|| format!("cannot use save file {}", config.save_file.display()))?;

    let model = GameModel::new(generator, game_config.settings, repository)
        .context("failed to start game")?;

    let stdin = io::stdin();
    App::new(model, stdin.lock(), io::stdout()).run()?;

    tracing::info!("Client shutdown complete");
    Ok(())
}

