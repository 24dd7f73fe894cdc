//! Run command implementation.

use super::output::format_summary;
use super::{CliError, check_enemies_on_board, load_config};
use pursuit::{Board, Enemy, IntersectionPolicy, IoHandler, PursuitAi, Referee};
use std::path::Path;

/// Execute the run command.
///
/// Stdout carries the protocol, so the summary goes to stderr.
///
/// # Errors
///
/// Returns an error if the board, config or replay file cannot be loaded,
/// or if the protocol stream fails.
pub(crate) fn execute(
    board_path: &Path,
    enemies: Vec<Enemy>,
    replay: Option<&Path>,
    config_path: Option<&Path>,
    max_ticks: Option<u32>,
) -> Result<(), CliError> {
    let board = Board::load(board_path)?;
    let mut config = load_config(config_path)?;
    if max_ticks.is_some() {
        config.max_ticks = max_ticks;
    }

    check_enemies_on_board(&board, &enemies)?;

    let io = match replay {
        Some(path) => IoHandler::replay(path)?,
        None => IoHandler::live(),
    };
    tracing::info!(
        replay = io.is_replay(),
        enemies = enemies.len(),
        "starting referee"
    );

    let ai = PursuitAi::new(IntersectionPolicy::from(&config.policy));
    let mut referee = Referee::new(io, board, enemies, Box::new(ai), config);
    let summary = referee.run()?;

    eprint!("{}", format_summary(&summary));
    Ok(())
}
