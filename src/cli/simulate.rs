//! Simulate command implementation.

use super::output::{JsonTrace, render_board};
use super::{CliError, OutputFormat, check_enemies_on_board, load_config};
use pursuit::referee::simulate;
use pursuit::{Board, Enemy, IntersectionPolicy, PursuitAi};
use std::path::Path;

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the board or config cannot be loaded.
pub(crate) fn execute(
    board_path: &Path,
    enemies: Vec<Enemy>,
    ticks: u32,
    format: OutputFormat,
    config_path: Option<&Path>,
) -> Result<(), CliError> {
    let board = Board::load(board_path)?;
    check_enemies_on_board(&board, &enemies)?;
    let config = load_config(config_path)?;
    let mut ai = PursuitAi::new(IntersectionPolicy::from(&config.policy));

    let start = enemies.clone();
    let mut current = enemies;
    let reports = simulate(&board, &mut current, &mut ai, ticks);

    match format {
        OutputFormat::Text => {
            println!("=== Tick 0 ===");
            print!("{}", render_board(&board, &start));
            for report in &reports {
                println!();
                println!("=== Tick {} ===", report.tick);
                print!("{}", render_board(&board, &report.enemies));
            }
        }
        OutputFormat::Json => {
            let trace = JsonTrace {
                width: board.width(),
                height: board.height(),
                start: &start,
                ticks: &reports,
            };
            let json = serde_json::to_string_pretty(&trace)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
