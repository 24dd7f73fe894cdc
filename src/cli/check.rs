//! Board check command implementation.

use super::CliError;
use pursuit::Board;
use std::path::Path;

/// Execute the check-board command.
///
/// # Errors
///
/// Returns an error if the board file cannot be read or parsed.
pub(crate) fn execute(path: &Path) -> Result<(), CliError> {
    let board = Board::load(path)?;

    println!("Board: {}", path.display());
    println!("  Size:       {}x{}", board.width(), board.height());
    println!("  Open cells: {}", board.open_cells());
    println!();
    print!("{board}");

    Ok(())
}
