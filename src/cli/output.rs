//! Output formatting utilities for CLI.

use pursuit::grid::Tile;
use pursuit::{Board, Coord, Enemy, Heading, MatchSummary, TickReport};
use serde::Serialize;
use std::fmt::Write;

/// JSON-serializable simulation trace.
#[derive(Debug, Serialize)]
pub(super) struct JsonTrace<'a> {
    /// Board width in cells.
    pub(super) width: u16,
    /// Board height in cells.
    pub(super) height: u16,
    /// Enemy state before the first tick.
    pub(super) start: &'a [Enemy],
    /// One entry per tick.
    pub(super) ticks: &'a [TickReport],
}

/// Draw the board with enemies on it.
///
/// Enemies are drawn as an arrow for their heading, `o` when they have
/// none. One line per enemy follows the board.
pub(super) fn render_board(board: &Board, enemies: &[Enemy]) -> String {
    let mut output = String::new();

    for y in 0..i32::from(board.height()) {
        for x in 0..i32::from(board.width()) {
            let coord = Coord::new(x, y);
            let ch = match enemies.iter().find(|e| e.coord == coord) {
                Some(enemy) => heading_glyph(enemy.heading),
                None => board.get(coord).map_or(' ', Tile::symbol),
            };
            output.push(ch);
        }
        output.push('\n');
    }

    write_enemy_list(&mut output, enemies);
    output
}

/// One `enemy <index>: <state>` line per enemy.
fn write_enemy_list(output: &mut String, enemies: &[Enemy]) {
    for (idx, enemy) in enemies.iter().enumerate() {
        // Writing to a String cannot fail.
        let _ = writeln!(output, "  enemy {idx}: {enemy}");
    }
}

fn heading_glyph(heading: Option<Heading>) -> char {
    match heading {
        Some(Heading::Up) => '^',
        Some(Heading::Down) => 'v',
        Some(Heading::Left) => '<',
        Some(Heading::Right) => '>',
        None => 'o',
    }
}

/// Format a match summary as human-readable text.
pub(super) fn format_summary(summary: &MatchSummary) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "Match ended ({:?}) after {} ticks, {} other messages",
        summary.reason, summary.ticks, summary.ignored_messages
    );
    write_enemy_list(&mut output, &summary.enemies);
    output
}
