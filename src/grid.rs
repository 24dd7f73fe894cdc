//! Directional geometry and the board query capability.
//!
//! Pure helpers mapping a cell and a heading to a neighbouring cell, plus
//! the read-only "is this cell enterable" question the movement resolver
//! asks of the board.

mod board;
mod heading;

pub use board::{Board, BoardQuery, Tile, is_open};
pub use heading::{Coord, Heading, ParseHeadingError, direction_between};
