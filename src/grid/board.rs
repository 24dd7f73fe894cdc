//! Board capability and a concrete rectangular board.

use std::fmt;
use std::path::Path;

use crate::error::BoardError;
use crate::grid::{Coord, Heading};

/// Read-only passability query the movement resolver consumes.
///
/// Implementations must be side-effect free: the resolver may ask about
/// the same cell several times within one tick.
pub trait BoardQuery {
    /// Whether an actor may enter `coord` (in bounds, not a wall, not blocked).
    fn is_coordinate_valid(&self, coord: Coord) -> bool;
}

impl<B: BoardQuery + ?Sized> BoardQuery for &B {
    fn is_coordinate_valid(&self, coord: Coord) -> bool {
        (**self).is_coordinate_valid(coord)
    }
}

/// Whether the cell one step along `heading` from `coord` can be entered.
///
/// Always `false` for a `None` heading.
#[must_use]
#[inline]
pub fn is_open<B: BoardQuery + ?Sized>(board: &B, coord: Coord, heading: Option<Heading>) -> bool {
    match heading {
        Some(_) => board.is_coordinate_valid(coord.moved(heading)),
        None => false,
    }
}

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Tile {
    /// Enterable cell.
    Open = 0,
    /// Impassable cell.
    Wall = 1,
}

impl Tile {
    /// Check if this tile can be entered.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        matches!(self, Tile::Open)
    }

    /// Text form used by [`Board::parse`] and `Display`.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Tile::Open => '.',
            Tile::Wall => 'x',
        }
    }

    fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Tile::Open),
            'x' | 'X' | '#' => Some(Tile::Wall),
            _ => None,
        }
    }
}

/// A rectangular board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Width in cells.
    width: u16,
    /// Height in cells.
    height: u16,
    /// Tiles stored in row-major order.
    tiles: Vec<Tile>,
}

impl Board {
    /// Create a new board with every cell open.
    ///
    /// Returns `None` if width or height is zero.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let size = usize::from(width) * usize::from(height);
        Some(Self {
            width,
            height,
            tiles: vec![Tile::Open; size],
        })
    }

    /// Parse a board from text, one row per line.
    ///
    /// `.` is open, `x`, `X` and `#` are walls. Blank lines are ignored and
    /// trailing whitespace is stripped; every row must have the same width.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty board, ragged rows, unknown symbols or
    /// a board wider or taller than `u16::MAX`.
    pub fn parse(text: &str) -> Result<Self, BoardError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();

        let Some(first) = rows.first() else {
            return Err(BoardError::Empty);
        };
        let width = first.chars().count();
        let too_large = |dim: usize| BoardError::TooLarge(dim);
        let w = u16::try_from(width).map_err(|_| too_large(width))?;
        let h = u16::try_from(rows.len()).map_err(|_| too_large(rows.len()))?;

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(BoardError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let tile = Tile::from_symbol(ch).ok_or(BoardError::InvalidTile { row, col, ch })?;
                tiles.push(tile);
            }
        }

        Ok(Self {
            width: w,
            height: h,
            tiles,
        })
    }

    /// Read and parse a board file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: &Path) -> Result<Self, BoardError> {
        let text = std::fs::read_to_string(path).map_err(|source| BoardError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Get the width of the board.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the height of the board.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Check if a coordinate is within the board bounds.
    #[must_use]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.x < i32::from(self.width)
            && coord.y < i32::from(self.height)
    }

    /// Convert a coordinate to an index into the tiles array.
    fn index(&self, coord: Coord) -> Option<usize> {
        if !self.in_bounds(coord) {
            return None;
        }
        let x = usize::try_from(coord.x).ok()?;
        let y = usize::try_from(coord.y).ok()?;
        Some(y * usize::from(self.width) + x)
    }

    /// Get the tile at the given coordinate.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<Tile> {
        self.index(coord).map(|idx| self.tiles[idx])
    }

    /// Set the tile at the given coordinate.
    ///
    /// Returns `false` if the coordinate is out of bounds.
    pub fn set(&mut self, coord: Coord, tile: Tile) -> bool {
        if let Some(idx) = self.index(coord) {
            self.tiles[idx] = tile;
            true
        } else {
            false
        }
    }

    /// Iterate over all coordinates and tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Tile)> + '_ {
        let width = usize::from(self.width);
        self.tiles.iter().enumerate().map(move |(idx, tile)| {
            // Both fit: width and height are u16.
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let coord = Coord::new((idx % width) as i32, (idx / width) as i32);
            (coord, *tile)
        })
    }

    /// Number of enterable cells.
    #[must_use]
    pub fn open_cells(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_passable()).count()
    }
}

impl BoardQuery for Board {
    fn is_coordinate_valid(&self, coord: Coord) -> bool {
        self.get(coord).is_some_and(Tile::is_passable)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(usize::from(self.width)) {
            for tile in row {
                write!(f, "{}", tile.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
