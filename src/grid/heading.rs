//! Coordinates, headings and the per-heading step deltas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A cell on the grid.
///
/// Signed so that a step off the top or left edge is representable; such a
/// cell is simply never passable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    /// Column.
    pub x: i32,
    /// Row, growing downwards.
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step along `heading`.
    ///
    /// A `None` heading is a no-op and returns `self`. Steps wrap at the
    /// `i32` range, which lands far outside any board.
    #[must_use]
    #[inline]
    pub const fn moved(self, heading: Option<Heading>) -> Self {
        match heading {
            Some(Heading::Up) => Self::new(self.x, self.y.wrapping_sub(1)),
            Some(Heading::Down) => Self::new(self.x, self.y.wrapping_add(1)),
            Some(Heading::Right) => Self::new(self.x.wrapping_add(1), self.y),
            Some(Heading::Left) => Self::new(self.x.wrapping_sub(1), self.y),
            None => self,
        }
    }

    /// Manhattan distance to another cell.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// One of the four moving headings.
///
/// The "none" state (not yet moved, or immobile) is `Option<Heading>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heading {
    /// Row - 1.
    Up,
    /// Row + 1.
    Down,
    /// Column - 1.
    Left,
    /// Column + 1.
    Right,
}

impl Heading {
    /// All moving headings, in the order available directions are enumerated.
    pub const MOVING: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    /// The reverse heading.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    /// Wire name of the heading.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Heading::Up => "up",
            Heading::Down => "down",
            Heading::Left => "left",
            Heading::Right => "right",
        }
    }

    /// Wire name of an optional heading, `none` for no heading.
    #[must_use]
    pub const fn label(heading: Option<Self>) -> &'static str {
        match heading {
            Some(h) => h.as_str(),
            None => "none",
        }
    }

    /// Parse a wire name, accepting `none` as no heading.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a heading name.
    pub fn parse_optional(s: &str) -> Result<Option<Self>, ParseHeadingError> {
        if s.eq_ignore_ascii_case("none") {
            Ok(None)
        } else {
            s.parse().map(Some)
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown heading name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown heading `{0}` (expected up, down, left, right or none)")]
pub struct ParseHeadingError(pub String);

impl FromStr for Heading {
    type Err = ParseHeadingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Heading::Up),
            "down" => Ok(Heading::Down),
            "left" => Ok(Heading::Left),
            "right" => Ok(Heading::Right),
            _ => Err(ParseHeadingError(s.to_string())),
        }
    }
}

/// The heading that turns `from` into `to`.
///
/// Checks run in a fixed order: column increase (right), column decrease
/// (left), row increase (down), row decrease (up). Diagonal or non-adjacent
/// pairs resolve to the first axis that differs. Equal cells give `None`.
#[must_use]
pub const fn direction_between(from: Coord, to: Coord) -> Option<Heading> {
    if to.x > from.x {
        Some(Heading::Right)
    } else if to.x < from.x {
        Some(Heading::Left)
    } else if to.y > from.y {
        Some(Heading::Down)
    } else if to.y < from.y {
        Some(Heading::Up)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moved_deltas() {
        let c = Coord::new(5, 5);
        assert_eq!(c.moved(Some(Heading::Up)), Coord::new(5, 4));
        assert_eq!(c.moved(Some(Heading::Down)), Coord::new(5, 6));
        assert_eq!(c.moved(Some(Heading::Left)), Coord::new(4, 5));
        assert_eq!(c.moved(Some(Heading::Right)), Coord::new(6, 5));
    }

    #[test]
    fn test_moved_none_is_noop() {
        let c = Coord::new(3, 7);
        assert_eq!(c.moved(None), c);
    }

    #[test]
    fn test_moved_off_edge_goes_negative() {
        assert_eq!(Coord::new(0, 0).moved(Some(Heading::Up)), Coord::new(0, -1));
        assert_eq!(Coord::new(0, 0).moved(Some(Heading::Left)), Coord::new(-1, 0));
    }

    #[test]
    fn test_moved_wraps_at_range_limits() {
        let far = Coord::new(i32::MAX, i32::MIN);
        assert_eq!(far.moved(Some(Heading::Right)), Coord::new(i32::MIN, i32::MIN));
        assert_eq!(far.moved(Some(Heading::Up)), Coord::new(i32::MAX, i32::MAX));
        assert_eq!(Coord::new(i32::MIN, 0).manhattan(Coord::new(i32::MAX, i32::MAX)), u32::MAX);
    }

    #[test]
    fn test_opposite_is_involution() {
        for h in Heading::MOVING {
            assert_ne!(h.opposite(), h);
            assert_eq!(h.opposite().opposite(), h);
        }
        assert_eq!(Heading::Up.opposite(), Heading::Down);
        assert_eq!(Heading::Left.opposite(), Heading::Right);
    }

    #[test]
    fn test_direction_between_adjacent() {
        let c = Coord::new(2, 2);
        for h in Heading::MOVING {
            assert_eq!(direction_between(c, c.moved(Some(h))), Some(h));
        }
    }

    #[test]
    fn test_direction_between_same_cell() {
        assert_eq!(direction_between(Coord::new(1, 1), Coord::new(1, 1)), None);
    }

    #[test]
    fn test_direction_between_prefers_columns() {
        let from = Coord::new(5, 5);
        assert_eq!(direction_between(from, Coord::new(6, 9)), Some(Heading::Right));
        assert_eq!(direction_between(from, Coord::new(4, 0)), Some(Heading::Left));
        assert_eq!(direction_between(from, Coord::new(5, 9)), Some(Heading::Down));
        assert_eq!(direction_between(from, Coord::new(5, 0)), Some(Heading::Up));
    }

    #[test]
    fn test_heading_parse() {
        assert_eq!("up".parse::<Heading>(), Ok(Heading::Up));
        assert_eq!("RIGHT".parse::<Heading>(), Ok(Heading::Right));
        assert!("north".parse::<Heading>().is_err());
        assert_eq!(Heading::parse_optional("none"), Ok(None));
        assert_eq!(Heading::parse_optional("left"), Ok(Some(Heading::Left)));
    }

    #[test]
    fn test_heading_label() {
        assert_eq!(Heading::label(Some(Heading::Down)), "down");
        assert_eq!(Heading::label(None), "none");
    }
}
