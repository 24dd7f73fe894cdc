//! The corridor and intersection rule for non-player actors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::{BoardQuery, Coord, Heading, is_open};

/// A non-player actor on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    /// Current cell.
    pub coord: Coord,
    /// Current heading, `None` before the first move.
    pub heading: Option<Heading>,
}

impl Enemy {
    /// Create an enemy at `coord` facing `heading`.
    #[must_use]
    pub const fn new(coord: Coord, heading: Option<Heading>) -> Self {
        Self { coord, heading }
    }

    /// Replace position and heading with the result of a tick.
    pub fn apply(&mut self, step: Step) {
        *self = Self::new(step.coord, step.heading);
    }
}

impl fmt::Display for Enemy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.coord, Heading::label(self.heading))
    }
}

/// Next position and heading for one actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Cell after the tick.
    pub coord: Coord,
    /// Heading after the tick.
    pub heading: Option<Heading>,
}

impl Step {
    /// Turn onto `heading` and take one step along it.
    #[must_use]
    pub const fn toward(from: Coord, heading: Heading) -> Self {
        Self {
            coord: from.moved(Some(heading)),
            heading: Some(heading),
        }
    }
}

/// Directions an actor may take this tick.
///
/// Fixed capacity, no heap. Order follows [`Heading::MOVING`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Available {
    headings: [Heading; 4],
    len: usize,
}

impl Available {
    const fn empty() -> Self {
        Self {
            headings: [Heading::Up; 4],
            len: 0,
        }
    }

    fn push(&mut self, heading: Heading) {
        self.headings[self.len] = heading;
        self.len += 1;
    }

    /// The available headings as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Heading] {
        &self.headings[..self.len]
    }

    /// Number of available headings.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether no heading is available.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `heading` is available.
    #[must_use]
    pub fn contains(&self, heading: Heading) -> bool {
        self.as_slice().contains(&heading)
    }
}

/// Outcome of resolving one actor's move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// The rule fixed the next state.
    Decided(Step),
    /// A branching cell: three or more directions are available and the
    /// choice belongs to an intersection policy.
    Undecided(Available),
}

/// Every moving heading that is open and is not the reverse of the actor's
/// current heading.
///
/// An actor without a heading has no reversal constraint.
#[must_use]
pub fn available_directions<B: BoardQuery + ?Sized>(enemy: &Enemy, board: &B) -> Available {
    let reverse = enemy.heading.map(Heading::opposite);
    let mut available = Available::empty();
    for heading in Heading::MOVING {
        if Some(heading) != reverse && is_open(board, enemy.coord, Some(heading)) {
            available.push(heading);
        }
    }
    available
}

/// Resolve the actor's next state by the number of available directions.
///
/// - none: stay put, heading unchanged;
/// - one: turn onto it and step;
/// - two: keep going along the current heading, even when it is not one
///   of the two (momentum through non-branching cells);
/// - three or more: [`Movement::Undecided`].
#[must_use]
pub fn resolve<B: BoardQuery + ?Sized>(enemy: &Enemy, board: &B) -> Movement {
    let available = available_directions(enemy, board);
    match available.as_slice() {
        [] => Movement::Decided(Step {
            coord: enemy.coord,
            heading: enemy.heading,
        }),
        [only] => Movement::Decided(Step::toward(enemy.coord, *only)),
        [_, _] => Movement::Decided(Step {
            coord: enemy.coord.moved(enemy.heading),
            heading: enemy.heading,
        }),
        _ => Movement::Undecided(available),
    }
}
