//! Enemy movement resolution.
//!
//! Each tick an enemy's next cell follows from three fixed rules:
//! - never reverse onto the opposite of the current heading;
//! - with a single way out, take it;
//! - with two ways out (corridor or bend past a non-branching cell), keep
//!   the current heading.
//!
//! Cells with three or more ways out are branching intersections. The
//! corridor rule reports them as [`Movement::Undecided`] and an
//! [`IntersectionPolicy`] picks the way.

mod resolver;
mod strategy;

pub use resolver::{Available, Enemy, Movement, Step, available_directions, resolve};
pub use strategy::{CorridorAi, EnemyAi, IntersectionPolicy, PursuitAi, Rng};
