//! Pluggable decision strategies for enemy actors.
//!
//! [`CorridorAi`] is the bare corridor rule and leaves branching cells
//! undecided. [`PursuitAi`] pairs the rule with an [`IntersectionPolicy`]
//! so every tick ends with a decided step.

use std::fmt;

use crate::enemy::{Available, Enemy, Movement, Step, resolve};
use crate::grid::{BoardQuery, Coord, Heading};

/// Decides an enemy's move for one tick.
pub trait EnemyAi: fmt::Debug {
    /// Compute the move for `enemy` against a read-only board.
    fn decide(&mut self, enemy: &Enemy, board: &dyn BoardQuery) -> Movement;
}

/// The corridor rule on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorridorAi;

impl EnemyAi for CorridorAi {
    fn decide(&mut self, enemy: &Enemy, board: &dyn BoardQuery) -> Movement {
        resolve(enemy, board)
    }
}

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        // xorshift has a fixed point at zero
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Generate next random u64.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random index in `[0, len)`; zero when `len` is zero.
    pub fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        // len is at most 4 here, and usize is never narrower than u32.
        #[allow(clippy::cast_possible_truncation)]
        let idx = (self.next_u64() % len as u64) as usize;
        idx
    }
}

/// How a branching cell is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntersectionPolicy {
    /// Take the first heading of `order` that is available, falling back to
    /// the first available heading.
    FixedPriority(Vec<Heading>),
    /// Greedy one-step approach: the available heading whose next cell is
    /// closest (Manhattan) to `target`. Ties keep the earlier heading.
    Chase {
        /// Cell to approach.
        target: Coord,
    },
    /// Seeded uniform choice among the available headings.
    Wander(Rng),
}

impl Default for IntersectionPolicy {
    fn default() -> Self {
        Self::FixedPriority(vec![Heading::Up, Heading::Left, Heading::Down, Heading::Right])
    }
}

impl IntersectionPolicy {
    /// Pick one heading from `available`.
    ///
    /// Returns `None` only when nothing is available.
    pub fn choose(&mut self, enemy: &Enemy, available: &Available) -> Option<Heading> {
        let options = available.as_slice();
        match self {
            Self::FixedPriority(order) => order
                .iter()
                .copied()
                .find(|h| available.contains(*h))
                .or_else(|| options.first().copied()),
            Self::Chase { target } => {
                let target = *target;
                // min_by_key keeps the first minimum
                options
                    .iter()
                    .copied()
                    .min_by_key(|h| enemy.coord.moved(Some(*h)).manhattan(target))
            }
            Self::Wander(rng) => {
                if options.is_empty() {
                    None
                } else {
                    Some(options[rng.next_index(options.len())])
                }
            }
        }
    }

    /// Point a [`Chase`](Self::Chase) policy at a new target.
    ///
    /// Other policies are left unchanged.
    pub fn retarget(&mut self, new_target: Coord) {
        if let Self::Chase { target } = self {
            *target = new_target;
        }
    }
}

/// Corridor rule plus an intersection policy.
#[derive(Debug, Clone, Default)]
pub struct PursuitAi {
    policy: IntersectionPolicy,
}

impl PursuitAi {
    /// Create an AI that resolves branching cells with `policy`.
    #[must_use]
    pub fn new(policy: IntersectionPolicy) -> Self {
        Self { policy }
    }

    /// The intersection policy.
    #[must_use]
    pub fn policy(&self) -> &IntersectionPolicy {
        &self.policy
    }

    /// Mutable access to the intersection policy.
    pub fn policy_mut(&mut self) -> &mut IntersectionPolicy {
        &mut self.policy
    }
}

impl EnemyAi for PursuitAi {
    fn decide(&mut self, enemy: &Enemy, board: &dyn BoardQuery) -> Movement {
        match resolve(enemy, board) {
            Movement::Undecided(available) => {
                let step = self.policy.choose(enemy, &available).map_or(
                    Step {
                        coord: enemy.coord,
                        heading: enemy.heading,
                    },
                    |heading| Step::toward(enemy.coord, heading),
                );
                tracing::trace!(enemy = %enemy, choice = Heading::label(step.heading), "intersection");
                Movement::Decided(step)
            }
            decided @ Movement::Decided(_) => decided,
        }
    }
}
