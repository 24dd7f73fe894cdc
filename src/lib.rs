// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Pursuit: enemy movement and turn protocol core for a grid pursuit game
//! referee.
//!
//! This crate provides the two pieces of the referee that must stay
//! deterministic for a match to be replayable:
//! - Enemy movement resolution (no reversal, forced corridors, pluggable
//!   intersection policy)
//! - A blocking, line-oriented protocol with the bot wrapper process,
//!   reading either live standard input or a recorded file
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        Referee (tick loop)          │
//! ├──────────────────┬──────────────────┤
//! │  Enemy resolver  │  Protocol (I/O)  │
//! ├──────────────────┴──────────────────┤
//! │   Grid geometry + board query       │
//! └─────────────────────────────────────┘
//! ```

pub mod config;
pub mod enemy;
pub mod error;
pub mod grid;
pub mod protocol;
pub mod referee;

pub use config::{PolicyConfig, RefereeConfig};
pub use enemy::{Enemy, EnemyAi, IntersectionPolicy, Movement, PursuitAi, Step};
pub use error::{BoardError, ConfigError, ProtocolError};
pub use grid::{Board, BoardQuery, Coord, Heading, direction_between, is_open};
pub use protocol::{IoHandler, MessageSource, WaitOutcome};
pub use referee::{EndReason, MatchSummary, Referee, TickReport};
