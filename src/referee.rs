//! Tick orchestration: pulls protocol messages and advances the enemies.
//!
//! The referee does not apply player moves, keep score or decide when the
//! game is over. It reacts to three kinds of message:
//! - the configured tick token advances every enemy once and (optionally)
//!   broadcasts the new positions;
//! - the end token stops the match;
//! - anything else is player traffic handled elsewhere and is skipped.
//!
//! Because the resolver is a pure function of the board and the enemy
//! state, the same input stream always produces the same match.

use std::io::{Stdout, Write};

use serde::Serialize;

use crate::config::RefereeConfig;
use crate::enemy::{Enemy, EnemyAi, Movement};
use crate::error::ProtocolError;
use crate::grid::{Board, BoardQuery, Heading};
use crate::protocol::{IoHandler, WaitOutcome};

/// Why a match loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The end token was received.
    EndToken,
    /// The input source ran out (or the handshake never arrived).
    InputExhausted,
    /// The configured tick limit was reached.
    TickLimit,
}

/// Enemy state after one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickReport {
    /// Tick number, starting at 1.
    pub tick: u32,
    /// Every enemy after the tick, in index order.
    pub enemies: Vec<Enemy>,
    /// Indices of enemies left at a branching cell with no decision.
    pub undecided: Vec<usize>,
}

/// Outcome of [`Referee::run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    /// Ticks played.
    pub ticks: u32,
    /// Messages that were neither tick nor end tokens.
    pub ignored_messages: u64,
    /// Why the loop stopped.
    pub reason: EndReason,
    /// Final enemy state.
    pub enemies: Vec<Enemy>,
}

/// Resolve every enemy exactly once against the same board.
///
/// An undecided enemy keeps its position and heading; its index is
/// returned so the caller can see it was not moved.
pub fn advance(enemies: &mut [Enemy], board: &dyn BoardQuery, ai: &mut dyn EnemyAi) -> Vec<usize> {
    let mut undecided = Vec::new();
    for (idx, enemy) in enemies.iter_mut().enumerate() {
        match ai.decide(enemy, board) {
            Movement::Decided(step) => enemy.apply(step),
            Movement::Undecided(available) => {
                tracing::debug!(
                    enemy = idx,
                    options = available.len(),
                    "branching cell left undecided"
                );
                undecided.push(idx);
            }
        }
    }
    undecided
}

/// Run `ticks` ticks without any protocol traffic.
pub fn simulate(
    board: &Board,
    enemies: &mut [Enemy],
    ai: &mut dyn EnemyAi,
    ticks: u32,
) -> Vec<TickReport> {
    (1..=ticks)
        .map(|tick| {
            let undecided = advance(enemies, board, ai);
            TickReport {
                tick,
                enemies: enemies.to_vec(),
                undecided,
            }
        })
        .collect()
}

/// Protocol-driven match loop for the enemy side of the game.
#[derive(Debug)]
pub struct Referee<W: Write = Stdout> {
    io: IoHandler<W>,
    board: Board,
    enemies: Vec<Enemy>,
    ai: Box<dyn EnemyAi>,
    config: RefereeConfig,
    ticks: u32,
    ignored: u64,
}

impl<W: Write> Referee<W> {
    /// Create a referee. The handler's poll delay is taken from `config`.
    #[must_use]
    pub fn new(
        mut io: IoHandler<W>,
        board: Board,
        enemies: Vec<Enemy>,
        ai: Box<dyn EnemyAi>,
        config: RefereeConfig,
    ) -> Self {
        io.set_poll_delay(config.poll_delay());
        Self {
            io,
            board,
            enemies,
            ai,
            config,
            ticks: 0,
            ignored: 0,
        }
    }

    /// Current enemy state.
    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Ticks played so far.
    #[must_use]
    pub const fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Consume the referee and return its protocol handler.
    #[must_use]
    pub fn into_io(self) -> IoHandler<W> {
        self.io
    }

    /// Advance every enemy once.
    pub fn tick(&mut self) -> TickReport {
        self.ticks += 1;
        let undecided = advance(&mut self.enemies, &self.board, self.ai.as_mut());
        tracing::debug!(tick = self.ticks, "enemies advanced");
        TickReport {
            tick: self.ticks,
            enemies: self.enemies.clone(),
            undecided,
        }
    }

    /// Broadcast one `enemy <index> <x> <y> <heading>` line per enemy.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn broadcast_positions(&mut self) -> Result<(), ProtocolError> {
        for (idx, enemy) in self.enemies.iter().enumerate() {
            let line = format!(
                "enemy {idx} {} {} {}",
                enemy.coord.x,
                enemy.coord.y,
                Heading::label(enemy.heading)
            );
            self.io.broadcast(&line)?;
        }
        Ok(())
    }

    /// Run the match loop until the end token, the tick limit, or the end
    /// of input.
    ///
    /// Running out of input is a normal end, never retried.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails to read or the output fails to
    /// write.
    pub fn run(&mut self) -> Result<MatchSummary, ProtocolError> {
        if let Some(handshake) = self.config.handshake.clone() {
            if self.io.wait_for(&handshake) == WaitOutcome::Exhausted {
                return Ok(self.finish(EndReason::InputExhausted));
            }
            tracing::info!(handshake = %handshake, "handshake received");
        }

        let reason = loop {
            if self.limit_reached() {
                break EndReason::TickLimit;
            }
            let message = match self.io.next_message() {
                Ok(message) => message,
                Err(ProtocolError::EndOfInput) => break EndReason::InputExhausted,
                Err(err) => return Err(err),
            };

            if message == self.config.end_token {
                break EndReason::EndToken;
            }
            if message != self.config.tick_token {
                self.ignored += 1;
                tracing::debug!(%message, "not a referee message");
                continue;
            }

            self.tick();
            if self.config.broadcast_positions {
                self.broadcast_positions()?;
            }
        };

        Ok(self.finish(reason))
    }

    fn limit_reached(&self) -> bool {
        self.config.max_ticks.is_some_and(|max| self.ticks >= max)
    }

    fn finish(&self, reason: EndReason) -> MatchSummary {
        tracing::info!(ticks = self.ticks, ignored = self.ignored, ?reason, "match loop finished");
        MatchSummary {
            ticks: self.ticks,
            ignored_messages: self.ignored,
            reason,
            enemies: self.enemies.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::{CorridorAi, PursuitAi};
    use crate::grid::Coord;
    use crate::protocol::MessageSource;
    use std::io::Cursor;

    const CORRIDOR: &str = "\
xxxxxxx
x.....x
xxxxxxx
";

    fn referee(input: &'static str, config: RefereeConfig) -> Referee<Vec<u8>> {
        let io = IoHandler::with_source(MessageSource::replay_from("mem", Cursor::new(input)), Vec::new());
        Referee::new(
            io,
            Board::parse(CORRIDOR).unwrap(),
            vec![Enemy::new(Coord::new(1, 1), Some(Heading::Right))],
            Box::new(PursuitAi::default()),
            config,
        )
    }

    fn output(referee: Referee<Vec<u8>>) -> String {
        String::from_utf8(referee.into_io().into_writer()).unwrap()
    }

    #[test]
    fn test_run_ticks_and_broadcasts() {
        let mut r = referee("hello\nstart\ntick\nplayer 0 up\ntick\nend\ntick\n", RefereeConfig::default());
        let summary = r.run().unwrap();
        assert_eq!(summary.reason, EndReason::EndToken);
        assert_eq!(summary.ticks, 2);
        assert_eq!(summary.ignored_messages, 1);
        assert_eq!(summary.enemies[0].coord, Coord::new(3, 1));
        assert_eq!(
            output(r),
            "bot all send enemy 0 2 1 right\nbot all send enemy 0 3 1 right\n"
        );
    }

    #[test]
    fn test_run_missing_handshake() {
        let mut r = referee("tick\ntick\n", RefereeConfig::default());
        let summary = r.run().unwrap();
        assert_eq!(summary.reason, EndReason::InputExhausted);
        assert_eq!(summary.ticks, 0);
    }

    #[test]
    fn test_run_end_of_input() {
        let config = RefereeConfig {
            handshake: None,
            broadcast_positions: false,
            ..RefereeConfig::default()
        };
        let mut r = referee("tick\n", config);
        let summary = r.run().unwrap();
        assert_eq!(summary.reason, EndReason::InputExhausted);
        assert_eq!(summary.ticks, 1);
        assert_eq!(output(r), "");
    }

    #[test]
    fn test_run_tick_limit() {
        let config = RefereeConfig {
            handshake: None,
            max_ticks: Some(2),
            ..RefereeConfig::default()
        };
        let mut r = referee("tick\ntick\ntick\n", config);
        let summary = r.run().unwrap();
        assert_eq!(summary.reason, EndReason::TickLimit);
        assert_eq!(summary.ticks, 2);
    }

    #[test]
    fn test_run_survives_invalid_utf8() {
        let io = IoHandler::with_source(
            MessageSource::replay_from("mem", Cursor::new(&b"start\nbot0 \xfe\ntick\nend\n"[..])),
            Vec::new(),
        );
        let mut r = Referee::new(
            io,
            Board::parse(CORRIDOR).unwrap(),
            vec![Enemy::new(Coord::new(1, 1), Some(Heading::Right))],
            Box::new(PursuitAi::default()),
            RefereeConfig::default(),
        );
        let summary = r.run().unwrap();
        assert_eq!(summary.reason, EndReason::EndToken);
        assert_eq!(summary.ticks, 1);
        assert_eq!(summary.ignored_messages, 1);
    }

    #[test]
    fn test_run_zero_tick_limit_plays_nothing() {
        let config = RefereeConfig {
            handshake: None,
            max_ticks: Some(0),
            ..RefereeConfig::default()
        };
        let mut r = referee("tick\ntick\n", config);
        let summary = r.run().unwrap();
        assert_eq!(summary.reason, EndReason::TickLimit);
        assert_eq!(summary.ticks, 0);
        assert_eq!(summary.enemies[0].coord, Coord::new(1, 1));
        assert_eq!(output(r), "");
    }

    #[test]
    fn test_corridor_dead_end_stalls() {
        let board = Board::parse(CORRIDOR).unwrap();
        let mut enemies = vec![Enemy::new(Coord::new(1, 1), Some(Heading::Right))];
        let reports = simulate(&board, &mut enemies, &mut CorridorAi, 6);
        let xs: Vec<i32> = reports.iter().map(|r| r.enemies[0].coord.x).collect();
        // Runs to the east wall, then stays: reversing is never allowed.
        assert_eq!(xs, vec![2, 3, 4, 5, 5, 5]);
        assert_eq!(enemies[0].heading, Some(Heading::Right));
    }

    #[test]
    fn test_advance_reports_undecided() {
        let board = Board::parse("x.x\n...\nx.x\n").unwrap();
        let mut enemies = vec![
            Enemy::new(Coord::new(1, 1), None),
            Enemy::new(Coord::new(1, 0), Some(Heading::Down)),
        ];
        let undecided = advance(&mut enemies, &board, &mut CorridorAi);
        assert_eq!(undecided, vec![0]);
        assert_eq!(enemies[0], Enemy::new(Coord::new(1, 1), None));
        assert_eq!(enemies[1], Enemy::new(Coord::new(1, 1), Some(Heading::Down)));
    }
}
