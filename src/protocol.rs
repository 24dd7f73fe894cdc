//! Line-oriented turn protocol with the bot wrapper process.
//!
//! The engine reads one message at a time, processes it and optionally
//! writes back. Every operation blocks the calling thread; there is no
//! timeout and no cancellation. A blocked read ends only when the source
//! delivers a line or is closed.
//!
//! ```text
//!   wrapper ──stdin──▶ IoHandler::next_message / wait_for
//!   wrapper ◀─stdout── IoHandler::send / broadcast ("bot all send …")
//! ```

mod source;

pub use source::MessageSource;

use std::io::{self, Stdout, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::error::ProtocolError;

/// Envelope prefix for a message addressed to every bot.
pub const BROADCAST_PREFIX: &str = "bot all send ";

/// Default pause between polls while waiting on a live peer.
pub const DEFAULT_POLL_DELAY: Duration = Duration::from_millis(2);

/// Result of [`IoHandler::wait_for`].
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The expected message was read.
    Found,
    /// The source ended (or failed) before the expected message arrived.
    Exhausted,
}

impl WaitOutcome {
    /// Whether the expected message was read.
    #[must_use]
    pub const fn is_found(self) -> bool {
        matches!(self, Self::Found)
    }
}

/// Synchronous message pump between the engine and its bots.
#[derive(Debug)]
pub struct IoHandler<W: Write = Stdout> {
    source: MessageSource,
    writer: W,
    poll_delay: Duration,
    lines_read: u64,
}

impl IoHandler<Stdout> {
    /// Handler over standard input and standard output.
    #[must_use]
    pub fn live() -> Self {
        Self::with_source(MessageSource::stdin(), io::stdout())
    }

    /// Handler reading a recorded input file and writing standard output.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::SourceUnavailable`] if the file cannot be
    /// opened.
    pub fn replay(path: &Path) -> Result<Self, ProtocolError> {
        Ok(Self::with_source(MessageSource::open(path)?, io::stdout()))
    }
}

impl<W: Write> IoHandler<W> {
    /// Handler over an explicit source and output stream.
    #[must_use]
    pub fn with_source(source: MessageSource, writer: W) -> Self {
        Self {
            source,
            writer,
            poll_delay: DEFAULT_POLL_DELAY,
            lines_read: 0,
        }
    }

    /// Set the pause between polls in [`wait_for`](Self::wait_for).
    ///
    /// Only applies to a live source.
    pub fn set_poll_delay(&mut self, delay: Duration) {
        self.poll_delay = delay;
    }

    /// Whether this handler reads recorded input.
    #[must_use]
    pub const fn is_replay(&self) -> bool {
        !self.source.is_live()
    }

    /// Number of messages delivered so far.
    #[must_use]
    pub const fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// The outbound stream.
    #[must_use]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Consume the handler and return the outbound stream.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Block until the next message is available.
    ///
    /// Live input is trimmed and blank lines are skipped; replay input is
    /// returned verbatim.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::EndOfInput`] once the source is exhausted,
    /// [`ProtocolError::Read`] if reading fails.
    pub fn next_message(&mut self) -> Result<String, ProtocolError> {
        let message = self.source.next_line()?;
        self.lines_read += 1;
        Ok(message)
    }

    /// Read and discard messages until one equals `expected` exactly.
    ///
    /// If the source ends first the loop stops and
    /// [`WaitOutcome::Exhausted`] is returned instead of an error.
    pub fn wait_for(&mut self, expected: &str) -> WaitOutcome {
        loop {
            match self.next_message() {
                Ok(message) if message == expected => return WaitOutcome::Found,
                Ok(message) => {
                    tracing::trace!(expected, discarded = %message, "waiting");
                    if self.source.is_live() {
                        thread::sleep(self.poll_delay);
                    }
                }
                Err(err) => {
                    tracing::warn!(expected, error = %err, "gave up waiting");
                    return WaitOutcome::Exhausted;
                }
            }
        }
    }

    /// Write one line and flush it.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Write`] if writing or flushing fails.
    pub fn send(&mut self, message: &str) -> Result<(), ProtocolError> {
        writeln!(self.writer, "{message}").map_err(ProtocolError::Write)?;
        self.writer.flush().map_err(ProtocolError::Write)
    }

    /// Send `message` to every bot; no reply is routed back here.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Write`] if writing fails.
    pub fn broadcast(&mut self, message: &str) -> Result<(), ProtocolError> {
        self.send(&format!("{BROADCAST_PREFIX}{message}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn replay(text: &'static str) -> IoHandler<Vec<u8>> {
        IoHandler::with_source(MessageSource::replay_from("mem", Cursor::new(text)), Vec::new())
    }

    fn live(text: &'static str) -> IoHandler<Vec<u8>> {
        let mut io = IoHandler::with_source(MessageSource::live_from(Cursor::new(text)), Vec::new());
        io.set_poll_delay(Duration::ZERO);
        io
    }

    fn output(io: IoHandler<Vec<u8>>) -> String {
        String::from_utf8(io.into_writer()).unwrap()
    }

    #[test]
    fn test_send_writes_line() {
        let mut io = live("");
        io.send("hello").unwrap();
        io.send("world").unwrap();
        assert_eq!(output(io), "hello\nworld\n");
    }

    #[test]
    fn test_broadcast_envelope() {
        let mut io = live("");
        io.broadcast("move up").unwrap();
        assert_eq!(output(io), "bot all send move up\n");
    }

    #[test]
    fn test_wait_for_in_replay() {
        let mut io = replay("\na\n\nb\nSTOP\nafter\n");
        assert_eq!(io.wait_for("STOP"), WaitOutcome::Found);
        assert_eq!(io.lines_read(), 5);
        assert_eq!(io.next_message().unwrap(), "after");
    }

    #[test]
    fn test_wait_for_in_live_skips_blanks() {
        let mut io = live("\na\n\nb\nSTOP\n");
        assert!(io.wait_for("STOP").is_found());
        assert_eq!(io.lines_read(), 3);
    }

    #[test]
    fn test_wait_for_survives_invalid_utf8() {
        let source = MessageSource::live_from(Cursor::new(&b"noise \xff\nSTOP\nafter\n"[..]));
        let mut io = IoHandler::with_source(source, Vec::new());
        io.set_poll_delay(Duration::ZERO);
        assert_eq!(io.wait_for("STOP"), WaitOutcome::Found);
        assert_eq!(io.next_message().unwrap(), "after");
    }

    #[test]
    fn test_wait_for_exhausted() {
        let mut io = replay("a\nb\nc\n");
        assert_eq!(io.wait_for("STOP"), WaitOutcome::Exhausted);
        assert_eq!(io.lines_read(), 3);
        assert!(matches!(io.next_message(), Err(ProtocolError::EndOfInput)));
    }

    #[test]
    fn test_wait_for_is_exact() {
        // Replay lines are not trimmed, so padded tokens do not match.
        let mut io = replay(" STOP\nSTOP \nSTOP\n");
        assert!(io.wait_for("STOP").is_found());
        assert_eq!(io.lines_read(), 3);
    }

    #[test]
    fn test_next_message_end_of_input() {
        let mut io = live("  \n\n");
        assert!(matches!(io.next_message(), Err(ProtocolError::EndOfInput)));
    }

    #[test]
    fn test_is_replay() {
        assert!(replay("").is_replay());
        assert!(!live("").is_replay());
    }
}
