//! The two interchangeable message sources.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::ProtocolError;

/// Where inbound messages come from. Fixed for the lifetime of a handler.
pub enum MessageSource {
    /// Interactive peer stream: lines are trimmed and blank lines skipped.
    Live(Box<dyn BufRead>),
    /// Recorded input for offline debugging: lines are returned verbatim.
    Replay {
        /// Name shown in diagnostics (usually the file path).
        name: String,
        /// Line reader over the recording.
        reader: Box<dyn BufRead>,
    },
}

impl fmt::Debug for MessageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live(_) => f.debug_tuple("Live").finish_non_exhaustive(),
            Self::Replay { name, .. } => f
                .debug_struct("Replay")
                .field("name", name)
                .finish_non_exhaustive(),
        }
    }
}

impl MessageSource {
    /// Live source over the process's standard input.
    #[must_use]
    pub fn stdin() -> Self {
        Self::Live(Box::new(io::stdin().lock()))
    }

    /// Live source over any buffered reader.
    #[must_use]
    pub fn live_from(reader: impl BufRead + 'static) -> Self {
        Self::Live(Box::new(reader))
    }

    /// Replay source over any buffered reader.
    #[must_use]
    pub fn replay_from(name: impl Into<String>, reader: impl BufRead + 'static) -> Self {
        Self::Replay {
            name: name.into(),
            reader: Box::new(reader),
        }
    }

    /// Open a replay file.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::SourceUnavailable`] if the file cannot be
    /// opened.
    pub fn open(path: &Path) -> Result<Self, ProtocolError> {
        let file = File::open(path).map_err(|source| {
            tracing::error!(path = %path.display(), error = %source, "cannot open replay source");
            ProtocolError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(Self::replay_from(
            path.display().to_string(),
            BufReader::new(file),
        ))
    }

    /// Whether this is the live stream.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    /// Read the next message.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::EndOfInput`] once the source is exhausted,
    /// [`ProtocolError::Read`] if the underlying reader fails.
    pub(crate) fn next_line(&mut self) -> Result<String, ProtocolError> {
        match self {
            Self::Live(reader) => loop {
                let line = read_line(reader)?;
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    return Ok(trimmed.to_string());
                }
            },
            Self::Replay { name, reader } => {
                let line = read_line(reader)?;
                tracing::info!(source = %name, "{line}");
                Ok(line)
            }
        }
    }
}

/// One physical line without its terminator.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD so a garbled
/// line never ends the stream.
fn read_line<R: BufRead + ?Sized>(reader: &mut R) -> Result<String, ProtocolError> {
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf).map_err(ProtocolError::Read)?;
    if n == 0 {
        return Err(ProtocolError::EndOfInput);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_live_skips_blank_and_trims() {
        let mut src = MessageSource::live_from(Cursor::new("\n   \n  hello  \r\n\t\nworld"));
        assert_eq!(src.next_line().unwrap(), "hello");
        assert_eq!(src.next_line().unwrap(), "world");
        assert!(matches!(src.next_line(), Err(ProtocolError::EndOfInput)));
    }

    #[test]
    fn test_live_only_blank_lines_is_end_of_input() {
        let mut src = MessageSource::live_from(Cursor::new("\n\n  \n"));
        assert!(matches!(src.next_line(), Err(ProtocolError::EndOfInput)));
    }

    #[test]
    fn test_replay_returns_lines_verbatim() {
        let mut src = MessageSource::replay_from("mem", Cursor::new("\n  a \r\nb"));
        assert_eq!(src.next_line().unwrap(), "");
        assert_eq!(src.next_line().unwrap(), "  a ");
        assert_eq!(src.next_line().unwrap(), "b");
        assert!(matches!(src.next_line(), Err(ProtocolError::EndOfInput)));
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_fatal() {
        let mut src = MessageSource::live_from(Cursor::new(&b"noise \xff\nSTOP\n"[..]));
        assert_eq!(src.next_line().unwrap(), "noise \u{fffd}");
        assert_eq!(src.next_line().unwrap(), "STOP");

        let mut src = MessageSource::replay_from("mem", Cursor::new(&b"bot0 \xfe\r\nend"[..]));
        assert_eq!(src.next_line().unwrap(), "bot0 \u{fffd}");
        assert_eq!(src.next_line().unwrap(), "end");
        assert!(matches!(src.next_line(), Err(ProtocolError::EndOfInput)));
    }

    #[test]
    fn test_open_missing_file() {
        let err = MessageSource::open(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, ProtocolError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_is_live() {
        assert!(MessageSource::live_from(Cursor::new("")).is_live());
        assert!(!MessageSource::replay_from("mem", Cursor::new("")).is_live());
    }
}
