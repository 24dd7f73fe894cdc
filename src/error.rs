//! Error types for the protocol handler, board loading and configuration.

use std::io;
use std::path::PathBuf;

/// Errors raised by the turn protocol handler.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A read was attempted after the message source was exhausted.
    #[error("no more input")]
    EndOfInput,

    /// The replay file could not be opened.
    #[error("replay source {} unavailable: {source}", path.display())]
    SourceUnavailable {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying open failure.
        source: io::Error,
    },

    /// The underlying source failed while reading a line.
    ///
    /// Undecodable bytes are not a failure; they are replaced on read.
    #[error("failed to read message: {0}")]
    Read(#[source] io::Error),

    /// The outbound stream failed while writing or flushing.
    #[error("failed to send message: {0}")]
    Write(#[source] io::Error),
}

/// Errors raised while building a [`Board`](crate::grid::Board) from text.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// The text contained no rows.
    #[error("board is empty")]
    Empty,

    /// A row is not as wide as the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },

    /// A cell symbol is not recognised.
    #[error("invalid tile {ch:?} at row {row}, column {col}")]
    InvalidTile {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        col: usize,
        /// Offending character.
        ch: char,
    },

    /// A dimension does not fit the board's coordinate range.
    #[error("board dimension {0} exceeds 65535")]
    TooLarge(usize),

    /// The board file could not be read.
    #[error("failed to read board {}: {source}", path.display())]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying read failure.
        source: io::Error,
    },
}

/// Errors raised while loading a referee configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying read failure.
        source: io::Error,
    },

    /// The file is not valid configuration JSON.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_display() {
        assert_eq!(ProtocolError::EndOfInput.to_string(), "no more input");

        let err = ProtocolError::SourceUnavailable {
            path: PathBuf::from("missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("missing.txt"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_board_error_display() {
        let err = BoardError::InvalidTile { row: 2, col: 4, ch: '?' };
        assert_eq!(err.to_string(), "invalid tile '?' at row 2, column 4");
    }
}
