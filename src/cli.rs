//! CLI command implementations for Pursuit.

pub(crate) mod check;
pub(crate) mod run;
pub(crate) mod simulate;

mod output;

use clap::ValueEnum;
use pursuit::{Board, BoardError, ConfigError, Coord, Enemy, Heading, ProtocolError, RefereeConfig};
use std::error::Error;
use std::fmt;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Output format for the `simulate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Board drawing per tick.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<BoardError> for CliError {
    fn from(e: BoardError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ProtocolError> for CliError {
    fn from(e: ProtocolError) -> Self {
        Self::new(e.to_string())
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `default_level`.
///
/// Stdout is the protocol channel, so nothing else may write there.
pub(crate) fn init_tracing(default_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Parse an enemy given as `x,y` or `x,y,heading`.
pub(crate) fn parse_enemy(s: &str) -> Result<Enemy, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let (x, y, heading) = match parts.as_slice() {
        [x, y] => (*x, *y, None),
        [x, y, heading] => (*x, *y, Some(*heading)),
        _ => return Err(format!("expected x,y or x,y,heading, got `{s}`")),
    };

    let x = x.parse::<i32>().map_err(|e| format!("bad column `{x}`: {e}"))?;
    let y = y.parse::<i32>().map_err(|e| format!("bad row `{y}`: {e}"))?;
    let heading = match heading {
        Some(h) => Heading::parse_optional(h).map_err(|e| format!("bad heading: {e}"))?,
        None => None,
    };

    Ok(Enemy::new(Coord::new(x, y), heading))
}

/// Reject enemies placed outside the board.
pub(crate) fn check_enemies_on_board(board: &Board, enemies: &[Enemy]) -> Result<(), CliError> {
    let outside = enemies
        .iter()
        .enumerate()
        .find(|(_, enemy)| !board.in_bounds(enemy.coord));
    match outside {
        Some((idx, enemy)) => Err(CliError::new(format!(
            "enemy {idx} at {} is outside the {}x{} board",
            enemy.coord,
            board.width(),
            board.height()
        ))),
        None => Ok(()),
    }
}

/// Load the config file if given, otherwise the defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<RefereeConfig, CliError> {
    match path {
        Some(path) => Ok(RefereeConfig::load(path)?),
        None => Ok(RefereeConfig::default()),
    }
}
