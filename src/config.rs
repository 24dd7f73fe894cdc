//! Referee configuration.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```json
//! { "tick_token": "round", "policy": { "kind": "chase", "x": 9, "y": 1 } }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::enemy::{IntersectionPolicy, Rng};
use crate::error::ConfigError;
use crate::grid::{Coord, Heading};

/// Tokens and timing for the referee loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefereeConfig {
    /// Message awaited before the first tick, if any.
    pub handshake: Option<String>,
    /// Message that advances every enemy by one tick.
    pub tick_token: String,
    /// Message that ends the match.
    pub end_token: String,
    /// Pause between polls while waiting on a live peer, in milliseconds.
    pub poll_delay_ms: u64,
    /// Broadcast enemy positions after every tick.
    pub broadcast_positions: bool,
    /// Stop after this many ticks.
    pub max_ticks: Option<u32>,
    /// How branching cells are resolved.
    pub policy: PolicyConfig,
}

impl Default for RefereeConfig {
    fn default() -> Self {
        Self {
            handshake: Some("start".to_string()),
            tick_token: "tick".to_string(),
            end_token: "end".to_string(),
            poll_delay_ms: 2,
            broadcast_positions: true,
            max_ticks: None,
            policy: PolicyConfig::default(),
        }
    }
}

impl RefereeConfig {
    /// Load a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration JSON.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Poll delay as a [`Duration`].
    #[must_use]
    pub const fn poll_delay(&self) -> Duration {
        Duration::from_millis(self.poll_delay_ms)
    }
}

/// Serializable form of an [`IntersectionPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyConfig {
    /// First available heading in `order`.
    FixedPriority {
        /// Preference order.
        order: Vec<Heading>,
    },
    /// Greedy approach to a fixed cell.
    Chase {
        /// Target column.
        x: i32,
        /// Target row.
        y: i32,
    },
    /// Seeded random choice.
    Wander {
        /// RNG seed.
        seed: u64,
    },
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::FixedPriority {
            order: vec![Heading::Up, Heading::Left, Heading::Down, Heading::Right],
        }
    }
}

impl From<&PolicyConfig> for IntersectionPolicy {
    fn from(config: &PolicyConfig) -> Self {
        match config {
            PolicyConfig::FixedPriority { order } => Self::FixedPriority(order.clone()),
            PolicyConfig::Chase { x, y } => Self::Chase {
                target: Coord::new(*x, *y),
            },
            PolicyConfig::Wander { seed } => Self::Wander(Rng::new(*seed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RefereeConfig::default();
        assert_eq!(config.handshake.as_deref(), Some("start"));
        assert_eq!(config.tick_token, "tick");
        assert_eq!(config.end_token, "end");
        assert_eq!(config.poll_delay(), Duration::from_millis(2));
        assert!(config.broadcast_positions);
        assert_eq!(
            IntersectionPolicy::from(&config.policy),
            IntersectionPolicy::default()
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = RefereeConfig::from_json(r#"{ "tick_token": "round", "max_ticks": 10 }"#).unwrap();
        assert_eq!(config.tick_token, "round");
        assert_eq!(config.max_ticks, Some(10));
        assert_eq!(config.end_token, "end");
    }

    #[test]
    fn test_policy_json() {
        let config = RefereeConfig::from_json(
            r#"{ "handshake": null, "policy": { "kind": "chase", "x": 9, "y": 1 } }"#,
        )
        .unwrap();
        assert_eq!(config.handshake, None);
        assert_eq!(
            IntersectionPolicy::from(&config.policy),
            IntersectionPolicy::Chase {
                target: Coord::new(9, 1)
            }
        );

        let config =
            RefereeConfig::from_json(r#"{ "policy": { "kind": "fixed_priority", "order": ["down", "right"] } }"#)
                .unwrap();
        assert_eq!(
            config.policy,
            PolicyConfig::FixedPriority {
                order: vec![Heading::Down, Heading::Right]
            }
        );
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            RefereeConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
