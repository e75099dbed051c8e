//! Tracker configuration management.
//!
//! Consolidates environment variable reads and provides validated
//! table configuration.

use serde::{Deserialize, Serialize};

use crate::game::{
    constants::{DEFAULT_BUTTON_SEAT, DEFAULT_SEAT_COUNT, MAX_SEATS, MIN_SEATS},
    entities::Seat,
};

/// Table configuration for a tracking session
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    /// Number of seats at the table (default: 9)
    pub seat_count: usize,
    /// Seat holding the button for the first hand (default: 1)
    pub button_seat: Seat,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            seat_count: DEFAULT_SEAT_COUNT,
            button_seat: DEFAULT_BUTTON_SEAT,
        }
    }
}

impl TrackerConfig {
    /// Load configuration from environment variables
    ///
    /// * `TRACKER_SEAT_COUNT` - number of seats
    /// * `TRACKER_BUTTON_SEAT` - starting button seat
    ///
    /// Unset or unparsable variables fall back to the defaults. Call
    /// [`TrackerConfig::validate`] on the result.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            seat_count: parse_env_or("TRACKER_SEAT_COUNT", DEFAULT_SEAT_COUNT),
            button_seat: parse_env_or("TRACKER_BUTTON_SEAT", DEFAULT_BUTTON_SEAT),
        }
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&self.seat_count) {
            return Err(ConfigError::Invalid {
                var: "TRACKER_SEAT_COUNT".to_string(),
                reason: format!("Must be between {MIN_SEATS} and {MAX_SEATS}"),
            });
        }

        if self.button_seat == 0 || self.button_seat > self.seat_count {
            return Err(ConfigError::Invalid {
                var: "TRACKER_BUTTON_SEAT".to_string(),
                reason: format!("Must be between 1 and {}", self.seat_count),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
