//! Engine configuration.
//!
//! # Responsibility
//! - Hold tunables for the query engine (debounce, whitespace handling).
//! - Parse them from JSON with defaults for every missing field.
//!
//! # Invariants
//! - `debounce_ms` never exceeds `MAX_DEBOUNCE_MS`, so no wait is unbounded.

use crate::search::predicate::WhitespaceQuery;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Quiet period before a search edit triggers a fetch.
pub const DEFAULT_DEBOUNCE_MS: u64 = 140;
pub const MAX_DEBOUNCE_MS: u64 = 5_000;

/// Configuration parse/validation failure.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    DebounceTooLong { debounce_ms: u64, max_ms: u64 },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid palette config: {err}"),
            Self::DebounceTooLong {
                debounce_ms,
                max_ms,
            } => write!(f, "debounce_ms {debounce_ms} exceeds maximum {max_ms}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::DebounceTooLong { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Query engine tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    pub debounce_ms: u64,
    pub whitespace_query: WhitespaceQuery,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            whitespace_query: WhitespaceQuery::MatchAll,
        }
    }
}

impl PaletteConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::DebounceTooLong {
                debounce_ms: self.debounce_ms,
                max_ms: MAX_DEBOUNCE_MS,
            });
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
