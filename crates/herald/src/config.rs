//! Configuration for the announcement layer.
//!
//! Defaults match what screen readers need in practice: a 100 ms gap between
//! clearing and setting a live region, and a 3 s lifetime for each message.
//! Hosts can override them from TOML:
//!
//! ```toml
//! [announcer]
//! set_delay_ms = 150
//! clear_after_ms = 5000
//! ```

use std::path::Path;
use std::time::Duration;

use herald_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default delay between clearing a live region and setting its new text.
pub const DEFAULT_SET_DELAY_MS: u64 = 100;

/// Default time after `announce` at which the message is cleared again.
pub const DEFAULT_CLEAR_AFTER_MS: u64 = 3000;

/// Timing of the announcement lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnouncerConfig {
    /// Milliseconds between the clear and the set of a new message.
    pub set_delay_ms: u64,
    /// Milliseconds after `announce` at which the message is removed.
    pub clear_after_ms: u64,
}

impl Default for AnnouncerConfig {
    fn default() -> Self {
        Self {
            set_delay_ms: DEFAULT_SET_DELAY_MS,
            clear_after_ms: DEFAULT_CLEAR_AFTER_MS,
        }
    }
}

impl AnnouncerConfig {
    #[inline]
    pub fn set_delay(&self) -> Duration {
        Duration::from_millis(self.set_delay_ms)
    }

    #[inline]
    pub fn clear_after(&self) -> Duration {
        Duration::from_millis(self.clear_after_ms)
    }

    /// Check that a message is visible for a non-empty window.
    pub fn validate(&self) -> Result<()> {
        if self.clear_after_ms == 0 {
            return Err(Error::invalid_value(
                "announcer.clear_after_ms",
                "must be greater than zero",
            ));
        }
        if self.clear_after_ms <= self.set_delay_ms {
            return Err(Error::invalid_value(
                "announcer.clear_after_ms",
                format!(
                    "must be greater than set_delay_ms ({}), got {}",
                    self.set_delay_ms, self.clear_after_ms
                ),
            ));
        }
        Ok(())
    }
}

/// Top-level Herald configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeraldConfig {
    pub announcer: AnnouncerConfig,
}

impl HeraldConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.announcer.validate()?;
        tracing::debug!(target: targets::CONFIG, ?config, "configuration loaded");
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HeraldConfig::default();
        assert_eq!(config.announcer.set_delay(), Duration::from_millis(100));
        assert_eq!(config.announcer.clear_after(), Duration::from_secs(3));
        assert!(config.announcer.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = HeraldConfig::from_toml_str("[announcer]\nset_delay_ms = 250\n").unwrap();
        assert_eq!(config.announcer.set_delay_ms, 250);
        assert_eq!(config.announcer.clear_after_ms, DEFAULT_CLEAR_AFTER_MS);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(HeraldConfig::from_toml_str("").unwrap(), HeraldConfig::default());
    }

    #[test]
    fn test_clear_must_follow_set() {
        let err = HeraldConfig::from_toml_str(
            "[announcer]\nset_delay_ms = 500\nclear_after_ms = 500\n",
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidValue { ref key, .. } if key == "announcer.clear_after_ms"));
    }

    #[test]
    fn test_zero_clear_rejected() {
        let config = AnnouncerConfig {
            set_delay_ms: 0,
            clear_after_ms: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = HeraldConfig::from_toml_str("[announcer]\nset_delay_ms = \"soon\"\n").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("herald.toml");
        std::fs::write(&path, "[announcer]\nclear_after_ms = 4500\n").unwrap();

        let config = HeraldConfig::from_file(&path).unwrap();
        assert_eq!(config.announcer.clear_after(), Duration::from_millis(4500));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = HeraldConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
