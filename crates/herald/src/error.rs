//! Error types for Herald.

use std::path::PathBuf;

/// Result type alias for Herald operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up Herald.
///
/// Announcing and focus handling never fail; these errors only come from
/// loading and validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file could not be read.
    #[error("Failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration text is not valid TOML for the expected schema.
    #[error("Configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A configuration value is out of range.
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a value error.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}
