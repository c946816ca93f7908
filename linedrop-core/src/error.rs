/// Structured error types for linedrop-core.
///
/// Dispatching itself never fails; these cover loading buffers, slot files
/// and configuration. Binary crates wrap them with `anyhow` context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for linedrop-core operations
#[derive(Error, Debug)]
pub enum LinedropError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// JSON parsing or serialization failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// Config file could not be parsed as TOML
    #[error("Invalid TOML in {path:?}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// File or directory not found
    #[error("Path not found: {path:?}")]
    PathNotFound { path: PathBuf },

    /// Key specification could not be parsed
    #[error("Invalid key '{spec}': {reason}")]
    InvalidKey { spec: String, reason: String },

    /// Table layout is unusable (no rows, no slot column, ...)
    #[error("Invalid table layout: {reason}")]
    InvalidLayout { reason: String },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for linedrop-core operations
pub type Result<T> = std::result::Result<T, LinedropError>;

impl LinedropError {
    /// Create a JSON error with context
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Create a TOML error for a config file
    pub fn toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Toml {
            path: path.into(),
            source,
        }
    }

    /// Create a path not found error
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    /// Create an invalid key error
    pub fn invalid_key(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            spec: spec.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid layout error
    pub fn invalid_layout(reason: impl Into<String>) -> Self {
        Self::InvalidLayout {
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LinedropError::invalid_key("ctrl-", "missing key after modifier");
        assert_eq!(
            err.to_string(),
            "Invalid key 'ctrl-': missing key after modifier"
        );

        let err = LinedropError::path_not_found("/tmp/paste.txt");
        assert!(err.to_string().contains("Path not found"));
        assert!(err.to_string().contains("/tmp/paste.txt"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: LinedropError = io_err.into();

        assert!(matches!(err, LinedropError::Io { .. }));
    }

    #[test]
    fn test_layout_error_display() {
        let err = LinedropError::invalid_layout("no column is marked as a slot");
        assert_eq!(
            err.to_string(),
            "Invalid table layout: no column is marked as a slot"
        );
    }
}
