//! Error types for launchdash-core.

use std::path::{Path, PathBuf};

/// Result type alias for launchdash-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, filtering, or charting launch data.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error without a known path.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error on a specific file.
    #[error("I/O error on {path}: {source}")]
    IoWithPath {
        /// File that could not be read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// CSV decoding error.
    #[error("CSV error at record {row}: {message}")]
    Csv {
        /// 1-based data row (header excluded).
        row: u64,
        /// What went wrong.
        message: String,
    },

    /// The CSV held a header row but no launch records.
    #[error("Dataset contains no launch records")]
    EmptyDataset,

    /// A field held a value outside its domain.
    #[error("Invalid value for '{column}': {value}")]
    InvalidValue {
        /// Column name.
        column: &'static str,
        /// Offending value as text.
        value: String,
    },

    /// Payload range bounds were reversed or not finite.
    #[error("Invalid payload range: {message}")]
    InvalidRange {
        /// What is wrong with the bounds.
        message: String,
    },

    /// Launch site not present in the table.
    #[error("Unknown launch site: {0}")]
    UnknownSite(String),

    /// Callback request could not be resolved or its inputs were malformed.
    #[error("Callback error: {message}")]
    Callback {
        /// What went wrong.
        message: String,
    },

    /// Callback output that no registered callback produces.
    #[error("No callback produces output: {0}")]
    UnknownOutput(String),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic.
        message: String,
    },

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a callback error.
    pub fn callback<S: Into<String>>(message: S) -> Self {
        Error::Callback {
            message: message.into(),
        }
    }

    /// Creates an invalid range error.
    pub fn invalid_range<S: Into<String>>(message: S) -> Self {
        Error::InvalidRange {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns whether the error was caused by caller input rather than
    /// the dataset or environment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidRange { .. }
                | Error::Callback { .. }
                | Error::UnknownSite(_)
                | Error::UnknownOutput(_)
        )
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        // The header is record 0, so data rows are already 1-based.
        let row = err.position().map(|pos| pos.record()).unwrap_or(0);
        Error::Csv {
            row,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = Error::config("missing [server] section");
        assert_eq!(
            err.to_string(),
            "Configuration error: missing [server] section"
        );
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_io_with_path_mentions_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::io_with_path(io, "/tmp/launches.csv");
        assert!(err.to_string().contains("/tmp/launches.csv"));
    }

    #[test]
    fn test_client_errors() {
        assert!(Error::UnknownSite("X".into()).is_client_error());
        assert!(Error::invalid_range("low > high").is_client_error());
        assert!(Error::callback("bad input").is_client_error());
        assert!(Error::UnknownOutput("a.b".into()).is_client_error());
        assert!(!Error::EmptyDataset.is_client_error());
    }

    #[test]
    fn test_serialization_error_conversion() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{oops}").unwrap_err();
        let err: Error = serde_err.into();
        assert!(err.to_string().starts_with("Serialization error"));
    }
}
