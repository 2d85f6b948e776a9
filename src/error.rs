//! Error types for Temporal-KV
//!
//! The store operations themselves never fail; errors only come from the
//! surfaces around them (command parsing, configuration, I/O).

use thiserror::Error;

/// Result type alias for Temporal-KV operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Temporal-KV
#[derive(Error, Debug)]
pub enum Error {
    /// Command could not be parsed
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a parse error for a 1-based line number
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
