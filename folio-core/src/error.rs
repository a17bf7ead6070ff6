//! Error types for the folio library

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

/// The main error type for all folio operations
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Network-related errors
    Network {
        /// Error message
        message: String,
        /// Underlying error if available
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Provider-side errors (rate limits, quota, server rejections)
    Provider {
        /// Provider name (e.g., "openai", "deepseek")
        provider: String,
        /// Error message
        message: String,
        /// Time to wait before retrying (for rate limits)
        retry_after: Option<Duration>,
        /// Underlying error if available
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    Serialization {
        /// Error message
        message: String,
        /// Underlying error if available
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Validation errors
    Validation(String),

    /// Timeout errors
    Timeout,

    /// Authentication errors
    Authentication(String),

    /// Configuration errors
    Configuration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Network { message, .. } => write!(f, "Network error: {}", message),
            Error::Provider {
                provider, message, ..
            } => {
                write!(f, "Provider error ({}): {}", provider, message)
            }
            Error::Serialization { message, .. } => write!(f, "Serialization error: {}", message),
            Error::Validation(msg) => write!(f, "Validation error: {}", msg),
            Error::Timeout => write!(f, "Operation timed out"),
            Error::Authentication(msg) => write!(f, "Authentication error: {}", msg),
            Error::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Network { source, .. }
            | Error::Provider { source, .. }
            | Error::Serialization { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn StdError + 'static)),
            _ => None,
        }
    }
}

/// Result type alias for folio operations
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations for error conversions
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Network {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
