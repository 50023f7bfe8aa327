//! Unified error type for the rgblights-lib crate.
//!
//! Only [`LightsError::UnsupportedOperation`] crosses the service contract;
//! the other variants surface from configuration loading and CLI parsing.

use std::fmt;

/// Unified error type for rgblights-lib operations.
#[derive(Debug)]
pub enum LightsError {
    /// The light id is not one this controller drives.
    UnsupportedOperation(i32),
    /// Standard I/O error (attribute or config file access).
    Io(std::io::Error),
    /// Configuration validation error.
    Config(String),
    /// Color parsing error.
    Color(String),
}

impl fmt::Display for LightsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightsError::UnsupportedOperation(id) => {
                write!(f, "Unsupported operation: light id {id} is not supported")
            }
            LightsError::Io(e) => write!(f, "I/O error: {e}"),
            LightsError::Config(e) => write!(f, "Config error: {e}"),
            LightsError::Color(e) => write!(f, "Color error: {e}"),
        }
    }
}

impl std::error::Error for LightsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LightsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LightsError {
    fn from(e: std::io::Error) -> Self {
        LightsError::Io(e)
    }
}

/// Crate-level Result alias using [`LightsError`].
pub type Result<T> = std::result::Result<T, LightsError>;
