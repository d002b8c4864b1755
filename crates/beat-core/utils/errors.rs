//! Core error type for beat-core operations
//!
//! Provides the crate-wide `CoreError` enum wrapping module-specific errors.
//! Parsing itself only fails on empty input; everything else degrades
//! gracefully, so this type stays deliberately small.

use thiserror::Error;

use crate::parser::ParseError;

/// Main error type for beat-core operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Parsing errors from the parser module
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Invalid configuration value (severity names, rule codes)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Create configuration error from message
    pub fn config<T: core::fmt::Display>(message: T) -> Self {
        Self::Config(message.to_string())
    }

    /// Check if error came from an unparsable script
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

/// Result type alias for convenience
pub type Result<T> = core::result::Result<T, CoreError>;
