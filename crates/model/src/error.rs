//! Unified error type for the model layer
//!
//! Every fallible constructor and lookup in this crate reports through
//! [`ModelError`], so callers can match on the failure kind instead of
//! parsing strings.

use thiserror::Error;

/// Unified error type for model operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A value failed validation (e.g., negative level or version component)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for `FromStr` implementations)
    #[error("Parse error: {0}")]
    Parse(String),

    /// A caller broke an API precondition (e.g., passed a missing identity)
    #[error("Precondition violated: {0}")]
    Precondition(String),
}

impl ModelError {
    /// Creates a validation error for values outside their allowed range.
    ///
    /// # Example
    /// ```ignore
    /// if level < 0 {
    ///     return Err(ModelError::validation("Level must not be negative"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Creates a precondition error.
    ///
    /// This signals a programming error in the caller, not bad input. It is
    /// never mapped to a normal `false`/`None` answer.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Returns true if this error reports a broken precondition.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
}
