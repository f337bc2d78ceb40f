//! Error types for the simulation core.
//!
//! Two kinds exist: configuration errors, which are fatal to the operation
//! that raised them and are never silently recovered, and not-found errors
//! from the read-only inspection API, which callers may treat as skippable.

use thiserror::Error;

/// Main error type for simulation operations.
#[derive(Error, Debug)]
pub enum SimError {
    /// Invalid setup or invalid call: a missing edge endpoint, a duplicate
    /// node or edge, a parameter outside its domain, an unknown food name,
    /// a zero outgoing weight sum, or allocation over an empty population.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Inspection of a node or edge that does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates a new not found error.
    #[must_use]
    pub fn not_found<S: Into<String>>(what: S) -> Self {
        Self::NotFound(what.into())
    }

    /// True for errors the inspection API lets callers skip over.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::configuration("weight 0 outside (0, 1]");
        assert_eq!(err.to_string(), "Configuration error: weight 0 outside (0, 1]");
    }

    #[test]
    fn test_not_found_is_recoverable() {
        let err = SimError::not_found("node 'glucose'");
        assert!(err.is_not_found());
        assert!(!SimError::configuration("x").is_not_found());
    }
}
