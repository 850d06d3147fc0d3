//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    // =========================================================================
    // Remote / Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Toggle request timed out after {millis}ms")]
    ToggleTimeout { millis: u64 },

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::EntityNotFound(_) => "UNKNOWN_ENTITY",
            Self::ToggleTimeout { .. } => "TOGGLE_TIMEOUT",
            Self::Remote(_) => "REMOTE_ERROR",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EntityNotFound(_))
    }

    /// Check if retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ToggleTimeout { .. } | Self::Remote(_) | Self::DatabaseError(_)
        )
    }
}
