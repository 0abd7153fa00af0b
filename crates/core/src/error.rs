//! Error types for Leadgate.
//!
//! This module defines the `LeadError` enum which represents all possible
//! errors that can occur while admitting and persisting leads.

use thiserror::Error;

/// The main error type for Leadgate operations.
#[derive(Debug, Error)]
pub enum LeadError {
    // ==================== Admission Errors ====================
    /// The account has reached its plan's lead ceiling.
    #[error("Lead limit reached. Please upgrade your plan.")]
    QuotaExceeded,

    // ==================== Validation Errors ====================
    /// A required field is missing.
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The email format is invalid.
    #[error("Invalid email format")]
    InvalidEmail,

    // ==================== Storage Errors ====================
    /// A backing-store operation failed.
    #[error("Database error: {message}")]
    DatabaseError { message: String },

    /// The requested record was not found.
    #[error("Record not found: {entity} with {key}={value}")]
    NotFound {
        entity: String,
        key: String,
        value: String,
    },

    // ==================== Internal Errors ====================
    /// Serialization/deserialization failed.
    #[error("Serialization error: {message}")]
    SerializationError { message: String },

    /// An internal error occurred.
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl LeadError {
    /// Creates a new database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::DatabaseError {
            message: message.into(),
        }
    }

    /// Creates a new not found error.
    pub fn not_found(
        entity: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            entity: entity.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a new internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Returns true if this is a user-facing error (vs internal).
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::QuotaExceeded
                | Self::MissingField { .. }
                | Self::InvalidEmail
                | Self::NotFound { .. }
        )
    }

    /// Returns an HTTP status code appropriate for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::QuotaExceeded => 403,
            Self::NotFound { .. } => 404,
            Self::MissingField { .. } | Self::InvalidEmail => 422,
            _ => 500,
        }
    }
}

/// A Result type alias using LeadError.
pub type LeadResult<T> = Result<T, LeadError>;

impl From<serde_json::Error> for LeadError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LeadError::QuotaExceeded;
        assert_eq!(err.to_string(), "Lead limit reached. Please upgrade your plan.");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(LeadError::QuotaExceeded.status_code(), 403);
        assert_eq!(LeadError::InvalidEmail.status_code(), 422);
        assert_eq!(LeadError::database("down").status_code(), 500);
    }

    #[test]
    fn test_is_user_error() {
        assert!(LeadError::QuotaExceeded.is_user_error());
        assert!(!LeadError::internal("test").is_user_error());
    }
}
