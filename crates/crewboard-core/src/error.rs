//! Error types for Crewboard.

use thiserror::Error;

/// A shared error type for the whole Crewboard core.
///
/// Typed, structured variants with automatic conversion from the
/// serialization and I/O errors the stores run into.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrewError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Wrong admin password
    #[error("Authentication failed: wrong admin password")]
    AuthenticationFailed,

    /// Admin-only action (page navigation, password change) by a non-admin
    #[error("'{action}' is available to the head only")]
    Unauthorized { action: String },

    /// Edit of a leadership role that is locked
    #[error("Role '{role}' is locked and cannot be reassigned")]
    RoleLocked { role: String },

    /// A record that cannot be stored as given
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Key-value storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CrewError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error is a rejected session transition.
    ///
    /// Covers a wrong password and a forbidden admin-only action. Neither changes session state.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AuthenticationFailed | Self::Unauthorized { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CrewError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CrewError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CrewError>`.
pub type Result<T> = std::result::Result<T, CrewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = CrewError::not_found("engineer", "Усен");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: engineer 'Усен'");
    }

    #[test]
    fn test_access_denied_variants() {
        assert!(CrewError::AuthenticationFailed.is_access_denied());
        assert!(
            CrewError::Unauthorized {
                action: "directory".to_string()
            }
            .is_access_denied()
        );
        assert!(!CrewError::internal("boom").is_access_denied());
    }

    #[test]
    fn test_from_json_error() {
        let err: CrewError = serde_json::from_str::<Vec<String>>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, CrewError::Serialization { ref format, .. } if format == "JSON"));
    }
}
