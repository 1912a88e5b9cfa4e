//! Error types for the clinic client.

use thiserror::Error;

/// A shared error type for every clinic crate.
///
/// Variants follow the classification the UI needs to render a failure:
/// authorisation problems, remote/backend problems, and local validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClinicError {
    /// The email is not registered in the privileged (doctor) collection.
    #[error("Not authorized: '{email}' is not a registered doctor")]
    NotAuthorized { email: String },

    /// The identity provider rejected the credentials.
    #[error("Authentication failed: {0}")]
    ProviderAuth(String),

    /// The profile document could not be written.
    #[error("Failed to persist profile '{id}': {message}")]
    ProfilePersistence { id: String, message: String },

    /// A stored record could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The provider refused an operation for the current identity
    /// (e.g. a sensitive operation that needs a recent login).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Network or backend failure.
    #[error("Remote unavailable: {0}")]
    RemoteUnavailable(String),

    /// Entity already exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Local input validation failed.
    #[error("Validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The operation requires an active session.
    #[error("No user is currently signed in")]
    NoCurrentUser,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClinicError {
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

    /// Creates a Validation error
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Creates a RemoteUnavailable error
    pub fn remote(message: impl Into<String>) -> Self {
        Self::RemoteUnavailable(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_not_authorized(&self) -> bool {
        matches!(self, Self::NotAuthorized { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns true for failures a user may fix by trying again later.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::RemoteUnavailable(_))
    }
}

impl From<serde_json::Error> for ClinicError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for ClinicError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A type alias for `Result<T, ClinicError>`.
pub type Result<T> = std::result::Result<T, ClinicError>;
