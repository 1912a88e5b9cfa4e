//! Client configuration.
//!
//! Backend namespaces (collection names, blob root) are configuration so the
//! client can be pointed at a different deployment without code changes.

use serde::{Deserialize, Serialize};

/// Root configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Names of the remote collections and storage paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Privileged collection holding one profile per authorised doctor.
    pub doctor_collection: String,
    /// Collection holding one-time codes.
    pub code_collection: String,
    /// Field of a code document that holds the code value.
    pub code_field: String,
    /// Field of a profile document that holds the email.
    pub email_field: String,
    /// Blob-store folder holding per-doctor objects, keyed by uid.
    pub blob_root: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            doctor_collection: "doctor".to_string(),
            code_collection: "codeGenerator".to_string(),
            code_field: "code".to_string(),
            email_field: "email".to_string(),
            blob_root: "doctor".to_string(),
        }
    }
}

/// When `delete_account` clears the local session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionPolicy {
    /// Clear only after every remote stage has succeeded.
    #[default]
    AfterCascade,
    /// Clear before the remote cascade starts.
    Optimistic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub deletion_policy: DeletionPolicy,
    /// Minimum length accepted for new passwords.
    pub min_password_length: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            deletion_policy: DeletionPolicy::default(),
            min_password_length: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
