//! Authentication domain models.

use serde::{Deserialize, Serialize};

/// A live handle issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSession {
    /// Provider-issued unique identifier of the account.
    pub uid: String,
    /// Email the account signed in with, if the provider reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ProviderSession {
    pub fn new(uid: impl Into<String>, email: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            email,
        }
    }
}

/// Durable doctor profile stored in the privileged collection.
///
/// Stored as a field-per-attribute document keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
}

impl UserProfile {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}

/// Observable authentication state.
///
/// `session` is the raw provider handle; `profile` is the resolved doctor
/// record. Both are absent when nobody is signed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    pub session: Option<ProviderSession>,
    pub profile: Option<UserProfile>,
}

impl AuthState {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// Uid of the published session, if any.
    pub fn uid(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.uid.as_str())
    }
}
