//! Identity provider trait.
//!
//! Defines the interface to the externally owned identity provider.

use super::model::ProviderSession;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract identity provider.
///
/// Credential verification, token issuance and session persistence all live
/// behind this trait; the client only coordinates calls to it.
///
/// # Implementation Notes
///
/// Implementations should map failures onto `ClinicError`:
/// - wrong credentials: `ProviderAuth`
/// - email already registered: `Conflict`
/// - network/backend failures: `RemoteUnavailable`
/// - operations that need a session while none exists: `NoCurrentUser`
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the session the provider currently holds, if any.
    ///
    /// This is a local lookup and never touches the network.
    fn current_session(&self) -> Option<ProviderSession>;

    /// Signs in with email and password.
    async fn authenticate(&self, email: &str, password: &str) -> Result<ProviderSession>;

    /// Creates a new account and signs into it.
    async fn create_account(&self, email: &str, password: &str) -> Result<ProviderSession>;

    /// Ends the current session.
    async fn sign_out(&self) -> Result<()>;

    /// Replaces the password of the signed-in account.
    async fn update_password(&self, new_password: &str) -> Result<()>;

    /// Asks the provider to send a password-reset email.
    async fn send_password_reset(&self, email: &str) -> Result<()>;

    /// Deletes the signed-in account and ends its session.
    async fn delete_current_account(&self) -> Result<()>;
}
