//! In-memory identity provider.
//!
//! Local emulator for tests and the CLI harness. Accounts are keyed by email;
//! passwords are kept in clear text because nothing leaves the process.

use async_trait::async_trait;
use clinic_core::auth::{IdentityProvider, ProviderSession};
use clinic_core::{ClinicError, Result};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    password: String,
}

#[derive(Debug, Default)]
struct ProviderState {
    accounts: HashMap<String, Account>,
    current: Option<ProviderSession>,
    sent_resets: Vec<String>,
}

/// Identity provider holding accounts in memory.
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    state: Mutex<ProviderState>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account without signing in. Returns its uid.
    pub fn register(&self, email: &str, password: &str) -> Result<String> {
        let mut state = self.lock();
        if state.accounts.contains_key(email) {
            return Err(ClinicError::Conflict(format!(
                "account '{}' already exists",
                email
            )));
        }
        let uid = Uuid::new_v4().to_string();
        state.accounts.insert(
            email.to_string(),
            Account {
                uid: uid.clone(),
                password: password.to_string(),
            },
        );
        Ok(uid)
    }

    /// Returns true if an account exists for `email`.
    pub fn has_account(&self, email: &str) -> bool {
        self.lock().accounts.contains_key(email)
    }

    /// Emails that a reset link was sent to, oldest first.
    pub fn sent_resets(&self) -> Vec<String> {
        self.lock().sent_resets.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ProviderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    fn current_session(&self) -> Option<ProviderSession> {
        self.lock().current.clone()
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<ProviderSession> {
        let mut state = self.lock();
        let uid = state
            .accounts
            .get(email)
            .filter(|account| account.password == password)
            .map(|account| account.uid.clone())
            .ok_or_else(|| ClinicError::ProviderAuth("invalid email or password".to_string()))?;

        let session = ProviderSession::new(uid, Some(email.to_string()));
        state.current = Some(session.clone());
        Ok(session)
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<ProviderSession> {
        let uid = self.register(email, password)?;
        let session = ProviderSession::new(uid, Some(email.to_string()));
        self.lock().current = Some(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        self.lock().current = None;
        Ok(())
    }

    async fn update_password(&self, new_password: &str) -> Result<()> {
        let mut state = self.lock();
        let uid = state
            .current
            .as_ref()
            .map(|s| s.uid.clone())
            .ok_or(ClinicError::NoCurrentUser)?;
        let account = state
            .accounts
            .values_mut()
            .find(|account| account.uid == uid)
            .ok_or_else(|| ClinicError::not_found("account", uid.clone()))?;
        account.password = new_password.to_string();
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<()> {
        let mut state = self.lock();
        if !state.accounts.contains_key(email) {
            return Err(ClinicError::not_found("account", email));
        }
        state.sent_resets.push(email.to_string());
        Ok(())
    }

    async fn delete_current_account(&self) -> Result<()> {
        let mut state = self.lock();
        let uid = state
            .current
            .take()
            .map(|s| s.uid)
            .ok_or(ClinicError::NoCurrentUser)?;
        state.accounts.retain(|_, account| account.uid != uid);
        Ok(())
    }
}
