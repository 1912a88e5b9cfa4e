//! Doctor session controller.
//!
//! `SessionController` gates the doctor role. It coordinates the identity
//! provider, the document store and the blob store, and republishes the
//! resulting `AuthState` to the UI through a `watch` channel.

use crate::account_deletion::{DeletionProgress, DeletionStage};
use clinic_core::auth::{AuthState, IdentityProvider, ProviderSession, UserProfile};
use clinic_core::blob::{BlobStore, object_path};
use clinic_core::config::{BackendConfig, ClinicConfig, DeletionPolicy, SessionConfig};
use clinic_core::document::{DocumentStore, decode, encode};
use clinic_core::{ClinicError, Result};
use futures::future::try_join_all;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

/// Controller owning the observable authentication state.
///
/// # Responsibilities
///
/// - Admin-gated sign-in and profile-provisioning sign-up
/// - Sign-out, password change and password reset
/// - One-time code redemption
/// - Ordered, resumable account deletion
///
/// # State
///
/// `AuthState` has exactly one writer: this controller. Each operation
/// publishes its final state in a single send, so subscribers never observe
/// a half-applied operation.
pub struct SessionController {
    identity: Arc<dyn IdentityProvider>,
    documents: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    backend: BackendConfig,
    session_config: SessionConfig,
    state: watch::Sender<AuthState>,
    /// Progress of an interrupted account deletion.
    deletion: Mutex<Option<DeletionProgress>>,
}

impl SessionController {
    /// Creates the controller and adopts any session the provider already holds.
    ///
    /// The profile for an adopted session is fetched by a background task, so
    /// this returns before the profile is available. Outside a tokio runtime
    /// the fetch is skipped; call `refresh_profile` explicitly instead.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        documents: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
        config: &ClinicConfig,
    ) -> Arc<Self> {
        let initial = AuthState {
            session: identity.current_session(),
            profile: None,
        };
        let (state, _) = watch::channel(initial);

        let controller = Arc::new(Self {
            identity,
            documents,
            blobs,
            backend: config.backend.clone(),
            session_config: config.session.clone(),
            state,
            deletion: Mutex::new(None),
        });

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let background = Arc::clone(&controller);
                handle.spawn(async move {
                    background.refresh_profile().await;
                });
            }
            Err(_) => {
                tracing::warn!("[SessionController] No tokio runtime, initial profile fetch skipped");
            }
        }

        controller
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Signs in a registered doctor.
    ///
    /// Emails absent from the doctor collection fail with `NotAuthorized`
    /// before the identity provider is contacted. Any failure leaves the
    /// state untouched.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthState> {
        if !self.is_registered_doctor(email).await? {
            tracing::warn!("[SessionController] Sign-in refused for non-doctor {}", email);
            return Err(ClinicError::NotAuthorized {
                email: email.to_string(),
            });
        }

        let session = self.identity.authenticate(email, password).await?;
        let state = self.establish(session).await;
        tracing::info!("[SessionController] Signed in {}", email);
        Ok(state)
    }

    /// Creates a provider account and its doctor profile.
    ///
    /// If the profile cannot be stored, the freshly created provider account
    /// is deleted again so no account exists without a profile.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthState> {
        validate_email(email)?;
        self.validate_password(password)?;

        let session = self.identity.create_account(email, password).await?;
        let profile = UserProfile::new(session.uid.clone(), email);

        if let Err(e) = self.persist_profile(&profile).await {
            tracing::warn!(
                "[SessionController] Profile write for {} failed, removing provider account: {}",
                profile.id,
                e
            );
            if let Err(rollback) = self.identity.delete_current_account().await {
                tracing::error!(
                    "[SessionController] Provider account {} left without profile: {}",
                    profile.id,
                    rollback
                );
            }
            return Err(ClinicError::ProfilePersistence {
                id: profile.id,
                message: e.to_string(),
            });
        }

        let state = self.establish(session).await;
        tracing::info!("[SessionController] Signed up {}", email);
        Ok(state)
    }

    /// Consumes a one-time code.
    ///
    /// Returns `true` if this call removed at least one record holding
    /// `code`. Deletions run concurrently and the first failure aborts the
    /// call. A record that vanished between the query and its deletion was
    /// consumed by another caller and does not count as a failure.
    pub async fn redeem_code(&self, code: &str) -> Result<bool> {
        let collection = self.backend.code_collection.as_str();
        let matches = self
            .documents
            .query_by_field(collection, &self.backend.code_field, &Value::from(code))
            .await?;

        if matches.is_empty() {
            tracing::debug!("[SessionController] Code not found or already used");
            return Ok(false);
        }

        let outcomes = try_join_all(matches.iter().map(|doc| async move {
            match self.documents.delete(collection, &doc.id).await {
                Ok(()) => Ok(true),
                Err(e) if e.is_not_found() => Ok(false),
                Err(e) => Err(e),
            }
        }))
        .await?;

        let removed = outcomes.into_iter().filter(|removed| *removed).count();
        if removed == 0 {
            tracing::debug!("[SessionController] Code consumed concurrently by another caller");
            return Ok(false);
        }

        tracing::info!(
            "[SessionController] Redeemed code ({} record(s) removed)",
            removed
        );
        Ok(true)
    }

    /// Signs out. On failure the state is left as it was.
    pub async fn sign_out(&self) -> Result<()> {
        self.identity.sign_out().await?;
        self.state.send_replace(AuthState::signed_out());
        tracing::info!("[SessionController] Signed out");
        Ok(())
    }

    /// Removes the doctor's footprint from every store.
    ///
    /// Stages run in order: profile document, blob object, provider account.
    /// A stage only starts once the previous one succeeded. When a stage
    /// fails, progress is kept and the next call resumes at that stage.
    /// A missing document or blob counts as already deleted.
    ///
    /// Local state is cleared according to `DeletionPolicy`. Concurrent calls
    /// are serialised; a call that waited for a completed deletion finds no
    /// session and fails with `NoCurrentUser`.
    pub async fn delete_account(&self) -> Result<()> {
        let mut recorded = self.deletion.lock().await;
        let session = self
            .identity
            .current_session()
            .ok_or(ClinicError::NoCurrentUser)?;

        let mut progress = match recorded.take() {
            Some(progress) if progress.uid == session.uid && !progress.is_finished() => {
                if let Some(stage) = progress.pending() {
                    tracing::info!(
                        "[SessionController] Resuming account deletion at {} ({} stage(s) already done)",
                        stage,
                        progress.completed().len()
                    );
                }
                progress
            }
            _ => DeletionProgress::new(session.uid.clone()),
        };

        if self.session_config.deletion_policy == DeletionPolicy::Optimistic {
            self.state.send_replace(AuthState::signed_out());
        }

        while let Some(stage) = progress.pending() {
            if let Err(e) = self.run_deletion_stage(stage, &progress.uid).await {
                tracing::warn!(
                    "[SessionController] Account deletion stopped at {} (retryable: {}): {}",
                    stage,
                    e.is_transient(),
                    e
                );
                *recorded = Some(progress);
                return Err(e);
            }
            progress.complete(stage);
        }

        self.state.send_replace(AuthState::signed_out());
        tracing::info!("[SessionController] Account {} deleted", session.uid);
        Ok(())
    }

    /// Progress of an interrupted account deletion, if any.
    pub async fn deletion_progress(&self) -> Option<DeletionProgress> {
        self.deletion.lock().await.clone()
    }

    /// Changes the password, then signs out so the new one must be entered.
    ///
    /// A profile refresh is started alongside the update as an independent
    /// task; the two are not ordered.
    pub async fn change_password(self: &Arc<Self>, new_password: &str) -> Result<()> {
        self.validate_password(new_password)?;

        let background = Arc::clone(self);
        tokio::spawn(async move {
            background.refresh_profile().await;
        });

        self.identity.update_password(new_password).await?;
        tracing::info!("[SessionController] Password updated");
        self.sign_out().await
    }

    /// Re-reads the profile of the provider's current session.
    ///
    /// Does nothing without a session. Fetch and decode failures are logged
    /// and publish `profile = None`. The result is only published while the
    /// published session still belongs to the same uid.
    pub async fn refresh_profile(&self) -> Option<UserProfile> {
        let session = self.identity.current_session()?;
        let profile = self.load_profile(&session.uid).await;

        self.state.send_if_modified(|state| {
            if state.uid() != Some(session.uid.as_str()) || state.profile == profile {
                return false;
            }
            state.profile = profile.clone();
            true
        });

        profile
    }

    /// Asks the provider to email a password-reset link.
    pub async fn request_password_reset(&self, email: &str) -> Result<()> {
        match self.identity.send_password_reset(email).await {
            Ok(()) => {
                tracing::info!("[SessionController] Password reset email sent to {}", email);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    "[SessionController] Password reset for {} failed: {}",
                    email,
                    e
                );
                Err(e)
            }
        }
    }

    // ============================================================================
    // Internals
    // ============================================================================

    async fn is_registered_doctor(&self, email: &str) -> Result<bool> {
        let docs = self
            .documents
            .query_by_field(
                &self.backend.doctor_collection,
                &self.backend.email_field,
                &Value::from(email),
            )
            .await?;
        Ok(!docs.is_empty())
    }

    /// Publishes a new session together with its profile.
    async fn establish(&self, session: ProviderSession) -> AuthState {
        let profile = self.load_profile(&session.uid).await;
        let state = AuthState {
            session: Some(session),
            profile,
        };
        self.state.send_replace(state.clone());
        state
    }

    async fn load_profile(&self, uid: &str) -> Option<UserProfile> {
        match self.fetch_profile(uid).await {
            Ok(Some(profile)) => Some(profile),
            Ok(None) => {
                tracing::warn!("[SessionController] No profile document for {}", uid);
                None
            }
            Err(e) => {
                tracing::warn!("[SessionController] Failed to load profile {}: {}", uid, e);
                None
            }
        }
    }

    async fn fetch_profile(&self, uid: &str) -> Result<Option<UserProfile>> {
        tracing::debug!("[SessionController] Fetching profile {}", uid);
        let Some(document) = self
            .documents
            .get(&self.backend.doctor_collection, uid)
            .await?
        else {
            return Ok(None);
        };
        decode(&document).map(Some)
    }

    async fn persist_profile(&self, profile: &UserProfile) -> Result<()> {
        let document = encode(profile)?;
        self.documents
            .set(&self.backend.doctor_collection, &profile.id, document)
            .await
    }

    async fn run_deletion_stage(&self, stage: DeletionStage, uid: &str) -> Result<()> {
        tracing::debug!("[SessionController] Deleting {} of {}", stage, uid);
        match stage {
            DeletionStage::ProfileDocument => already_gone_is_ok(
                self.documents
                    .delete(&self.backend.doctor_collection, uid)
                    .await,
            ),
            DeletionStage::BlobObject => already_gone_is_ok(
                self.blobs
                    .delete_object(&object_path(&self.backend.blob_root, uid))
                    .await,
            ),
            DeletionStage::IdentityAccount => self.identity.delete_current_account().await,
        }
    }

    fn validate_password(&self, password: &str) -> Result<()> {
        let min = self.session_config.min_password_length;
        if password.chars().count() < min {
            return Err(ClinicError::validation(
                "password",
                format!("must be at least {} characters", min),
            ));
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<()> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') {
        return Err(ClinicError::validation("email", "must be an email address"));
    }
    Ok(())
}

fn already_gone_is_ok(result: Result<()>) -> Result<()> {
    match result {
        Err(e) if e.is_not_found() => Ok(()),
        other => other,
    }
}
