//! Emulator seeding.
//!
//! A `BackendSeed` describes the remote state an in-memory backend starts
//! from. It is read from TOML:
//!
//! ```toml
//! codes = ["4821"]
//!
//! [[doctors]]
//! email = "house@example.com"
//! password = "vicodin"
//!
//! [[accounts]]
//! email = "nurse@example.com"
//! password = "rounds1"
//!
//! [[patients]]
//! id = "p1"
//! name = "Jane Doe"
//! ```

use crate::{
    InMemoryBlobStore, InMemoryDocumentStore, InMemoryIdentityProvider,
    InMemoryPrescriptionRepository,
};
use clinic_core::auth::UserProfile;
use clinic_core::blob::object_path;
use clinic_core::config::BackendConfig;
use clinic_core::document::{Document, encode};
use clinic_core::prescription::Patient;
use clinic_core::{ClinicError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedAccount {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSeed {
    /// Accounts that also get a doctor profile and a blob object.
    #[serde(default)]
    pub doctors: Vec<SeedAccount>,
    /// Accounts with no doctor profile.
    #[serde(default)]
    pub accounts: Vec<SeedAccount>,
    /// One-time code values.
    #[serde(default)]
    pub codes: Vec<String>,
    #[serde(default)]
    pub patients: Vec<Patient>,
}

impl BackendSeed {
    /// Reads a seed file. A missing file yields an empty seed.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            ClinicError::config(format!("Failed to read seed {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }
}

/// A full set of emulated collaborators sharing one seeded state.
#[derive(Debug, Clone)]
pub struct InMemoryBackend {
    pub identity: Arc<InMemoryIdentityProvider>,
    pub documents: Arc<InMemoryDocumentStore>,
    pub blobs: Arc<InMemoryBlobStore>,
    pub prescriptions: Arc<InMemoryPrescriptionRepository>,
}

impl InMemoryBackend {
    pub fn empty() -> Self {
        Self {
            identity: Arc::new(InMemoryIdentityProvider::new()),
            documents: Arc::new(InMemoryDocumentStore::new()),
            blobs: Arc::new(InMemoryBlobStore::new()),
            prescriptions: Arc::new(InMemoryPrescriptionRepository::new()),
        }
    }

    /// Builds a backend whose state matches `seed` under the given namespaces.
    pub fn from_seed(seed: &BackendSeed, backend: &BackendConfig) -> Result<Self> {
        let this = Self {
            prescriptions: Arc::new(InMemoryPrescriptionRepository::with_patients(
                seed.patients.clone(),
            )),
            ..Self::empty()
        };

        for doctor in &seed.doctors {
            let uid = this.identity.register(&doctor.email, &doctor.password)?;
            let profile = UserProfile::new(uid.clone(), doctor.email.clone());
            this.documents
                .insert(&backend.doctor_collection, &uid, encode(&profile)?);
            this.blobs.put(object_path(&backend.blob_root, &uid));
        }

        for account in &seed.accounts {
            this.identity.register(&account.email, &account.password)?;
        }

        for code in &seed.codes {
            let mut doc = Document::new();
            doc.insert(backend.code_field.clone(), Value::from(code.as_str()));
            this.documents.add(&backend.code_collection, doc);
        }

        tracing::debug!(
            "[InMemoryBackend] Seeded {} doctors, {} accounts, {} codes, {} patients",
            seed.doctors.len(),
            seed.accounts.len(),
            seed.codes.len(),
            seed.patients.len()
        );
        Ok(this)
    }
}
