//! Recording mocks of the remote collaborators for unit tests.

use async_trait::async_trait;
use clinic_core::auth::{IdentityProvider, ProviderSession, UserProfile};
use clinic_core::blob::BlobStore;
use clinic_core::document::{Document, DocumentSnapshot, DocumentStore, encode};
use clinic_core::prescription::{Medicine, Patient, PrescriptionRepository};
use clinic_core::{ClinicError, Result};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Call log plus injectable failures keyed by operation name.
#[derive(Default)]
pub struct Recorder {
    calls: Mutex<Vec<String>>,
    failures: Mutex<HashMap<&'static str, ClinicError>>,
}

impl Recorder {
    fn record(&self, op: &'static str, detail: impl Into<String>) -> Result<()> {
        let detail = detail.into();
        let entry = if detail.is_empty() {
            op.to_string()
        } else {
            format!("{} {}", op, detail)
        };
        self.calls.lock().unwrap().push(entry);
        match self.failures.lock().unwrap().get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    pub fn fail(&self, op: &'static str, err: ClinicError) {
        self.failures.lock().unwrap().insert(op, err);
    }

    pub fn heal(&self, op: &'static str) {
        self.failures.lock().unwrap().remove(op);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls to `op`, regardless of arguments.
    pub fn count(&self, op: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == op || c.starts_with(&format!("{} ", op)))
            .count()
    }
}

#[derive(Default)]
pub struct MockIdentity {
    pub recorder: Recorder,
    accounts: Mutex<HashMap<String, (String, String)>>,
    current: Mutex<Option<ProviderSession>>,
}

impl MockIdentity {
    pub fn with_account(self, email: &str, password: &str, uid: &str) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), (uid.to_string(), password.to_string()));
        self
    }

    pub fn signed_in_as(self, uid: &str, email: &str) -> Self {
        *self.current.lock().unwrap() = Some(ProviderSession::new(uid, Some(email.to_string())));
        self
    }
}

#[async_trait]
impl IdentityProvider for MockIdentity {
    fn current_session(&self) -> Option<ProviderSession> {
        self.current.lock().unwrap().clone()
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<ProviderSession> {
        self.recorder.record("authenticate", email)?;
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(email) {
            Some((uid, pw)) if pw == password => {
                let session = ProviderSession::new(uid.clone(), Some(email.to_string()));
                *self.current.lock().unwrap() = Some(session.clone());
                Ok(session)
            }
            _ => Err(ClinicError::ProviderAuth("wrong password".to_string())),
        }
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<ProviderSession> {
        self.recorder.record("create_account", email)?;
        let uid = format!("uid-{}", email);
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), (uid.clone(), password.to_string()));
        let session = ProviderSession::new(uid, Some(email.to_string()));
        *self.current.lock().unwrap() = Some(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        self.recorder.record("sign_out", "")?;
        *self.current.lock().unwrap() = None;
        Ok(())
    }

    async fn update_password(&self, new_password: &str) -> Result<()> {
        self.recorder.record("update_password", new_password)
    }

    async fn send_password_reset(&self, email: &str) -> Result<()> {
        self.recorder.record("send_password_reset", email)
    }

    async fn delete_current_account(&self) -> Result<()> {
        self.recorder.record("delete_current_account", "")?;
        let session = self.current.lock().unwrap().take();
        if let Some(session) = session {
            self.accounts
                .lock()
                .unwrap()
                .retain(|_, (uid, _)| *uid != session.uid);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MockDocuments {
    pub recorder: Recorder,
    docs: Mutex<BTreeMap<(String, String), Document>>,
    get_gate: Mutex<Option<Arc<Notify>>>,
}

impl MockDocuments {
    pub fn with_profile(self, collection: &str, profile: &UserProfile) -> Self {
        self.insert(collection, &profile.id, encode(profile).unwrap());
        self
    }

    pub fn with_code(self, collection: &str, id: &str, code: &str) -> Self {
        let mut doc = Document::new();
        doc.insert("code".to_string(), Value::from(code));
        self.insert(collection, id, doc);
        self
    }

    pub fn insert(&self, collection: &str, id: &str, doc: Document) {
        self.docs
            .lock()
            .unwrap()
            .insert((collection.to_string(), id.to_string()), doc);
    }

    pub fn contains(&self, collection: &str, id: &str) -> bool {
        self.docs
            .lock()
            .unwrap()
            .contains_key(&(collection.to_string(), id.to_string()))
    }

    /// Makes every `get` wait until the returned `Notify` is signalled.
    pub fn gate_gets(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.get_gate.lock().unwrap() = Some(gate.clone());
        gate
    }
}

#[async_trait]
impl DocumentStore for MockDocuments {
    async fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<DocumentSnapshot>> {
        self.recorder
            .record("query", format!("{} {}={}", collection, field, value))?;
        Ok(self
            .docs
            .lock()
            .unwrap()
            .iter()
            .filter(|((c, _), doc)| c == collection && doc.get(field) == Some(value))
            .map(|((_, id), doc)| DocumentSnapshot::new(id.clone(), doc.clone()))
            .collect())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let gate = self.get_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.recorder.record("get", format!("{}/{}", collection, id))?;
        Ok(self
            .docs
            .lock()
            .unwrap()
            .get(&(collection.to_string(), id.to_string()))
            .cloned())
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> Result<()> {
        self.recorder.record("set", format!("{}/{}", collection, id))?;
        self.insert(collection, id, document);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.recorder.record("delete", format!("{}/{}", collection, id))?;
        self.docs
            .lock()
            .unwrap()
            .remove(&(collection.to_string(), id.to_string()))
            .map(|_| ())
            .ok_or_else(|| ClinicError::not_found("document", id))
    }
}

#[derive(Default)]
pub struct MockBlobs {
    pub recorder: Recorder,
    objects: Mutex<HashSet<String>>,
}

impl MockBlobs {
    pub fn with_object(self, path: &str) -> Self {
        self.objects.lock().unwrap().insert(path.to_string());
        self
    }
}

#[async_trait]
impl BlobStore for MockBlobs {
    async fn delete_object(&self, path: &str) -> Result<()> {
        self.recorder.record("delete_object", path)?;
        if self.objects.lock().unwrap().remove(path) {
            Ok(())
        } else {
            Err(ClinicError::not_found("blob", path))
        }
    }
}

#[derive(Default)]
pub struct MockPrescriptions {
    pub recorder: Recorder,
    pub patients: Vec<Patient>,
    pub added: Mutex<Vec<(String, Vec<Medicine>, String)>>,
}

#[async_trait]
impl PrescriptionRepository for MockPrescriptions {
    async fn fetch_patients(&self) -> Result<Vec<Patient>> {
        self.recorder.record("fetch_patients", "")?;
        Ok(self.patients.clone())
    }

    async fn add_prescription(
        &self,
        patient_id: &str,
        medicines: Vec<Medicine>,
        instructions: &str,
    ) -> Result<()> {
        self.recorder.record("add_prescription", patient_id)?;
        self.added.lock().unwrap().push((
            patient_id.to_string(),
            medicines,
            instructions.to_string(),
        ));
        Ok(())
    }
}
