//! In-memory prescription repository.

use async_trait::async_trait;
use chrono::Utc;
use clinic_core::prescription::{Medicine, Patient, Prescription, PrescriptionRepository};
use clinic_core::{ClinicError, Result};
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

/// Prescription repository backed by in-memory vectors.
#[derive(Debug, Default)]
pub struct InMemoryPrescriptionRepository {
    patients: RwLock<Vec<Patient>>,
    prescriptions: RwLock<Vec<Prescription>>,
}

impl InMemoryPrescriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patients(patients: Vec<Patient>) -> Self {
        Self {
            patients: RwLock::new(patients),
            prescriptions: RwLock::new(Vec::new()),
        }
    }

    /// Snapshot of stored prescriptions, oldest first.
    pub fn prescriptions(&self) -> Vec<Prescription> {
        self.prescriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PrescriptionRepository for InMemoryPrescriptionRepository {
    async fn fetch_patients(&self) -> Result<Vec<Patient>> {
        Ok(self
            .patients
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn add_prescription(
        &self,
        patient_id: &str,
        medicines: Vec<Medicine>,
        instructions: &str,
    ) -> Result<()> {
        let known = self
            .patients
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|p| p.id == patient_id);
        if !known {
            return Err(ClinicError::not_found("patient", patient_id));
        }

        let prescription = Prescription {
            id: Uuid::new_v4().to_string(),
            patient_id: patient_id.to_string(),
            medicines,
            instructions: instructions.to_string(),
            created_at: Utc::now(),
        };
        tracing::debug!(
            "[InMemoryPrescriptionRepository] Stored prescription {} for {}",
            prescription.id,
            patient_id
        );
        self.prescriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prescription);
        Ok(())
    }
}
