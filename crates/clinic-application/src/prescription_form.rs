//! Prescription composition form.
//!
//! Holds the draft a doctor edits (patient, medicine rows, instructions) and
//! commits it to the prescription repository in one step.

use clinic_core::prescription::{Medicine, MedicineEntry, Patient, PrescriptionRepository};
use clinic_core::{ClinicError, Result};
use std::sync::Arc;

/// Draft state of a prescription. Never submitted partially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionDraft {
    pub selected_patient: Option<String>,
    pub medicines: Vec<MedicineEntry>,
    pub instructions: String,
}

impl Default for PrescriptionDraft {
    /// An empty draft starts with one empty medicine row.
    fn default() -> Self {
        Self {
            selected_patient: None,
            medicines: vec![MedicineEntry::default()],
            instructions: String::new(),
        }
    }
}

impl PrescriptionDraft {
    /// Checks that patient, medicines and instructions are all present.
    /// Whitespace-only patient ids and instructions count as missing.
    pub fn validate(&self) -> Result<&str> {
        let patient = self
            .selected_patient
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ClinicError::validation("patient", "no patient selected"))?;
        if self.medicines.is_empty() {
            return Err(ClinicError::validation("medicines", "at least one medicine is required"));
        }
        if self.instructions.trim().is_empty() {
            return Err(ClinicError::validation("instructions", "instructions are empty"));
        }
        Ok(patient)
    }
}

/// Form controller for composing a prescription.
pub struct PrescriptionForm {
    repository: Arc<dyn PrescriptionRepository>,
    patients: Vec<Patient>,
    draft: PrescriptionDraft,
}

impl PrescriptionForm {
    pub fn new(repository: Arc<dyn PrescriptionRepository>) -> Self {
        Self {
            repository,
            patients: Vec::new(),
            draft: PrescriptionDraft::default(),
        }
    }

    /// Loads the patient list. Call when the form becomes visible.
    pub async fn on_appear(&mut self) -> Result<()> {
        match self.repository.fetch_patients().await {
            Ok(patients) => {
                tracing::debug!("[PrescriptionForm] Loaded {} patients", patients.len());
                self.patients = patients;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("[PrescriptionForm] Failed to load patients: {}", e);
                Err(e)
            }
        }
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn draft(&self) -> &PrescriptionDraft {
        &self.draft
    }

    pub fn select_patient(&mut self, patient_id: impl Into<String>) {
        self.draft.selected_patient = Some(patient_id.into());
    }

    pub fn set_instructions(&mut self, instructions: impl Into<String>) {
        self.draft.instructions = instructions.into();
    }

    pub fn medicines(&self) -> &[MedicineEntry] {
        &self.draft.medicines
    }

    /// Mutable access to one medicine row.
    pub fn medicine_mut(&mut self, index: usize) -> Option<&mut MedicineEntry> {
        self.draft.medicines.get_mut(index)
    }

    /// Appends an empty medicine row.
    pub fn add_medicine_row(&mut self) {
        self.draft.medicines.push(MedicineEntry::default());
    }

    /// Submits the draft.
    ///
    /// An incomplete draft fails with `Validation` and is left as is. On
    /// success the draft is reset; if the repository fails it is kept so the
    /// doctor can retry.
    pub async fn commit(&mut self) -> Result<()> {
        let patient_id = self.draft.validate()?.to_string();
        let medicines: Vec<Medicine> = self.draft.medicines.iter().map(Medicine::from).collect();

        self.repository
            .add_prescription(&patient_id, medicines, &self.draft.instructions)
            .await?;

        tracing::info!(
            "[PrescriptionForm] Prescription with {} medicine(s) added for {}",
            self.draft.medicines.len(),
            patient_id
        );
        self.draft = PrescriptionDraft::default();
        Ok(())
    }
}
