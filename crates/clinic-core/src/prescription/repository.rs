//! Prescription repository trait.

use super::model::{Medicine, Patient};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for patients and prescriptions.
#[async_trait]
pub trait PrescriptionRepository: Send + Sync {
    /// Lists the patients a prescription can be written for.
    async fn fetch_patients(&self) -> Result<Vec<Patient>>;

    /// Stores a new prescription.
    ///
    /// # Arguments
    ///
    /// * `patient_id` - The patient the prescription is for
    /// * `medicines` - Medicines in the order they were entered
    /// * `instructions` - Free-text instructions
    async fn add_prescription(
        &self,
        patient_id: &str,
        medicines: Vec<Medicine>,
        instructions: &str,
    ) -> Result<()>;
}
