//! Prescription domain module.
//!
//! # Module Structure
//!
//! - `model`: Patients, medicines and stored prescriptions
//! - `repository`: `PrescriptionRepository` trait

mod model;
mod repository;

// Re-export public API
pub use model::{Medicine, MedicineEntry, Patient, Prescription};
pub use repository::PrescriptionRepository;
