//! Application layer of the clinic client.
//!
//! This crate provides the controllers the UI drives: the doctor session
//! controller and the prescription form. Both coordinate the collaborator
//! traits from `clinic-core`.

pub mod account_deletion;
pub mod prescription_form;
pub mod session_controller;

#[cfg(test)]
mod test_support;

pub use account_deletion::{DeletionProgress, DeletionStage};
pub use prescription_form::{PrescriptionDraft, PrescriptionForm};
pub use session_controller::SessionController;
