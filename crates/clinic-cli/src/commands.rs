//! Subcommand implementations.
//!
//! Each command builds a seeded in-memory backend, runs one operation and
//! prints the resulting state as JSON on stdout.

use anyhow::{Context, Result, anyhow};
use clinic_application::{PrescriptionForm, SessionController};
use clinic_core::config::ClinicConfig;
use clinic_core::prescription::MedicineEntry;
use clinic_infrastructure::{BackendSeed, InMemoryBackend};
use serde_json::json;
use std::sync::Arc;

pub struct Harness {
    pub backend: InMemoryBackend,
    pub controller: Arc<SessionController>,
}

impl Harness {
    pub fn new(config: &ClinicConfig, seed: &BackendSeed) -> Result<Self> {
        let backend = InMemoryBackend::from_seed(seed, &config.backend)
            .context("Failed to seed in-memory backend")?;
        let controller = SessionController::new(
            backend.identity.clone(),
            backend.documents.clone(),
            backend.blobs.clone(),
            config,
        );
        tracing::debug!(
            "[Harness] Seeded {} doctor(s), {} code(s), {} patient(s)",
            seed.doctors.len(),
            seed.codes.len(),
            seed.patients.len()
        );
        Ok(Self {
            backend,
            controller,
        })
    }

    fn print_state(&self) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(&self.controller.state())?);
        Ok(())
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<()> {
        self.controller.sign_in(email, password).await?;
        self.print_state()
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<()> {
        self.controller.sign_up(email, password).await?;
        self.print_state()
    }

    pub async fn redeem_code(&self, code: &str) -> Result<()> {
        let redeemed = self.controller.redeem_code(code).await?;
        tracing::info!("[Harness] Code {} redeemed: {}", code, redeemed);
        println!("{}", json!({ "code": code, "redeemed": redeemed }));
        Ok(())
    }

    pub async fn reset_password(&self, email: &str) -> Result<()> {
        self.controller.request_password_reset(email).await?;
        println!("{}", json!({ "reset_sent_to": email }));
        Ok(())
    }

    pub async fn delete_account(&self, email: &str, password: &str) -> Result<()> {
        self.controller
            .sign_in(email, password)
            .await
            .context("Sign-in before deletion failed")?;
        tracing::info!("[Harness] Deleting account {}", email);
        self.controller.delete_account().await?;
        self.print_state()
    }

    pub async fn change_password(
        &self,
        email: &str,
        password: &str,
        new_password: &str,
    ) -> Result<()> {
        self.controller
            .sign_in(email, password)
            .await
            .context("Sign-in before password change failed")?;
        tracing::info!("[Harness] Changing password for {}", email);
        self.controller.change_password(new_password).await?;
        self.print_state()
    }

    pub async fn prescribe(
        &self,
        patient: &str,
        medicines: &[String],
        instructions: &str,
    ) -> Result<()> {
        let mut form = PrescriptionForm::new(self.backend.prescriptions.clone());
        form.on_appear().await?;
        form.select_patient(patient);
        form.set_instructions(instructions);

        for (index, raw) in medicines.iter().enumerate() {
            if index > 0 {
                form.add_medicine_row();
            }
            let entry = parse_medicine(raw)?;
            tracing::debug!("[Harness] Medicine row {}: {}", index, raw);
            if let Some(row) = form.medicine_mut(index) {
                *row = entry;
            }
        }

        form.commit().await?;
        println!(
            "{}",
            serde_json::to_string_pretty(&self.backend.prescriptions.prescriptions())?
        );
        Ok(())
    }
}

/// Parses `name:dosage`.
pub fn parse_medicine(raw: &str) -> Result<MedicineEntry> {
    let (name, dosage) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("expected NAME:DOSAGE, got '{}'", raw))?;
    Ok(MedicineEntry::new(name.trim(), dosage.trim()))
}
