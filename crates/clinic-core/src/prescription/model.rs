//! Prescription domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A patient that can be selected when composing a prescription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
}

/// One editable medicine row of a prescription draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineEntry {
    pub name: String,
    pub dosage: String,
}

impl MedicineEntry {
    pub fn new(name: impl Into<String>, dosage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dosage: dosage.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.dosage.is_empty()
    }
}

/// Medicine value object as persisted with a prescription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    pub name: String,
    pub dosage: String,
}

impl From<&MedicineEntry> for Medicine {
    fn from(entry: &MedicineEntry) -> Self {
        Self {
            name: entry.name.clone(),
            dosage: entry.dosage.clone(),
        }
    }
}

/// A committed prescription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: String,
    pub patient_id: String,
    pub medicines: Vec<Medicine>,
    pub instructions: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entry_is_empty() {
        assert!(MedicineEntry::default().is_empty());
        assert!(!MedicineEntry::new("Paracetamol", "").is_empty());
    }

    #[test]
    fn test_medicine_from_entry() {
        let entry = MedicineEntry::new("Paracetamol", "500mg");
        let medicine = Medicine::from(&entry);
        assert_eq!(medicine.name, "Paracetamol");
        assert_eq!(medicine.dosage, "500mg");
    }
}
