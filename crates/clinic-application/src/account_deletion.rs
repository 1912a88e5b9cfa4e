//! Progress tracking for the account-deletion cascade.
//!
//! Deleting an account touches three stores in a fixed order. The progress
//! marker remembers which stages already succeeded so a retry resumes at the
//! first incomplete stage instead of starting over.

use std::fmt;

/// One stage of the deletion cascade, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeletionStage {
    /// The doctor profile document.
    ProfileDocument,
    /// The per-doctor blob object.
    BlobObject,
    /// The identity-provider account.
    IdentityAccount,
}

impl DeletionStage {
    pub const ALL: [DeletionStage; 3] = [
        DeletionStage::ProfileDocument,
        DeletionStage::BlobObject,
        DeletionStage::IdentityAccount,
    ];

    fn next(self) -> Option<DeletionStage> {
        match self {
            DeletionStage::ProfileDocument => Some(DeletionStage::BlobObject),
            DeletionStage::BlobObject => Some(DeletionStage::IdentityAccount),
            DeletionStage::IdentityAccount => None,
        }
    }
}

impl fmt::Display for DeletionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeletionStage::ProfileDocument => "profile document",
            DeletionStage::BlobObject => "blob object",
            DeletionStage::IdentityAccount => "identity account",
        };
        f.write_str(name)
    }
}

/// Recorded progress of an interrupted cascade for one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionProgress {
    pub uid: String,
    pending: Option<DeletionStage>,
}

impl DeletionProgress {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            pending: Some(DeletionStage::ProfileDocument),
        }
    }

    /// The next stage to run, or `None` once the cascade is finished.
    pub fn pending(&self) -> Option<DeletionStage> {
        self.pending
    }

    /// Stages that already succeeded.
    pub fn completed(&self) -> Vec<DeletionStage> {
        DeletionStage::ALL
            .into_iter()
            .take_while(|stage| Some(*stage) != self.pending)
            .collect()
    }

    /// Marks `stage` done. Stages must complete in order.
    pub(crate) fn complete(&mut self, stage: DeletionStage) {
        debug_assert_eq!(self.pending, Some(stage));
        self.pending = stage.next();
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_none()
    }
}
