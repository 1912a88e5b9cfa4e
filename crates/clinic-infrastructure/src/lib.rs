//! Infrastructure layer of the clinic client.
//!
//! Configuration loading plus in-memory emulators of the remote
//! collaborators, used by tests and the CLI harness.

pub mod config_service;
pub mod in_memory_blob_store;
pub mod in_memory_document_store;
pub mod in_memory_identity_provider;
pub mod in_memory_prescription_repository;
pub mod paths;
pub mod seed;

pub use crate::config_service::ConfigService;
pub use crate::in_memory_blob_store::InMemoryBlobStore;
pub use crate::in_memory_document_store::InMemoryDocumentStore;
pub use crate::in_memory_identity_provider::InMemoryIdentityProvider;
pub use crate::in_memory_prescription_repository::InMemoryPrescriptionRepository;
pub use crate::paths::ClinicPaths;
pub use crate::seed::{BackendSeed, InMemoryBackend, SeedAccount};
