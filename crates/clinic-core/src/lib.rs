//! Domain layer of the clinic client.
//!
//! Holds the records, the collaborator traits (identity provider, document
//! store, blob store, prescription repository), configuration and the shared
//! error type. Nothing here talks to a network.

pub mod auth;
pub mod blob;
pub mod config;
pub mod document;
pub mod error;
pub mod prescription;

// Re-export common error type
pub use error::{ClinicError, Result};
