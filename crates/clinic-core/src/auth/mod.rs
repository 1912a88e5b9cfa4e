//! Authentication domain module.
//!
//! This module contains the identity-provider contract and the records the
//! session controller publishes.
//!
//! # Module Structure
//!
//! - `model`: Session handle, doctor profile and the published `AuthState`
//! - `provider`: `IdentityProvider` trait
//!
//! # Usage
//!
//! ```ignore
//! use clinic_core::auth::{AuthState, IdentityProvider, ProviderSession, UserProfile};
//! ```

mod model;
mod provider;

// Re-export public API
pub use model::{AuthState, ProviderSession, UserProfile};
pub use provider::IdentityProvider;
