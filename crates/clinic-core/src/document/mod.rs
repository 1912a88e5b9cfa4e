//! Document database domain module.
//!
//! # Module Structure
//!
//! - `model`: Generic key-value `Document` and record encoding
//! - `store`: `DocumentStore` trait

mod model;
mod store;

// Re-export public API
pub use model::{Document, DocumentSnapshot, decode, encode};
pub use store::DocumentStore;
