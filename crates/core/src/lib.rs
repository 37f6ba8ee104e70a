//! `masterpiece-core` — shared primitives for the storefront crates.
//!
//! Pure types only (no IO): the error taxonomy, the store-assigned document id
//! and the JSON document shape every collection stores.

pub mod document;
pub mod error;
pub mod id;

pub use document::{Document, ID_FIELD};
pub use error::{DomainError, DomainResult};
pub use id::DocumentId;
