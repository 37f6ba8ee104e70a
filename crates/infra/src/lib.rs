//! Infrastructure layer: document persistence and demo seeding.

pub mod document_store;
pub mod seeder;

pub use document_store::{
    Condition, DocumentFilter, DocumentStore, InMemoryDocumentStore, PostgresDocumentStore,
    StoreError, UnavailableDocumentStore,
};
pub use seeder::{SeedOutcome, Seeder};
