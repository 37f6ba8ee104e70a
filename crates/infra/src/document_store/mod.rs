//! Document store boundary.
//!
//! Generic persistence for any entity kind: documents are JSON objects grouped
//! into named collections, each keyed by a store-assigned `DocumentId`. Nothing
//! here knows about schemas; callers validate before inserting.
//!
//! Every document returned by a store carries its id in the `_id` field
//! (string form). Response shaping (renaming to `id`) is the caller's job.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

use masterpiece_core::{Document, DocumentId, ID_FIELD};

pub mod filter;
pub mod in_memory;
pub mod postgres;
pub mod unavailable;

pub use filter::{Condition, DocumentFilter};
pub use in_memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;
pub use unavailable::UnavailableDocumentStore;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store is unconfigured or cannot be reached.
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    /// The store answered but the operation failed.
    #[error("document store error: {0}")]
    Backend(String),

    /// A document could not be encoded for storage.
    #[error("document encoding failed: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err.to_string())
    }
}

/// Collection-addressed document persistence.
///
/// Implementations must be safe to share across request handlers
/// (`Arc<dyn DocumentStore>`). A single `insert` is atomic; nothing spans
/// more than one document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a document and return its newly assigned id.
    async fn insert(&self, collection: &str, document: Document) -> Result<DocumentId, StoreError>;

    /// All documents in `collection` matching `filter`, in no guaranteed order.
    async fn query(&self, collection: &str, filter: &DocumentFilter) -> Result<Vec<Document>, StoreError>;

    /// First document matching `filter`, if any.
    async fn find_one(&self, collection: &str, filter: &DocumentFilter) -> Result<Option<Document>, StoreError>;

    /// Number of documents in `collection`.
    async fn count_all(&self, collection: &str) -> Result<u64, StoreError>;

    /// Names of the collections that hold at least one document, sorted.
    async fn list_collections(&self) -> Result<Vec<String>, StoreError>;
}

/// Stamp insertion metadata onto a document.
///
/// `created_at`/`updated_at` are always overwritten with the insertion time.
pub(crate) fn stamp(document: &mut Document, now: DateTime<Utc>) {
    let ts = serde_json::Value::String(now.to_rfc3339_opts(SecondsFormat::Micros, true));
    document.insert("created_at".to_string(), ts.clone());
    document.insert("updated_at".to_string(), ts);
}

/// Attach the id under `_id`, replacing anything the caller put there.
pub(crate) fn with_id(mut document: Document, id: DocumentId) -> Document {
    document.insert(ID_FIELD.to_string(), serde_json::Value::String(id.to_string()));
    document
}
