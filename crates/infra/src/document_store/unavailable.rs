use async_trait::async_trait;

use masterpiece_core::{Document, DocumentId};

use super::{DocumentFilter, DocumentStore, StoreError};

/// Stand-in used when persistence was requested but is not configured.
///
/// Every operation fails with `StoreError::Unavailable`, so the process still
/// starts and the probe endpoint can report the condition.
#[derive(Debug, Clone)]
pub struct UnavailableDocumentStore {
    reason: String,
}

impl UnavailableDocumentStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    fn err(&self) -> StoreError {
        StoreError::Unavailable(self.reason.clone())
    }
}

#[async_trait]
impl DocumentStore for UnavailableDocumentStore {
    async fn insert(&self, _collection: &str, _document: Document) -> Result<DocumentId, StoreError> {
        Err(self.err())
    }

    async fn query(&self, _collection: &str, _filter: &DocumentFilter) -> Result<Vec<Document>, StoreError> {
        Err(self.err())
    }

    async fn find_one(&self, _collection: &str, _filter: &DocumentFilter) -> Result<Option<Document>, StoreError> {
        Err(self.err())
    }

    async fn count_all(&self, _collection: &str) -> Result<u64, StoreError> {
        Err(self.err())
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        Err(self.err())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_operation_reports_the_reason() {
        let store = UnavailableDocumentStore::new("Database not configured");
        let expected = StoreError::Unavailable("Database not configured".to_string());

        assert_eq!(store.insert("review", Document::new()).await.unwrap_err(), expected);
        assert_eq!(store.count_all("product").await.unwrap_err(), expected);
        assert_eq!(store.list_collections().await.unwrap_err(), expected);
        assert_eq!(
            store.query("product", &DocumentFilter::all()).await.unwrap_err(),
            expected
        );
    }
}
