use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use masterpiece_core::{Document, DocumentId};

use super::{stamp, with_id, DocumentFilter, DocumentStore, StoreError};

/// In-memory document store for tests/dev.
///
/// Documents are kept in insertion order per collection, already carrying `_id`.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    inner: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(&self, collection: &str, mut document: Document) -> Result<DocumentId, StoreError> {
        let id = DocumentId::new();
        stamp(&mut document, Utc::now());

        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.entry(collection.to_string())
            .or_default()
            .push(with_id(document, id));
        Ok(id)
    }

    async fn query(&self, collection: &str, filter: &DocumentFilter) -> Result<Vec<Document>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: &str, filter: &DocumentFilter) -> Result<Option<Document>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned()))
    }

    async fn count_all(&self, collection: &str) -> Result<u64, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(collection).map_or(0, |docs| docs.len() as u64))
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        let mut names: Vec<String> = map
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }
}
