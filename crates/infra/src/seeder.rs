//! Demo catalog seeding.
//!
//! Inserts the fixed demo products only when the product collection is empty.
//! The emptiness check and the inserts run under a single-flight lock, so
//! concurrent calls within one process cannot double-seed. Separate processes
//! sharing a database are not coordinated.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use masterpiece_catalog::{demo_catalog, Product, Schema};

use crate::document_store::{DocumentStore, StoreError};

/// Result of a seed attempt. `count` is the product count afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedOutcome {
    pub seeded: bool,
    pub count: u64,
}

pub struct Seeder {
    store: Arc<dyn DocumentStore>,
    in_flight: Mutex<()>,
}

impl std::fmt::Debug for Seeder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seeder").finish_non_exhaustive()
    }
}

impl Seeder {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            in_flight: Mutex::new(()),
        }
    }

    /// Seed the demo catalog if no products exist yet.
    pub async fn seed(&self) -> Result<SeedOutcome, StoreError> {
        let _guard = self.in_flight.lock().await;

        let existing = self.store.count_all(Product::COLLECTION).await?;
        if existing > 0 {
            tracing::debug!(count = existing, "products present; skipping seed");
            return Ok(SeedOutcome {
                seeded: false,
                count: existing,
            });
        }

        for product in demo_catalog() {
            self.store
                .insert(Product::COLLECTION, product.to_document()?)
                .await?;
        }

        let count = self.store.count_all(Product::COLLECTION).await?;
        tracing::info!(count, "seeded demo catalog");
        Ok(SeedOutcome { seeded: true, count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_store::{DocumentFilter, InMemoryDocumentStore, UnavailableDocumentStore};
    use masterpiece_core::Document;

    fn seeder() -> (Arc<InMemoryDocumentStore>, Seeder) {
        let store = Arc::new(InMemoryDocumentStore::new());
        let seeder = Seeder::new(store.clone());
        (store, seeder)
    }

    #[tokio::test]
    async fn seeds_empty_store_once() {
        let (store, seeder) = seeder();

        let first = seeder.seed().await.unwrap();
        assert_eq!(first, SeedOutcome { seeded: true, count: 8 });

        let second = seeder.seed().await.unwrap();
        assert_eq!(second, SeedOutcome { seeded: false, count: 8 });
        assert_eq!(store.count_all("product").await.unwrap(), 8);
    }

    #[tokio::test]
    async fn existing_products_block_seeding() {
        let (store, seeder) = seeder();
        store.insert("product", Document::new()).await.unwrap();

        let outcome = seeder.seed().await.unwrap();
        assert_eq!(outcome, SeedOutcome { seeded: false, count: 1 });
    }

    #[tokio::test]
    async fn seeded_products_are_queryable_by_slug() {
        let (store, seeder) = seeder();
        seeder.seed().await.unwrap();

        let iris = store
            .find_one("product", &DocumentFilter::all().eq("slug", "midnight-iris"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(iris["title"], "Midnight Iris");
        assert_eq!(iris["rarity"], "limited");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_seeds_do_not_double_insert() {
        let (store, seeder) = seeder();
        let seeder = Arc::new(seeder);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let seeder = seeder.clone();
                tokio::spawn(async move { seeder.seed().await })
            })
            .collect();

        let mut seeded = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().seeded {
                seeded += 1;
            }
        }

        assert_eq!(seeded, 1);
        assert_eq!(store.count_all("product").await.unwrap(), 8);
    }

    #[tokio::test]
    async fn unavailable_store_surfaces_error() {
        let seeder = Seeder::new(Arc::new(UnavailableDocumentStore::new("Database not configured")));
        let err = seeder.seed().await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
