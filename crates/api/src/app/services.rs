use std::sync::Arc;

use masterpiece_infra::{
    DocumentStore, InMemoryDocumentStore, PostgresDocumentStore, SeedOutcome, Seeder,
    UnavailableDocumentStore,
};

use crate::config::{ApiConfig, StoreConfig};

/// Detail reported when persistence was requested but not configured.
pub const NOT_CONFIGURED: &str = "Database not configured";

/// Shared handles passed to every handler (via `Extension`).
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn DocumentStore>,
    seeder: Arc<Seeder>,
}

impl std::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppServices").finish_non_exhaustive()
    }
}

impl AppServices {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let seeder = Arc::new(Seeder::new(store.clone()));
        Self { store, seeder }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryDocumentStore::new()))
    }

    /// Wiring whose every store call fails as unavailable.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(Arc::new(UnavailableDocumentStore::new(reason)))
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn seeder(&self) -> &Seeder {
        &self.seeder
    }
}

pub async fn build_services(config: &ApiConfig) -> AppServices {
    match &config.store {
        StoreConfig::InMemory => {
            tracing::info!("using in-memory document store");
            AppServices::in_memory()
        }
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => match PostgresDocumentStore::connect_lazy(database_url, *max_connections) {
            Ok(store) => {
                // Warm-up only; the store retries schema creation on first use.
                if let Err(e) = store.ensure_schema().await {
                    tracing::warn!(error = %e, "could not ensure documents schema");
                }
                tracing::info!(max_connections, "using postgres document store");
                AppServices::new(Arc::new(store))
            }
            Err(e) => {
                tracing::warn!(error = %e, "invalid DATABASE_URL; document store unavailable");
                AppServices::unavailable(e.to_string())
            }
        },
        StoreConfig::Unconfigured => {
            tracing::warn!("USE_PERSISTENT_STORES=true but DATABASE_URL not set; document store unavailable");
            AppServices::unavailable(NOT_CONFIGURED)
        }
    }
}

/// Best-effort seed run at boot. Failures are logged and swallowed so the API
/// still starts.
pub async fn startup_seed(services: &AppServices) -> Option<SeedOutcome> {
    match services.seeder().seed().await {
        Ok(outcome) => {
            tracing::info!(seeded = outcome.seeded, count = outcome.count, "startup seed finished");
            Some(outcome)
        }
        Err(e) => {
            tracing::warn!(error = %e, "startup seed failed");
            None
        }
    }
}
