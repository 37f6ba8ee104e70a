use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, Json};

use masterpiece_infra::SeedOutcome;

use crate::app::dto::{DatabaseProbe, ServiceInfo};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub const SERVICE_NAME: &str = "PECULIAR MASTERPIECE API";

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: SERVICE_NAME,
        status: "ok",
    })
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Connectivity probe. Always 200; a failing store is reported in the body.
pub async fn test_database(Extension(services): Extension<Arc<AppServices>>) -> Json<DatabaseProbe> {
    let probe = match services.store().list_collections().await {
        Ok(collections) => DatabaseProbe {
            backend: "running",
            database: "connected",
            collections,
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "database probe failed");
            DatabaseProbe {
                backend: "running",
                database: "unavailable",
                collections: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    };
    Json(probe)
}

pub async fn seed(Extension(services): Extension<Arc<AppServices>>) -> Result<Json<SeedOutcome>, ApiError> {
    let outcome = services.seeder().seed().await?;
    Ok(Json(outcome))
}
