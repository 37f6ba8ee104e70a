use axum::{
    extract::{rejection::QueryRejection, Query},
    Json,
};

use masterpiece_catalog::{SaleEvent, DEFAULT_SALES_LIMIT};

use crate::app::dto::SalesQuery;
use crate::app::errors::ApiError;

/// Mock recent-sales feed for storefront popups.
pub async fn recent_sales(
    query: Result<Query<SalesQuery>, QueryRejection>,
) -> Result<Json<Vec<SaleEvent>>, ApiError> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(DEFAULT_SALES_LIMIT);
    Ok(Json(masterpiece_catalog::recent_sales(limit)))
}
