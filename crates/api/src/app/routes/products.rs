use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Path, Query},
    routing::get,
    Json, Router,
};

use masterpiece_catalog::{Product, Schema};
use masterpiece_core::{Document, DomainError};
use masterpiece_infra::DocumentFilter;

use crate::app::dto::{self, ProductListQuery};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:slug", get(get_product))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<ProductListQuery>, QueryRejection>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let Query(query) = query?;
    let filter = query.to_filter();

    let products: Vec<Document> = services
        .store()
        .query(Product::COLLECTION, &filter)
        .await?
        .into_iter()
        .map(dto::expose_id)
        .collect();

    Ok(Json(products))
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(slug): Path<String>,
) -> Result<Json<Document>, ApiError> {
    let product = services
        .store()
        .find_one(Product::COLLECTION, &DocumentFilter::all().eq("slug", slug))
        .await?
        .ok_or_else(DomainError::not_found)?;

    Ok(Json(dto::expose_id(product)))
}
