//! Shopper write endpoints: wishlist, cart, reviews, newsletter.
//!
//! Each validates the body against its schema and appends one document.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};

use masterpiece_catalog::{CartItem, Review, Schema, Subscriber, WishlistItem};
use masterpiece_infra::StoreError;

use crate::app::dto::OkResponse;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

type Body = Result<Json<serde_json::Value>, JsonRejection>;

async fn create<T: Schema>(services: &AppServices, body: Body) -> Result<Json<OkResponse>, ApiError> {
    let Json(raw) = body?;
    let entity = T::parse(raw)?;
    let document = entity.to_document().map_err(StoreError::from)?;

    let id = services.store().insert(T::COLLECTION, document).await?;
    tracing::debug!(collection = T::COLLECTION, %id, "document created");

    Ok(Json(OkResponse::ok()))
}

pub async fn add_wishlist(
    Extension(services): Extension<Arc<AppServices>>,
    body: Body,
) -> Result<Json<OkResponse>, ApiError> {
    create::<WishlistItem>(&services, body).await
}

pub async fn add_cart(
    Extension(services): Extension<Arc<AppServices>>,
    body: Body,
) -> Result<Json<OkResponse>, ApiError> {
    create::<CartItem>(&services, body).await
}

pub async fn create_review(
    Extension(services): Extension<Arc<AppServices>>,
    body: Body,
) -> Result<Json<OkResponse>, ApiError> {
    create::<Review>(&services, body).await
}

pub async fn subscribe(
    Extension(services): Extension<Arc<AppServices>>,
    body: Body,
) -> Result<Json<OkResponse>, ApiError> {
    create::<Subscriber>(&services, body).await
}
