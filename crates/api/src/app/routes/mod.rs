use axum::{
    routing::{get, post},
    Router,
};

pub mod engagement;
pub mod products;
pub mod sales;
pub mod system;

/// Router for every storefront endpoint. None require authentication.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/test", get(system::test_database))
        .route("/seed", post(system::seed))
        .merge(products::router())
        .route("/wishlist", post(engagement::add_wishlist))
        .route("/cart", post(engagement::add_cart))
        .route("/reviews", post(engagement::create_review))
        .route("/subscribe", post(engagement::subscribe))
        .route("/sales", get(sales::recent_sales))
}
