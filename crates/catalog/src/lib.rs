//! Storefront schemas.
//!
//! One validated type per stored entity kind, plus the transient sales feed and
//! the fixed demo catalog. Pure data and validation (no IO, no HTTP, no storage).

pub mod demo;
pub mod product;
pub mod review;
pub mod sale;
pub mod schema;
pub mod shopper;
pub mod subscriber;

pub use demo::demo_catalog;
pub use product::{Product, ProductRating, Rarity};
pub use review::Review;
pub use sale::{recent_sales, SaleEvent, DEFAULT_SALES_LIMIT};
pub use schema::Schema;
pub use shopper::{CartItem, WishlistItem};
pub use subscriber::Subscriber;
