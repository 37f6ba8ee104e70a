//! Per-client wishlist and cart entries.
//!
//! `client_id` is an opaque browser-side identifier; there are no accounts.

use serde::{Deserialize, Serialize};

use masterpiece_core::{DomainError, DomainResult};

use crate::schema::{whole_number, Schema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub client_id: String,
    pub product_id: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

impl Schema for WishlistItem {
    const COLLECTION: &'static str = "wishlistitem";

    fn validate(&self) -> DomainResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub client_id: String,
    pub product_id: String,
    #[serde(default = "default_quantity", deserialize_with = "whole_number")]
    pub quantity: i64,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

fn default_quantity() -> i64 {
    1
}

impl Schema for CartItem {
    const COLLECTION: &'static str = "cartitem";

    fn validate(&self) -> DomainResult<()> {
        if self.quantity < 1 {
            return Err(DomainError::field("quantity", "must be greater than or equal to 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wishlist_requires_client_and_product() {
        let err = WishlistItem::parse(json!({"client_id": "c1"})).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("product_id")));

        let item = WishlistItem::parse(json!({"client_id": "c1", "product_id": "p1", "size": "M"})).unwrap();
        assert_eq!(item.size.as_deref(), Some("M"));
        assert_eq!(item.color, None);
    }

    #[test]
    fn cart_quantity_defaults_to_one() {
        let item = CartItem::parse(json!({"client_id": "c1", "product_id": "p1"})).unwrap();
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn cart_quantity_accepts_integral_float() {
        let item = CartItem::parse(json!({"client_id": "c1", "product_id": "p1", "quantity": 2.0})).unwrap();
        assert_eq!(item.quantity, 2);
        assert!(CartItem::parse(json!({"client_id": "c1", "product_id": "p1", "quantity": 1.5})).is_err());
    }

    #[test]
    fn cart_rejects_zero_quantity() {
        let err = CartItem::parse(json!({"client_id": "c1", "product_id": "p1", "quantity": 0})).unwrap_err();
        assert_eq!(err, DomainError::field("quantity", "must be greater than or equal to 1"));
    }

    #[test]
    fn collections_are_lowercased_entity_names() {
        assert_eq!(WishlistItem::COLLECTION, "wishlistitem");
        assert_eq!(CartItem::COLLECTION, "cartitem");
    }
}
