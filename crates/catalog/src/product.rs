use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use masterpiece_core::{DomainError, DomainResult};

use crate::schema::Schema;

/// Scarcity tier of a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    #[default]
    Limited,
    Ultra,
    Grail,
}

/// Aggregate review score shown on the product card.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductRating {
    pub average: f64,
    pub count: i64,
}

/// A catalog product.
///
/// `slug` is unique by convention only; nothing enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub collections: Vec<String>,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub total_edition: Option<i64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default = "default_inventory")]
    pub inventory: BTreeMap<String, i64>,
    #[serde(default)]
    pub rating: ProductRating,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn default_in_stock() -> bool {
    true
}

/// Ten units in each of the standard sizes.
pub fn default_inventory() -> BTreeMap<String, i64> {
    ["S", "M", "L", "XL"]
        .into_iter()
        .map(|size| (size.to_string(), 10))
        .collect()
}

impl Product {
    /// A product with every optional attribute at its default.
    pub fn new(title: impl Into<String>, slug: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            description: String::new(),
            price,
            original_price: None,
            categories: Vec::new(),
            collections: Vec::new(),
            rarity: Rarity::default(),
            total_edition: None,
            images: Vec::new(),
            colors: Vec::new(),
            sizes: Vec::new(),
            in_stock: default_in_stock(),
            inventory: default_inventory(),
            rating: ProductRating::default(),
            featured: false,
            created_at: None,
        }
    }
}

impl Schema for Product {
    const COLLECTION: &'static str = "product";

    fn validate(&self) -> DomainResult<()> {
        if !non_negative(self.price) {
            return Err(DomainError::field("price", "must be greater than or equal to 0"));
        }
        if let Some(original) = self.original_price {
            if !non_negative(original) {
                return Err(DomainError::field(
                    "original_price",
                    "must be greater than or equal to 0",
                ));
            }
        }
        if let Some(edition) = self.total_edition {
            if edition < 1 {
                return Err(DomainError::field(
                    "total_edition",
                    "must be greater than or equal to 1",
                ));
            }
        }
        Ok(())
    }
}
