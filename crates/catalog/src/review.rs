use serde::{Deserialize, Serialize};

use masterpiece_core::{DomainError, DomainResult};

use crate::schema::{whole_number, Schema};

/// A shopper review. `product_id` is not checked against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub product_id: String,
    pub name: String,
    #[serde(deserialize_with = "whole_number")]
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl Schema for Review {
    const COLLECTION: &'static str = "review";

    fn validate(&self) -> DomainResult<()> {
        if !(1..=5).contains(&self.rating) {
            return Err(DomainError::field("rating", "must be between 1 and 5"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_five_star_review() {
        let review = Review::parse(json!({
            "product_id": "p1", "name": "Ava", "rating": 5, "comment": "great",
        }))
        .unwrap();
        assert_eq!(review.rating, 5);
        assert_eq!(review.photo_url, None);
    }

    #[test]
    fn rejects_rating_above_five() {
        let err = Review::parse(json!({
            "product_id": "p1", "name": "Ava", "rating": 6, "comment": "great",
        }))
        .unwrap_err();
        assert_eq!(err, DomainError::field("rating", "must be between 1 and 5"));
    }

    #[test]
    fn rejects_rating_below_one() {
        let err = Review::parse(json!({"product_id": "p1", "name": "Ava", "rating": 0})).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn comment_defaults_to_empty() {
        let review = Review::parse(json!({"product_id": "p1", "name": "Ava", "rating": 3})).unwrap();
        assert_eq!(review.comment, "");
    }

    #[test]
    fn accepts_integral_float_rating() {
        let review = Review::parse(json!({"product_id": "p1", "name": "Ava", "rating": 5.0})).unwrap();
        assert_eq!(review.rating, 5);

        let err = Review::parse(json!({"product_id": "p1", "name": "Ava", "rating": 4.5})).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("integer")));
    }

    #[test]
    fn rejects_non_integer_rating() {
        let err = Review::parse(json!({"product_id": "p1", "name": "Ava", "rating": "five"})).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: exactly ratings 1..=5 validate.
            #[test]
            fn rating_bounds(rating in -50i64..50i64) {
                let review = Review {
                    product_id: "p1".to_string(),
                    name: "Ava".to_string(),
                    rating,
                    comment: String::new(),
                    photo_url: None,
                };
                prop_assert_eq!(review.validate().is_ok(), (1..=5).contains(&rating));
            }
        }
    }
}
