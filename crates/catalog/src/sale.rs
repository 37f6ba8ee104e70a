//! Mock "someone just bought" feed.
//!
//! A fixed sample, never persisted and never generated from real orders.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleEvent {
    pub product_title: String,
    pub city: String,
    pub seconds_ago: u32,
}

impl SaleEvent {
    fn new(product_title: &str, city: &str, seconds_ago: u32) -> Self {
        Self {
            product_title: product_title.to_string(),
            city: city.to_string(),
            seconds_ago,
        }
    }
}

/// Default number of events returned when the caller gives no limit.
pub const DEFAULT_SALES_LIMIT: i64 = 5;

fn sample() -> [SaleEvent; 3] {
    [
        SaleEvent::new("Midnight Iris", "Berlin", 47),
        SaleEvent::new("Void Seraph", "Tokyo", 92),
        SaleEvent::new("Neon Oracle", "New York", 131),
    ]
}

/// First `limit` entries of the sample, in fixed order.
///
/// Negative limits yield nothing; limits past the sample size yield the whole sample.
pub fn recent_sales(limit: i64) -> Vec<SaleEvent> {
    let take = usize::try_from(limit).unwrap_or(0);
    sample().into_iter().take(take).collect()
}
