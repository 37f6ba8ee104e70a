//! Query filters shared by every store implementation.

use serde_json::Value;

use masterpiece_core::Document;

/// One predicate on a top-level document field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field equals `value`. An array field matches when it contains `value`.
    Eq { field: String, value: Value },
    /// String field contains `needle`, ignoring case. `needle` is literal text,
    /// not a pattern. Non-string fields never match. Case folding is the
    /// backend's: `to_lowercase` in memory, `ILIKE` in Postgres.
    ContainsIgnoreCase { field: String, needle: String },
}

/// Conjunction of conditions. The empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentFilter {
    conditions: Vec<Condition>,
}

impl DocumentFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition::Eq {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn contains_ignore_case(mut self, field: impl Into<String>, needle: impl Into<String>) -> Self {
        self.conditions.push(Condition::ContainsIgnoreCase {
            field: field.into(),
            needle: needle.into(),
        });
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Evaluate the filter against a document in memory.
    pub fn matches(&self, document: &Document) -> bool {
        self.conditions.iter().all(|c| c.matches(document))
    }
}

impl Condition {
    fn matches(&self, document: &Document) -> bool {
        match self {
            Condition::Eq { field, value } => match document.get(field) {
                Some(Value::Array(items)) => items.contains(value) || matches!(value, Value::Array(v) if v == items),
                Some(found) => found == value,
                None => value.is_null(),
            },
            Condition::ContainsIgnoreCase { field, needle } => document
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| s.to_lowercase().contains(&needle.to_lowercase())),
        }
    }
}
