use serde::{Deserialize, Serialize};

use masterpiece_core::{Document, ID_FIELD};
use masterpiece_infra::DocumentFilter;

// -------------------------
// Query DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    /// Drop name; matches products whose `collections` contains it.
    pub collection: Option<String>,
    /// Case-insensitive title substring.
    pub q: Option<String>,
}

impl ProductListQuery {
    /// Empty parameters are treated as absent.
    pub fn to_filter(&self) -> DocumentFilter {
        let mut filter = DocumentFilter::all();
        if let Some(collection) = self.collection.as_deref().filter(|c| !c.is_empty()) {
            filter = filter.eq("collections", collection);
        }
        if let Some(q) = self.q.as_deref().filter(|q| !q.is_empty()) {
            filter = filter.contains_ignore_case("title", q);
        }
        filter
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SalesQuery {
    pub limit: Option<i64>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DatabaseProbe {
    pub backend: &'static str,
    pub database: &'static str,
    pub collections: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Replace the internal `_id` field with a plain string `id`.
pub fn expose_id(mut document: Document) -> Document {
    if let Some(id) = document.remove(ID_FIELD) {
        let id = match id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        document.insert("id".to_string(), serde_json::Value::String(id));
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expose_id_renames_internal_field() {
        let mut doc = Document::new();
        doc.insert("_id".to_string(), json!("0190e0c4-0000-7000-8000-000000000000"));
        doc.insert("slug".to_string(), json!("midnight-iris"));

        let doc = expose_id(doc);

        assert!(!doc.contains_key("_id"));
        assert_eq!(doc["id"], json!("0190e0c4-0000-7000-8000-000000000000"));
        assert_eq!(doc["slug"], json!("midnight-iris"));
    }

    #[test]
    fn empty_query_params_are_ignored() {
        let query = ProductListQuery {
            collection: Some(String::new()),
            q: Some(String::new()),
        };
        assert!(query.to_filter().is_empty());
    }

    #[test]
    fn both_params_compose() {
        let query = ProductListQuery {
            collection: Some("drop-001".to_string()),
            q: Some("void".to_string()),
        };
        assert_eq!(
            query.to_filter(),
            DocumentFilter::all()
                .eq("collections", "drop-001")
                .contains_ignore_case("title", "void")
        );
    }

    #[test]
    fn probe_omits_absent_error() {
        let probe = DatabaseProbe {
            backend: "running",
            database: "connected",
            collections: vec!["product".to_string()],
            error: None,
        };
        let json = serde_json::to_value(probe).unwrap();
        assert_eq!(
            json,
            json!({"backend": "running", "database": "connected", "collections": ["product"]})
        );
    }
}
