//! Schema-flexible JSON documents.

/// A stored document: a JSON object keyed by field name.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Field holding the store-assigned identifier inside a stored document.
pub const ID_FIELD: &str = "_id";
