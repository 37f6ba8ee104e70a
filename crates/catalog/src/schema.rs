//! The `Schema` trait: accepted shape + validation rules for one collection.

use serde::{de, de::DeserializeOwned, Deserialize, Deserializer, Serialize};

use masterpiece_core::{Document, DomainError, DomainResult};

/// A validated entity kind stored in its own collection.
///
/// `parse` is the only way request bodies become entities: deserialization
/// failures (missing field, wrong type, unknown enum value) and rule violations
/// both surface as `DomainError::Validation`.
pub trait Schema: Serialize + DeserializeOwned {
    /// Collection name (lowercased entity name).
    const COLLECTION: &'static str;

    /// Check field-level constraints that the type system does not carry.
    fn validate(&self) -> DomainResult<()>;

    /// Deserialize a raw JSON body and validate it.
    fn parse(value: serde_json::Value) -> DomainResult<Self> {
        let entity: Self =
            serde_json::from_value(value).map_err(|e| DomainError::validation(e.to_string()))?;
        entity.validate()?;
        Ok(entity)
    }

    /// Render as a storable JSON object.
    fn to_document(&self) -> serde_json::Result<Document> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(serde::ser::Error::custom(format!(
                "{} did not serialize to an object: {other}",
                Self::COLLECTION
            ))),
        }
    }
}

/// Integer field that also takes whole-number floats (`5.0` reads as 5).
/// Fractional values are rejected.
pub(crate) fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = number.as_i64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        _ => Err(de::Error::custom(format!("invalid value: {number}, expected an integer"))),
    }
}
