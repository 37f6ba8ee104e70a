use serde::{Deserialize, Serialize};

use masterpiece_core::DomainResult;

use crate::schema::Schema;

/// Newsletter signup. The address is stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub email: String,
    /// Referral tag (campaign, referrer code).
    #[serde(default, rename = "ref")]
    pub referral: Option<String>,
}

impl Schema for Subscriber {
    const COLLECTION: &'static str = "subscriber";

    fn validate(&self) -> DomainResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masterpiece_core::DomainError;
    use serde_json::json;

    #[test]
    fn ref_round_trips_under_its_wire_name() {
        let sub = Subscriber::parse(json!({"email": "a@b.c", "ref": "tiktok"})).unwrap();
        assert_eq!(sub.referral.as_deref(), Some("tiktok"));
        assert_eq!(sub.to_document().unwrap()["ref"], json!("tiktok"));
    }

    #[test]
    fn email_is_not_format_checked() {
        assert!(Subscriber::parse(json!({"email": "not an email"})).is_ok());
    }

    #[test]
    fn email_is_required() {
        let err = Subscriber::parse(json!({"ref": "x"})).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("email")));
    }
}
