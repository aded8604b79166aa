//! Waitlist Model

use serde::{Deserialize, Serialize};

use super::restaurant::RestaurantId;

/// Join waitlist payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistJoin {
    pub email: String,
    pub restaurant_id: RestaurantId,
}

/// Waitlist row as listed on the operator dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub restaurant_id: Option<RestaurantId>,
    #[serde(rename = "created_at")]
    pub joined_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_payload_is_camel_case() {
        let join = WaitlistJoin {
            email: "a@x.com".into(),
            restaurant_id: RestaurantId::new("8"),
        };
        let json = serde_json::to_value(&join).unwrap();
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["restaurantId"], "8");
    }

    #[test]
    fn test_entry_from_dashboard_json() {
        let entry: WaitlistEntry = serde_json::from_str(
            r#"{"id": 4, "email": "a@x.com", "created_at": "2025-01-01T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(entry.id, 4);
        assert_eq!(entry.joined_at, "2025-01-01T12:00:00Z");
        assert!(entry.restaurant_id.is_none());
    }
}
