//! Availability Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::restaurant::RestaurantId;

/// Bookable time on a date (时段)
///
/// `time` is "HH:MM" 24-hour. The directory keeps times unique within a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub time: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// A calendar date with its ordered slot list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableDate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub date: String,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
}

impl AvailableDate {
    /// Exact time-string match
    pub fn find_slot(&self, time: &str) -> Option<&TimeSlot> {
        self.time_slots.iter().find(|s| s.time == time)
    }
}

/// Slot payload when publishing a new date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTimeSlot {
    pub time: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Create available date payload (operator side)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableDateCreate {
    pub restaurant_id: RestaurantId,
    pub date: String,
    pub time_slots: Vec<NewTimeSlot>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_price_accepts_integer_and_float() {
        let slot: TimeSlot = serde_json::from_str(r#"{"time": "19:00", "price": 50}"#).unwrap();
        assert_eq!(slot.price, Decimal::new(50, 0));

        let slot: TimeSlot =
            serde_json::from_str(r#"{"id": 7, "time": "20:30", "price": 42.5}"#).unwrap();
        assert_eq!(slot.id, Some(7));
        assert_eq!(slot.price, Decimal::new(425, 1));
    }

    #[test]
    fn test_find_slot_is_exact_match() {
        let date = AvailableDate {
            id: None,
            date: "2025-03-01".into(),
            time_slots: vec![
                TimeSlot {
                    id: None,
                    time: "19:00".into(),
                    price: Decimal::new(50, 0),
                },
                TimeSlot {
                    id: None,
                    time: "21:00".into(),
                    price: Decimal::new(60, 0),
                },
            ],
        };

        assert_eq!(date.find_slot("21:00").unwrap().price, Decimal::new(60, 0));
        assert!(date.find_slot("21:00:00").is_none());
        assert!(date.find_slot("9:00").is_none());
    }

    #[test]
    fn test_create_payload_shape() {
        let create = AvailableDateCreate {
            restaurant_id: RestaurantId::new("5"),
            date: "2025-04-10".into(),
            time_slots: vec![NewTimeSlot {
                time: "18:30".into(),
                price: Decimal::new(3550, 2),
            }],
        };

        let json = serde_json::to_value(&create).unwrap();
        assert_eq!(json["restaurant_id"], "5");
        assert_eq!(json["time_slots"][0]["time"], "18:30");
        assert_eq!(json["time_slots"][0]["price"], 35.5);
    }
}
