//! Booking Model
//!
//! [`BookingIntent`] is the diner's confirmed selection, carried from the
//! restaurant page to checkout. The remaining types are directory records.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::restaurant::{RestaurantDetail, RestaurantId};
use crate::error::{AppError, AppResult, ErrorCode};

/// Confirmed date/slot/price selection awaiting payment
///
/// Only [`BookingIntent::from_selection`] builds a fresh intent, and it
/// refuses any slot that is not listed under the chosen date. Nothing
/// re-validates the fields afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingIntent {
    restaurant_id: RestaurantId,
    restaurant_name: String,
    selected_date: String,
    selected_slot: String,
    #[serde(with = "rust_decimal::serde::float")]
    selected_time_slot_price: Decimal,
    #[serde(rename = "timestamp")]
    created_at: DateTime<Utc>,
}

impl BookingIntent {
    /// Build an intent from a restaurant's availability
    ///
    /// The price is looked up by exact time match under `date`. A missing
    /// date, a missing slot or a negative price fails closed.
    pub fn from_selection(
        restaurant: &RestaurantDetail,
        date: &str,
        slot: &str,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        let available = restaurant.find_date(date).ok_or_else(|| {
            AppError::new(ErrorCode::DateNotAvailable).with_detail("date", date)
        })?;

        let time_slot = available.find_slot(slot).ok_or_else(|| {
            AppError::new(ErrorCode::SlotPriceMissing)
                .with_detail("date", date)
                .with_detail("slot", slot)
        })?;

        if time_slot.price.is_sign_negative() {
            return Err(AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("Negative price listed for {} {}", date, slot),
            ));
        }

        Ok(Self {
            restaurant_id: restaurant.id.clone(),
            restaurant_name: restaurant.name.clone(),
            selected_date: date.to_string(),
            selected_slot: slot.to_string(),
            selected_time_slot_price: time_slot.price,
            created_at,
        })
    }

    pub fn restaurant_id(&self) -> &RestaurantId {
        &self.restaurant_id
    }

    pub fn restaurant_name(&self) -> &str {
        &self.restaurant_name
    }

    pub fn selected_date(&self) -> &str {
        &self.selected_date
    }

    pub fn selected_slot(&self) -> &str {
        &self.selected_slot
    }

    pub fn selected_time_slot_price(&self) -> Decimal {
        self.selected_time_slot_price
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the intent is older than `ttl` at `now`
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.created_at) > ttl
    }
}

/// Diner's booking as listed on "My bookings"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub restaurant_name: String,
    #[serde(default)]
    pub booking_date: String,
    #[serde(default)]
    pub booking_time: String,
    #[serde(default)]
    pub status: String,
}

/// Booking as listed on the operator dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantBooking {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub customer_name: String,
    pub booking_date: String,
    pub booking_time: String,
    #[serde(default)]
    pub party_size: u32,
    #[serde(default)]
    pub special_requests: Option<String>,
}

/// Create reservation payload (operator side)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub restaurant_id: RestaurantId,
    pub available_date_id: i64,
    pub time_slot_id: i64,
}
