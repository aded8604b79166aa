//! Availability Selector
//!
//! Date-then-slot selection over one restaurant's availability:
//!
//! ```text
//! NoDateChosen ──choose_date──▶ DateChosen ──choose_slot──▶ SlotChosen ──confirm──▶ BookingIntent
//!                                   ▲                            │
//!                                   └────────choose_date─────────┘  (slot reset)
//! ```
//!
//! A restaurant without dates never leaves `NoDateChosen`; only the waitlist
//! is offered.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{AvailableDate, BookingIntent, RestaurantDetail, TimeSlot};

use crate::booking_store::PendingBookingStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    NoDateChosen,
    DateChosen { date: String },
    SlotChosen { date: String, slot: String },
}

/// What the restaurant page offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageActions {
    /// Date and slot pickers plus "Book now"
    Book,
    /// Nothing bookable; only "Join waitlist"
    WaitlistOnly,
}

#[derive(Debug, Clone)]
pub struct AvailabilitySelector {
    restaurant: RestaurantDetail,
    state: SelectionState,
}

impl AvailabilitySelector {
    pub fn new(restaurant: RestaurantDetail) -> Self {
        Self {
            restaurant,
            state: SelectionState::NoDateChosen,
        }
    }

    pub fn restaurant(&self) -> &RestaurantDetail {
        &self.restaurant
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn actions(&self) -> PageActions {
        if self.restaurant.has_availability() {
            PageActions::Book
        } else {
            PageActions::WaitlistOnly
        }
    }

    pub fn available_dates(&self) -> &[AvailableDate] {
        &self.restaurant.available_dates
    }

    pub fn selected_date(&self) -> Option<&str> {
        match &self.state {
            SelectionState::NoDateChosen => None,
            SelectionState::DateChosen { date } | SelectionState::SlotChosen { date, .. } => {
                Some(date)
            }
        }
    }

    pub fn selected_slot(&self) -> Option<&str> {
        match &self.state {
            SelectionState::SlotChosen { slot, .. } => Some(slot),
            _ => None,
        }
    }

    /// Slots of the selected date; empty before a date is chosen
    pub fn available_time_slots(&self) -> &[TimeSlot] {
        match self.selected_date() {
            Some(date) => self.restaurant.slots_for(date),
            None => &[],
        }
    }

    /// Listed price of the selected slot
    pub fn selected_price(&self) -> Option<Decimal> {
        let date = self.selected_date()?;
        let slot = self.selected_slot()?;
        self.restaurant
            .find_date(date)
            .and_then(|d| d.find_slot(slot))
            .map(|s| s.price)
    }

    /// Select a date; any previously chosen slot is dropped
    pub fn choose_date(&mut self, date: &str) -> AppResult<()> {
        if !self.restaurant.has_availability() {
            return Err(AppError::new(ErrorCode::NoAvailability));
        }
        if self.restaurant.find_date(date).is_none() {
            return Err(AppError::new(ErrorCode::DateNotAvailable).with_detail("date", date));
        }

        tracing::debug!(restaurant_id = %self.restaurant.id, date = %date, "Date chosen");
        self.state = SelectionState::DateChosen {
            date: date.to_string(),
        };
        Ok(())
    }

    /// Select a slot of the chosen date
    pub fn choose_slot(&mut self, slot: &str) -> AppResult<()> {
        let date = self
            .selected_date()
            .ok_or_else(|| AppError::new(ErrorCode::NoDateSelected))?
            .to_string();

        if self.restaurant.slots_for(&date).iter().all(|s| s.time != slot) {
            return Err(AppError::new(ErrorCode::SlotNotAvailable)
                .with_detail("date", date)
                .with_detail("slot", slot));
        }

        tracing::debug!(restaurant_id = %self.restaurant.id, date = %date, slot = %slot, "Slot chosen");
        self.state = SelectionState::SlotChosen {
            date,
            slot: slot.to_string(),
        };
        Ok(())
    }

    /// Build the booking intent for the current selection
    pub fn confirm(&self, now: DateTime<Utc>) -> AppResult<BookingIntent> {
        match &self.state {
            SelectionState::NoDateChosen => Err(AppError::new(ErrorCode::NoDateSelected)),
            SelectionState::DateChosen { .. } => Err(AppError::new(ErrorCode::NoSlotSelected)),
            SelectionState::SlotChosen { date, slot } => {
                BookingIntent::from_selection(&self.restaurant, date, slot, now)
            }
        }
    }

    /// Confirm and hand the intent to the pending booking store
    ///
    /// Moving on to checkout is up to the caller.
    pub fn confirm_and_save(
        &self,
        store: &PendingBookingStore,
        now: DateTime<Utc>,
    ) -> AppResult<BookingIntent> {
        let intent = self.confirm(now)?;
        store.save(&intent)?;
        tracing::info!(
            restaurant_id = %intent.restaurant_id(),
            date = %intent.selected_date(),
            slot = %intent.selected_slot(),
            price = %intent.selected_time_slot_price(),
            "Booking confirmed"
        );
        Ok(intent)
    }
}
