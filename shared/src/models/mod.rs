//! Data models
//!
//! Directory records, the booking intent and identities. Wire formats follow
//! the Directory Service JSON (snake_case lists, camelCase profile fields).

pub mod availability;
pub mod booking;
pub mod identity;
pub mod restaurant;
pub mod waitlist;

pub use availability::{AvailableDate, AvailableDateCreate, NewTimeSlot, TimeSlot};
pub use booking::{BookingIntent, BookingRecord, ReservationCreate, RestaurantBooking};
pub use identity::{Identity, UserProfile};
pub use restaurant::{RestaurantDetail, RestaurantId, RestaurantSummary, SearchFilters};
pub use waitlist::{WaitlistEntry, WaitlistJoin};
