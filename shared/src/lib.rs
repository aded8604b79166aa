//! Shared types for TableMaster
//!
//! Common types used across the workspace: directory models, the booking
//! intent handed from restaurant page to checkout, identities, and the
//! unified error system.

pub mod error;
pub mod models;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode, FailureKind};
pub use models::{
    AvailableDate, BookingIntent, Identity, RestaurantDetail, RestaurantId, RestaurantSummary,
    TimeSlot, UserProfile,
};
pub use serde::{Deserialize, Serialize};
