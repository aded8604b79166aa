//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 4xxx: Booking errors
/// - 5xxx: Payment errors
/// - 6xxx: Restaurant errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Booking errors (4xxx)
    Booking,
    /// Payment errors (5xxx)
    Payment,
    /// Restaurant errors (6xxx)
    Restaurant,
    /// System errors (9xxx and unassigned ranges)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            4000..5000 => Self::Booking,
            5000..6000 => Self::Payment,
            6000..7000 => Self::Restaurant,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Booking => "booking",
            Self::Payment => "payment",
            Self::Restaurant => "restaurant",
            Self::System => "system",
        }
    }
}

/// How a failure reaches the diner.
///
/// Every failure is caught at the component that issued the call and turned
/// into a notice; the kind decides which notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Request failed or timed out; the diner may retry
    Network,
    /// Missing or invalid input; no network call was made
    Validation,
    /// Restaurant or record absent; shown as a "not available" view
    NotFound,
    /// Payment or identity provider rejected the request
    Provider,
    /// Local storage or configuration trouble
    Internal,
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    /// Get the failure kind for this error code
    pub const fn kind(&self) -> FailureKind {
        match self {
            ErrorCode::NetworkError | ErrorCode::TimeoutError | ErrorCode::InvalidResponse => {
                FailureKind::Network
            }

            ErrorCode::ValidationFailed
            | ErrorCode::InvalidRequest
            | ErrorCode::InvalidFormat
            | ErrorCode::RequiredField
            | ErrorCode::DateNotAvailable
            | ErrorCode::SlotNotAvailable
            | ErrorCode::SlotPriceMissing
            | ErrorCode::NoDateSelected
            | ErrorCode::NoSlotSelected
            | ErrorCode::NoAvailability
            | ErrorCode::RequestInFlight
            | ErrorCode::WaitlistRejected => FailureKind::Validation,

            ErrorCode::NotFound
            | ErrorCode::RestaurantNotFound
            | ErrorCode::BookingIntentMissing
            | ErrorCode::BookingIntentExpired => FailureKind::NotFound,

            ErrorCode::NotAuthenticated
            | ErrorCode::AuthProviderRejected
            | ErrorCode::OAuthFailed
            | ErrorCode::PaymentProviderRejected => FailureKind::Provider,

            ErrorCode::Success
            | ErrorCode::Unknown
            | ErrorCode::InternalError
            | ErrorCode::ConfigError
            | ErrorCode::StorageError
            | ErrorCode::StorageCorrupted => FailureKind::Internal,
        }
    }
}
