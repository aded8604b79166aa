//! Unified error codes for TableMaster
//!
//! This module defines all error codes used across the clients, the booking
//! flows and the command-line shell. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Booking errors
//! - 5xxx: Payment errors
//! - 6xxx: Restaurant errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for compact serialization
/// in logs and persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Identity provider rejected the request
    AuthProviderRejected = 1008,
    /// OAuth sign-in could not be started
    OAuthFailed = 1009,

    // ==================== 4xxx: Booking ====================
    /// No pending booking to check out
    BookingIntentMissing = 4001,
    /// Pending booking is older than the retention window
    BookingIntentExpired = 4002,
    /// Date is not offered by the restaurant
    DateNotAvailable = 4003,
    /// Time slot is not offered on the selected date
    SlotNotAvailable = 4004,
    /// Selected slot has no listed price
    SlotPriceMissing = 4005,
    /// No date selected
    NoDateSelected = 4006,
    /// No time slot selected
    NoSlotSelected = 4007,
    /// Restaurant has no availability, only the waitlist is open
    NoAvailability = 4008,
    /// A request for this action is already in flight
    RequestInFlight = 4009,

    // ==================== 5xxx: Payment ====================
    /// Payment provider rejected the request
    PaymentProviderRejected = 5002,

    // ==================== 6xxx: Restaurant ====================
    /// Restaurant not found
    RestaurantNotFound = 6001,
    /// Waitlist submission rejected
    WaitlistRejected = 6002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network request failed
    NetworkError = 9003,
    /// Network request timed out
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Remote service replied with an unexpected body
    InvalidResponse = 9006,

    // ==================== 94xx: Storage ====================
    /// Local storage could not be read or written
    StorageError = 9401,
    /// Local storage holds unreadable data
    StorageCorrupted = 9403,
}

impl ErrorCode {
    /// Get the numeric value of this error code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is the success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::AuthProviderRejected => "Authentication failed",
            ErrorCode::OAuthFailed => "Could not start sign-in with the provider",

            // Booking
            ErrorCode::BookingIntentMissing => "Please make a reservation first",
            ErrorCode::BookingIntentExpired => "Your reservation selection has expired",
            ErrorCode::DateNotAvailable => "Date is not available",
            ErrorCode::SlotNotAvailable => "Time slot is not available on this date",
            ErrorCode::SlotPriceMissing => "Time slot has no listed price",
            ErrorCode::NoDateSelected => "Please select a date",
            ErrorCode::NoSlotSelected => "Please select a time slot",
            ErrorCode::NoAvailability => "No slots available currently",
            ErrorCode::RequestInFlight => "Request already in progress",

            // Payment
            ErrorCode::PaymentProviderRejected => "Payment provider rejected the request",

            // Restaurant
            ErrorCode::RestaurantNotFound => {
                "The restaurant you're looking for is not available or has been removed"
            }
            ErrorCode::WaitlistRejected => "Failed to join the waitlist",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Network request failed",
            ErrorCode::TimeoutError => "Network request timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::InvalidResponse => "Unexpected response from server",
            ErrorCode::StorageError => "Local storage error",
            ErrorCode::StorageCorrupted => "Local storage is corrupted",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1008 => Ok(ErrorCode::AuthProviderRejected),
            1009 => Ok(ErrorCode::OAuthFailed),

            // Booking
            4001 => Ok(ErrorCode::BookingIntentMissing),
            4002 => Ok(ErrorCode::BookingIntentExpired),
            4003 => Ok(ErrorCode::DateNotAvailable),
            4004 => Ok(ErrorCode::SlotNotAvailable),
            4005 => Ok(ErrorCode::SlotPriceMissing),
            4006 => Ok(ErrorCode::NoDateSelected),
            4007 => Ok(ErrorCode::NoSlotSelected),
            4008 => Ok(ErrorCode::NoAvailability),
            4009 => Ok(ErrorCode::RequestInFlight),

            // Payment
            5002 => Ok(ErrorCode::PaymentProviderRejected),

            // Restaurant
            6001 => Ok(ErrorCode::RestaurantNotFound),
            6002 => Ok(ErrorCode::WaitlistRejected),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9006 => Ok(ErrorCode::InvalidResponse),
            9401 => Ok(ErrorCode::StorageError),
            9403 => Ok(ErrorCode::StorageCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
