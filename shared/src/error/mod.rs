//! Unified error system for TableMaster
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`FailureKind`]: How a failure is surfaced to the diner
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Booking errors
//! - 5xxx: Payment errors
//! - 6xxx: Restaurant errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, FailureKind};
//!
//! let err = AppError::new(ErrorCode::RestaurantNotFound);
//! assert_eq!(err.kind(), FailureKind::NotFound);
//!
//! let err = AppError::validation("Please enter an email address")
//!     .with_detail("field", "email");
//! assert_eq!(err.kind(), FailureKind::Validation);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::{ErrorCategory, FailureKind};
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
