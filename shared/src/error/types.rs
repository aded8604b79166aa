//! Error types

use super::category::{ErrorCategory, FailureKind};
use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type shared by the booking flows:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages, ready to show to the diner
/// - Optional structured details for logs
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the failure kind for this error
    pub fn kind(&self) -> FailureKind {
        self.code.kind()
    }

    /// Get the category for this error
    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a required field error
    pub fn required(field: &str) -> Self {
        Self::with_message(ErrorCode::RequiredField, format!("{} is required", field))
            .with_detail("field", field)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a restaurant not found error
    pub fn restaurant_not_found(restaurant_id: impl Into<String>) -> Self {
        Self::new(ErrorCode::RestaurantNotFound).with_detail("restaurant_id", restaurant_id.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NetworkError, msg)
    }

    /// Create a payment provider error
    pub fn payment_provider(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PaymentProviderRejected, msg)
    }

    /// Create an identity provider error
    pub fn auth_provider(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AuthProviderRejected, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::StorageError, msg)
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfigError, msg)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_message(ErrorCode::StorageCorrupted, err.to_string())
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::BookingIntentMissing);
        assert_eq!(err.code, ErrorCode::BookingIntentMissing);
        assert_eq!(err.message, "Please make a reservation first");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_message() {
        let err = AppError::with_message(ErrorCode::ValidationFailed, "Invalid email format");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Invalid email format");
        assert_eq!(err.to_string(), "Invalid email format");
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::required("email").with_detail("reason", "blank");

        assert_eq!(err.code, ErrorCode::RequiredField);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "email");
        assert_eq!(details.get("reason").unwrap(), "blank");
    }

    #[test]
    fn test_restaurant_not_found_kind() {
        let err = AppError::restaurant_not_found("42");
        assert_eq!(err.kind(), FailureKind::NotFound);
        assert_eq!(err.category(), ErrorCategory::Restaurant);
        assert_eq!(err.details.unwrap().get("restaurant_id").unwrap(), "42");
    }

    #[test]
    fn test_io_error_is_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AppError = io.into();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(err.kind(), FailureKind::Internal);
    }

    #[test]
    fn test_serde_roundtrip_keeps_code() {
        let err = AppError::payment_provider("card declined");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"code\":5002"));
        let back: AppError = serde_json::from_str(&json).unwrap();
        assert_eq!(back.code, ErrorCode::PaymentProviderRejected);
        assert_eq!(back.message, "card declined");
    }
}
