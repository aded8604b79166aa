//! Client error types

use reqwest::StatusCode;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a server-side failure
    #[error("Service unavailable ({status}): {message}")]
    Unavailable { status: u16, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Restaurant not found
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Payment Provider refused to create a session
    #[error("Payment provider rejected the request: {0}")]
    PaymentRejected(String),

    /// Identity Provider refused the request
    #[error("Identity provider rejected the request: {0}")]
    AuthRejected(String),

    /// URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Error code for this client error
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            ClientError::Http(e) if e.is_decode() => ErrorCode::InvalidResponse,
            ClientError::Http(_) => ErrorCode::NetworkError,
            ClientError::Unavailable { status, .. } => {
                match StatusCode::from_u16(*status).map(ErrorCode::from_http_status) {
                    Ok(ErrorCode::TimeoutError) => ErrorCode::TimeoutError,
                    _ => ErrorCode::NetworkError,
                }
            }
            ClientError::InvalidResponse(_) => ErrorCode::InvalidResponse,
            ClientError::Serialization(_) => ErrorCode::InvalidResponse,
            ClientError::Unauthorized(_) => ErrorCode::NotAuthenticated,
            ClientError::NotFound(_) => ErrorCode::NotFound,
            ClientError::RestaurantNotFound(_) => ErrorCode::RestaurantNotFound,
            ClientError::Validation(_) => ErrorCode::ValidationFailed,
            ClientError::PaymentRejected(_) => ErrorCode::PaymentProviderRejected,
            ClientError::AuthRejected(_) => ErrorCode::AuthProviderRejected,
            ClientError::InvalidUrl(_) => ErrorCode::ConfigError,
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let code = err.code();
        match err {
            // Provider and validation messages are written for the user
            ClientError::PaymentRejected(message)
            | ClientError::AuthRejected(message)
            | ClientError::Validation(message)
            | ClientError::Unauthorized(message)
                if !message.is_empty() =>
            {
                AppError::with_message(code, message)
            }
            ClientError::RestaurantNotFound(id) => AppError::restaurant_not_found(id),
            other => AppError::new(code).with_detail("cause", other.to_string()),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::FailureKind;

    #[test]
    fn test_provider_message_reaches_user() {
        let err: AppError = ClientError::PaymentRejected("Card declined".into()).into();
        assert_eq!(err.code, ErrorCode::PaymentProviderRejected);
        assert_eq!(err.message, "Card declined");
        assert_eq!(err.kind(), FailureKind::Provider);
    }

    #[test]
    fn test_empty_provider_message_falls_back() {
        let err: AppError = ClientError::AuthRejected(String::new()).into();
        assert_eq!(err.code, ErrorCode::AuthProviderRejected);
        assert_eq!(err.message, ErrorCode::AuthProviderRejected.message());
    }

    #[test]
    fn test_kinds() {
        let not_found: AppError = ClientError::RestaurantNotFound("7".into()).into();
        assert_eq!(not_found.kind(), FailureKind::NotFound);
        assert_eq!(not_found.code, ErrorCode::RestaurantNotFound);

        let down: AppError = ClientError::Unavailable {
            status: 502,
            message: "bad gateway".into(),
        }
        .into();
        assert_eq!(down.kind(), FailureKind::Network);

        let slow = ClientError::Unavailable {
            status: 504,
            message: String::new(),
        };
        assert_eq!(slow.code(), ErrorCode::TimeoutError);

        let invalid: AppError = ClientError::Validation("email is invalid".into()).into();
        assert_eq!(invalid.kind(), FailureKind::Validation);
        assert_eq!(invalid.message, "email is invalid");
    }
}
