//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Map a non-success HTTP status from a remote service onto an error code
    ///
    /// Callers that know which service replied (payment, identity) refine
    /// the result; this is the directory-neutral default.
    pub fn from_http_status(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST
            | StatusCode::CONFLICT
            | StatusCode::UNPROCESSABLE_ENTITY => Self::ValidationFailed,

            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::NotAuthenticated,

            StatusCode::NOT_FOUND | StatusCode::GONE => Self::NotFound,

            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => Self::TimeoutError,

            s if s.is_server_error() => Self::NetworkError,

            s if s.is_success() => Self::Success,

            _ => Self::InvalidRequest,
        }
    }
}
