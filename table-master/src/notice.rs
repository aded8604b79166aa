//! User notices
//!
//! Every flow turns its failures into a [`Notice`] at its own boundary.
//! Nothing is fatal; each notice leaves the user able to retry or go back.

use std::fmt;

use shared::{AppError, FailureKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Destructive,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Destructive
    }
}

impl From<&AppError> for Notice {
    fn from(err: &AppError) -> Self {
        match err.kind() {
            FailureKind::Network => Notice::destructive(
                "Connection problem",
                format!("{}. Please check your connection and try again.", err.message),
            ),
            FailureKind::Validation => Notice::destructive("Error", err.message.clone()),
            FailureKind::NotFound => Notice::info("Not available", err.message.clone()),
            FailureKind::Provider => Notice::destructive("Request declined", err.message.clone()),
            FailureKind::Internal => Notice::destructive(
                "Something went wrong",
                "Please try again in a moment.",
            ),
        }
    }
}

impl From<AppError> for Notice {
    fn from(err: AppError) -> Self {
        Notice::from(&err)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.level {
            NoticeLevel::Info => "i",
            NoticeLevel::Success => "✓",
            NoticeLevel::Destructive => "✗",
        };
        if self.title.is_empty() {
            write!(f, "[{}] {}", marker, self.description)
        } else {
            write!(f, "[{}] {}: {}", marker, self.title, self.description)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_notice_from_error_kinds() {
        let n = Notice::from(AppError::network("Request timed out"));
        assert!(n.is_error());
        assert!(n.description.starts_with("Request timed out"));

        let n = Notice::from(AppError::validation("Please enter an email address"));
        assert_eq!(n.description, "Please enter an email address");

        let n = Notice::from(AppError::restaurant_not_found("4"));
        assert_eq!(n.level, NoticeLevel::Info);
        assert_eq!(n.title, "Not available");

        let n = Notice::from(AppError::storage("disk full"));
        assert!(!n.description.contains("disk full"));

        let n = Notice::from(AppError::new(ErrorCode::PaymentProviderRejected));
        assert_eq!(n.title, "Request declined");
    }

    #[test]
    fn test_display() {
        let n = Notice::success("", "Joined the waitlist");
        assert_eq!(n.to_string(), "[✓] Joined the waitlist");
        let n = Notice::destructive("Error", "Bad input");
        assert_eq!(n.to_string(), "[✗] Error: Bad input");
    }
}
