//! Outcome handling
//!
//! Success and cancel pages the Payment Provider sends the diner back to.
//! Nothing is verified against the directory; the provider's own
//! confirmation is authoritative.

use reqwest::Url;
use shared::error::{AppError, AppResult};

use crate::booking_store::PendingBookingStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Session id is echoed for support only
    Success { session_id: Option<String> },
    Cancelled,
}

impl Outcome {
    /// Parse the return URL the provider redirected to
    pub fn from_return_url(input: &str) -> AppResult<Self> {
        let url = Url::parse(input.trim()).map_err(|e| {
            AppError::validation(format!("Invalid return URL: {e}")).with_detail("url", input)
        })?;

        let last = url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
            .unwrap_or_default();

        match last {
            "success" => {
                let session_id = url
                    .query_pairs()
                    .find(|(k, _)| k == "session_id")
                    .map(|(_, v)| v.into_owned())
                    .filter(|v| !v.is_empty());
                Ok(Outcome::Success { session_id })
            }
            "cancel" | "cancelled" => Ok(Outcome::Cancelled),
            _ => Err(AppError::validation("Not a booking outcome URL").with_detail("url", input)),
        }
    }
}

/// What the outcome page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeView {
    pub title: &'static str,
    pub message: &'static str,
    pub hint: Option<&'static str>,
    pub session_id: Option<String>,
}

impl OutcomeView {
    fn for_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success { session_id } => Self {
                title: "Booking Successful!",
                message: "Thank you for your booking. We look forward to seeing you!",
                hint: None,
                session_id,
            },
            Outcome::Cancelled => Self {
                title: "Booking Cancelled",
                message: "We're sorry to see you cancel your booking.",
                hint: Some(
                    "If you change your mind, you're always welcome to make a new reservation.",
                ),
                session_id: None,
            },
        }
    }
}

pub struct OutcomePage;

impl OutcomePage {
    /// Reach an outcome page
    ///
    /// The pending booking is cleared either way. A failure to clear is
    /// logged; the outcome is still shown.
    pub fn enter(outcome: Outcome, store: &PendingBookingStore) -> OutcomeView {
        if let Err(e) = store.clear() {
            tracing::warn!(error = %e, "Failed to clear pending booking");
        }
        match &outcome {
            Outcome::Success { session_id } => {
                tracing::info!(session_id = ?session_id, "Booking completed")
            }
            Outcome::Cancelled => tracing::info!("Booking cancelled"),
        }
        OutcomeView::for_outcome(outcome)
    }
}
