//! Waitlist signup
//!
//! Offered when a restaurant has no open dates. One directory call per
//! submission, nothing retried.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{RestaurantId, WaitlistJoin};
use table_client::DirectoryClient;

use crate::notice::Notice;

/// Trim and sanity-check an email address
///
/// Only the shape `local@domain` is checked; the directory does the rest.
pub fn parse_email(input: &str) -> AppResult<String> {
    let email = input.trim();
    if email.is_empty() {
        return Err(AppError::validation("Please enter your email address.")
            .with_detail("field", "email"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !email.contains(' ') => {
            Ok(email.to_string())
        }
        _ => Err(AppError::validation("Please enter a valid email address.")
            .with_detail("field", "email")),
    }
}

pub struct WaitlistSignup {
    directory: Arc<dyn DirectoryClient>,
    restaurant_id: RestaurantId,
    in_flight: AtomicBool,
}

impl WaitlistSignup {
    pub fn new(directory: Arc<dyn DirectoryClient>, restaurant_id: RestaurantId) -> Self {
        Self {
            directory,
            restaurant_id,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether the submit control is active
    pub fn is_submit_enabled(&self) -> bool {
        !self.in_flight.load(Ordering::SeqCst)
    }

    /// Submit one waitlist entry
    ///
    /// Invalid input fails before any network call. A submission while
    /// another is outstanding is refused.
    pub async fn submit(&self, email_input: &str) -> AppResult<Notice> {
        let email = parse_email(email_input)?;

        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(AppError::new(ErrorCode::RequestInFlight));
        }
        let in_flight = InFlight(&self.in_flight);

        let join = WaitlistJoin {
            email,
            restaurant_id: self.restaurant_id.clone(),
        };
        let result = self.directory.join_waitlist(&join).await;
        drop(in_flight);

        match result {
            Ok(()) => {
                tracing::info!(restaurant_id = %self.restaurant_id, "Joined waitlist");
                Ok(Notice::success(
                    "",
                    "You have successfully joined the waitlist. We'll notify you when slots are available.",
                ))
            }
            Err(e) => {
                tracing::warn!(restaurant_id = %self.restaurant_id, error = %e, "Waitlist signup failed");
                let err = AppError::from(e);
                Err(match err.code {
                    ErrorCode::ValidationFailed => err,
                    _ if err.kind() == shared::FailureKind::Network => err,
                    _ => AppError::with_message(
                        ErrorCode::WaitlistRejected,
                        "Failed to join the waitlist. Please try again.",
                    ),
                })
            }
        }
    }
}

/// Clears the in-flight flag when the submission ends, including by drop
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Submit and always come back with something to show
pub async fn submit_notice(signup: &WaitlistSignup, email_input: &str) -> Notice {
    match signup.submit(email_input).await {
        Ok(notice) => notice,
        Err(e) => Notice::from(&e),
    }
}
