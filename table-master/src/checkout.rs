//! Checkout Handoff
//!
//! Turns the pending booking plus a resolved email into exactly one
//! checkout session request, then hands the diner to the hosted payment page.
//!
//! ```text
//! AwaitingEmail ──pay──▶ RequestingSession ──ok──▶ Redirecting (leaves the app)
//!       ▲                       │
//!       └──── retry ─── Failed ◀┘
//! ```
//!
//! While a request is outstanding the pay control is disabled and further
//! pay actions are suppressed.

use std::sync::Arc;

use parking_lot::Mutex;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{BookingIntent, RestaurantId};
use table_client::{CheckoutSession, CheckoutSessionRequest, PaymentProvider};
use tokio_util::sync::CancellationToken;

use crate::booking_store::PendingBookingStore;
use crate::notice::Notice;
use crate::session::SessionContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    AwaitingEmail,
    RequestingSession,
    Redirecting,
    Failed,
}

/// Where the diner is sent for payment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRedirect {
    pub session_id: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayOutcome {
    Redirect(PaymentRedirect),
    /// Another pay action is already in flight or done
    Suppressed,
    /// The checkout view was closed while waiting
    Abandoned,
}

/// Result of opening the checkout view
pub enum CheckoutEntry {
    Ready(CheckoutHandoff),
    /// No usable pending booking; send the diner back to the restaurant page
    MakeReservationFirst {
        restaurant_id: RestaurantId,
        /// `BookingIntentMissing`, `BookingIntentExpired` or a storage error
        reason: AppError,
    },
}

pub struct CheckoutHandoff {
    intent: BookingIntent,
    session: Arc<SessionContext>,
    payment: Arc<dyn PaymentProvider>,
    redirect_base: String,
    state: Mutex<CheckoutState>,
    lifetime: CancellationToken,
}

impl CheckoutHandoff {
    /// Open checkout for the restaurant in the route
    ///
    /// A pending booking for a different restaurant counts as absent.
    pub fn open(
        route_restaurant_id: &RestaurantId,
        session: Arc<SessionContext>,
        store: &PendingBookingStore,
        payment: Arc<dyn PaymentProvider>,
        redirect_base: impl Into<String>,
    ) -> CheckoutEntry {
        let intent = match store.fetch() {
            Ok(intent) if intent.restaurant_id() == route_restaurant_id => intent,
            Ok(intent) => {
                tracing::warn!(
                    route = %route_restaurant_id,
                    pending = %intent.restaurant_id(),
                    "Pending booking belongs to another restaurant"
                );
                return CheckoutEntry::MakeReservationFirst {
                    restaurant_id: route_restaurant_id.clone(),
                    reason: AppError::new(ErrorCode::BookingIntentMissing),
                };
            }
            Err(reason) => {
                tracing::debug!(route = %route_restaurant_id, code = %reason.code, "No usable pending booking");
                return CheckoutEntry::MakeReservationFirst {
                    restaurant_id: route_restaurant_id.clone(),
                    reason,
                };
            }
        };

        CheckoutEntry::Ready(Self::with_intent(intent, session, payment, redirect_base))
    }

    pub fn with_intent(
        intent: BookingIntent,
        session: Arc<SessionContext>,
        payment: Arc<dyn PaymentProvider>,
        redirect_base: impl Into<String>,
    ) -> Self {
        Self {
            intent,
            session,
            payment,
            redirect_base: redirect_base.into().trim_end_matches('/').to_string(),
            state: Mutex::new(CheckoutState::AwaitingEmail),
            lifetime: CancellationToken::new(),
        }
    }

    pub fn intent(&self) -> &BookingIntent {
        &self.intent
    }

    pub fn state(&self) -> CheckoutState {
        *self.state.lock()
    }

    /// Signed-in diners skip the email prompt
    pub fn needs_email_input(&self) -> bool {
        self.session.authenticated_email().is_none()
    }

    /// Value to pre-fill the email prompt with
    pub fn suggested_email(&self) -> Option<String> {
        self.session.guest_email()
    }

    pub fn is_pay_enabled(&self) -> bool {
        matches!(
            self.state(),
            CheckoutState::AwaitingEmail | CheckoutState::Failed
        )
    }

    /// Email the session will be created for
    ///
    /// The signed-in email wins; otherwise a non-blank guest entry is required.
    pub fn resolve_email(&self, guest_input: Option<&str>) -> AppResult<String> {
        if let Some(email) = self.session.authenticated_email() {
            return Ok(email);
        }
        match guest_input.map(str::trim) {
            Some(email) if !email.is_empty() => Ok(email.to_string()),
            _ => Err(AppError::validation("Please enter an email address")
                .with_detail("field", "email")),
        }
    }

    /// Close the checkout view; an outstanding request is abandoned
    pub fn close(&self) {
        self.lifetime.cancel();
    }

    /// Handle one pay action
    pub async fn pay(&self, guest_input: Option<&str>) -> AppResult<PayOutcome> {
        let email = {
            let mut state = self.state.lock();
            match *state {
                CheckoutState::RequestingSession | CheckoutState::Redirecting => {
                    tracing::debug!("Pay action suppressed");
                    return Ok(PayOutcome::Suppressed);
                }
                CheckoutState::AwaitingEmail | CheckoutState::Failed => {}
            }
            let email = self.resolve_email(guest_input)?;
            *state = CheckoutState::RequestingSession;
            email
        };
        // Back to Failed if this future is dropped mid-request
        let _pending = PendingRequest { state: &self.state };

        if self.needs_email_input()
            && let Err(e) = self.session.remember_guest(&email)
        {
            tracing::warn!(error = %e, "Failed to remember guest email");
        }

        let request = CheckoutSessionRequest {
            email,
            booking_details: self.intent.clone(),
        };

        tracing::debug!(restaurant_id = %self.intent.restaurant_id(), "Requesting checkout session");
        let result = tokio::select! {
            biased;
            _ = self.lifetime.cancelled() => return Ok(PayOutcome::Abandoned),
            result = self.payment.create_checkout_session(&request) => result,
        };

        match result {
            Ok(session) => {
                *self.state.lock() = CheckoutState::Redirecting;
                let redirect = self.redirect_for(session);
                tracing::info!(
                    restaurant_id = %self.intent.restaurant_id(),
                    session_id = %redirect.session_id,
                    "Redirecting to payment"
                );
                Ok(PayOutcome::Redirect(redirect))
            }
            Err(e) => {
                *self.state.lock() = CheckoutState::Failed;
                tracing::warn!(error = %e, "Checkout session failed");
                Err(AppError::from(e))
            }
        }
    }

    fn redirect_for(&self, session: CheckoutSession) -> PaymentRedirect {
        let url = session
            .url
            .unwrap_or_else(|| format!("{}/{}", self.redirect_base, session.session_id));
        PaymentRedirect {
            session_id: session.session_id,
            url,
        }
    }
}

/// Moves an unfinished request to `Failed` when it goes away
struct PendingRequest<'a> {
    state: &'a Mutex<CheckoutState>,
}

impl Drop for PendingRequest<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if *state == CheckoutState::RequestingSession {
            *state = CheckoutState::Failed;
        }
    }
}

impl Drop for CheckoutHandoff {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}

/// Notice for a failed pay action
pub fn payment_failed_notice(err: &AppError) -> Notice {
    match err.code {
        ErrorCode::ValidationFailed | ErrorCode::RequiredField => Notice::from(err),
        _ => Notice::destructive(
            "Payment failed",
            format!("{}. Please try again or contact support.", err.message.trim_end_matches('.')),
        ),
    }
}
