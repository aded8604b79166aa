//! Request and response bodies for the external services

use serde::{Deserialize, Serialize};
use shared::models::{BookingIntent, UserProfile};

/// Create checkout session request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionRequest {
    pub email: String,
    pub booking_details: BookingIntent,
}

/// Hosted checkout session handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub session_id: String,
    /// Hosted page URL, when the provider returns one
    #[serde(default)]
    pub url: Option<String>,
}

/// Identity Provider user record
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl AuthUser {
    /// Profile as used by the booking flow
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            email: self.email.clone().unwrap_or_default(),
            display_name: self
                .user_metadata
                .full_name
                .clone()
                .or_else(|| self.user_metadata.name.clone())
                .unwrap_or_default(),
        }
    }
}

/// Signed-in session
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: AuthUser,
}

/// Result of a sign-up
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    /// Account is usable right away
    Session(AuthSession),
    /// Account waits for email verification
    ConfirmationRequired(UserProfile),
}

#[derive(Debug, Serialize)]
pub(crate) struct PasswordGrant<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignUpRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub data: SignUpData<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignUpData<'a> {
    pub full_name: &'a str,
    pub user_type: &'a str,
}

/// Sign-up replies with a session, or with the bare user when
/// verification is pending
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SignUpReply {
    Session(AuthSession),
    User(AuthUser),
}
