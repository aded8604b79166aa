//! Sign-in, sign-up and sign-out
//!
//! Thin layer between the Identity Provider and the [`SessionContext`].

use std::sync::Arc;

use reqwest::Url;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{RestaurantId, UserProfile};
use table_client::{AuthSession, IdentityProvider, SignUpOutcome};

use crate::notice::Notice;
use crate::session::SessionContext;
use crate::waitlist::parse_email;

/// OAuth providers offered on the sign-in page
pub const OAUTH_PROVIDERS: &[&str] = &["google", "github"];

pub struct AuthFlow {
    identity: Arc<dyn IdentityProvider>,
    session: Arc<SessionContext>,
    app_origin: String,
}

impl AuthFlow {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        session: Arc<SessionContext>,
        app_origin: impl Into<String>,
    ) -> Self {
        Self {
            identity,
            session,
            app_origin: app_origin.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<UserProfile> {
        let email = parse_email(email)?;
        if password.is_empty() {
            return Err(AppError::required("password"));
        }

        let auth = self
            .identity
            .sign_in_with_password(&email, password)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Sign-in failed");
                AppError::from(e)
            })?;
        self.adopt(auth)
    }

    /// Register a new account
    ///
    /// When the provider wants the address confirmed first, nobody is
    /// signed in and the notice says so.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> AppResult<Notice> {
        let email = parse_email(email)?;
        if password.is_empty() {
            return Err(AppError::required("password"));
        }
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(AppError::required("name"));
        }

        let outcome = self
            .identity
            .sign_up(&email, password, display_name)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Sign-up failed");
                AppError::from(e)
            })?;

        match outcome {
            SignUpOutcome::Session(auth) => {
                let user = self.adopt(auth)?;
                Ok(Notice::success(
                    "Account created",
                    format!("Welcome, {}!", user.display_name),
                ))
            }
            SignUpOutcome::ConfirmationRequired(user) => {
                tracing::info!(user_id = %user.id, "Sign-up awaiting email confirmation");
                Ok(Notice::info(
                    "Account created",
                    "Please check your email to verify your account.",
                ))
            }
        }
    }

    /// Sign out
    ///
    /// The provider call is best effort; the local identity is cleared
    /// regardless. The pending booking is not touched.
    pub async fn sign_out(&self) -> AppResult<()> {
        if let Some(token) = self.session.access_token()
            && let Err(e) = self.identity.sign_out(&token).await
        {
            tracing::warn!(error = %e, "Identity provider sign-out failed");
        }
        self.session.sign_out()
    }

    /// Where to send the browser for OAuth sign-in
    pub fn oauth_url(&self, provider: &str) -> AppResult<Url> {
        self.authorize(provider, &format!("{}/dashboard", self.app_origin))
    }

    /// OAuth sign-in that lands back on the checkout of `restaurant_id`
    pub fn oauth_url_for_checkout(
        &self,
        provider: &str,
        restaurant_id: &RestaurantId,
    ) -> AppResult<Url> {
        self.authorize(
            provider,
            &format!("{}/checkout/{restaurant_id}", self.app_origin),
        )
    }

    fn authorize(&self, provider: &str, redirect_to: &str) -> AppResult<Url> {
        if !OAUTH_PROVIDERS.contains(&provider) {
            return Err(AppError::with_message(
                ErrorCode::OAuthFailed,
                format!("Unsupported sign-in provider: {provider}"),
            ));
        }
        self.identity
            .oauth_authorize_url(provider, redirect_to)
            .map_err(|e| AppError::with_message(ErrorCode::OAuthFailed, e.to_string()))
    }

    fn adopt(&self, auth: AuthSession) -> AppResult<UserProfile> {
        let user = auth.user.profile();
        if user.email.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::InvalidResponse,
                "Identity provider returned a user without an email",
            ));
        }
        self.session
            .set_authenticated(user.clone(), Some(auth.access_token))?;
        tracing::info!(user_id = %user.id, "Signed in");
        Ok(user)
    }
}
