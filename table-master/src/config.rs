//! Application configuration

use std::path::{Path, PathBuf};

use chrono::Duration;
use shared::error::{AppError, AppResult};
use table_client::ClientConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory Service base URL
    pub directory_url: String,
    /// Host of the checkout session endpoint (defaults to the directory)
    pub payment_url: Option<String>,
    /// Hosted checkout page; the session id is appended as a path segment
    pub checkout_redirect_base: String,
    /// Identity Provider base URL (defaults to the directory)
    pub auth_url: Option<String>,
    /// Identity Provider public key
    pub auth_anon_key: String,
    /// Origin used for OAuth redirects
    pub app_origin: String,
    /// Holds session.json, pending_booking.json and logs/
    pub data_dir: PathBuf,
    /// Pending bookings older than this are ignored
    pub booking_intent_ttl: Duration,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub log_json: bool,
    /// Environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".into());

        let booking_intent_ttl = match var("BOOKING_INTENT_TTL_MINUTES") {
            Some(raw) => {
                let minutes: i64 = raw.parse().map_err(|_| {
                    AppError::config(format!("BOOKING_INTENT_TTL_MINUTES is not a number: {raw}"))
                })?;
                if minutes <= 0 {
                    return Err(AppError::config("BOOKING_INTENT_TTL_MINUTES must be positive"));
                }
                Duration::minutes(minutes)
            }
            None => Duration::minutes(24 * 60),
        };

        Ok(Self {
            directory_url: var("DIRECTORY_URL")
                .unwrap_or_else(|| "https://table-master-backend.onrender.com".into()),
            payment_url: var("PAYMENT_URL"),
            checkout_redirect_base: var("CHECKOUT_REDIRECT_BASE")
                .unwrap_or_else(|| "https://checkout.stripe.com/c/pay".into()),
            auth_url: var("AUTH_URL"),
            auth_anon_key: Self::require_secret(&var, "AUTH_ANON_KEY", &environment)?,
            app_origin: var("APP_ORIGIN").unwrap_or_else(|| "http://localhost:5173".into()),
            data_dir: var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data")),
            booking_intent_ttl,
            request_timeout_secs: var("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: var("LOG_JSON")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            environment,
        })
    }

    /// Require a secret: must be set in non-development environments
    fn require_secret(
        var: &impl Fn(&str) -> Option<String>,
        name: &str,
        environment: &str,
    ) -> AppResult<String> {
        match var(name) {
            Some(v) => Ok(v),
            None if environment == "development" => Ok(format!("dev-{name}-not-for-production")),
            None => Err(AppError::config(format!(
                "{name} must be set in {environment} environment"
            ))),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Network client configuration
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(&self.directory_url)
            .with_anon_key(&self.auth_anon_key)
            .with_timeout(self.request_timeout_secs);
        if let Some(url) = &self.payment_url {
            config = config.with_payment_url(url);
        }
        if let Some(url) = &self.auth_url {
            config = config.with_auth_url(url);
        }
        config
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }

    pub fn pending_booking_path(&self) -> PathBuf {
        self.data_dir.join("pending_booking.json")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
