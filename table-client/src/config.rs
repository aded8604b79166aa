//! Client configuration

use crate::directory::NetworkDirectoryClient;
use crate::error::ClientResult;
use crate::identity::NetworkIdentityProvider;
use crate::payment::NetworkPaymentProvider;

/// Client configuration for the Directory, Payment and Identity services
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Directory Service base URL (e.g., "http://localhost:3000")
    pub directory_url: String,

    /// Payment session endpoint host; defaults to the directory host
    pub payment_url: Option<String>,

    /// Identity Provider base URL
    pub auth_url: Option<String>,

    /// Public API key sent to the Identity Provider
    pub anon_key: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(directory_url: impl Into<String>) -> Self {
        Self {
            directory_url: directory_url.into(),
            payment_url: None,
            auth_url: None,
            anon_key: None,
            timeout: 30,
        }
    }

    /// Set the payment session host
    pub fn with_payment_url(mut self, url: impl Into<String>) -> Self {
        self.payment_url = Some(url.into());
        self
    }

    /// Set the Identity Provider URL
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = Some(url.into());
        self
    }

    /// Set the Identity Provider public key
    pub fn with_anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Effective payment host
    pub fn payment_base(&self) -> &str {
        self.payment_url.as_deref().unwrap_or(&self.directory_url)
    }

    /// Effective identity host
    pub fn auth_base(&self) -> &str {
        self.auth_url.as_deref().unwrap_or(&self.directory_url)
    }

    /// Create a Directory Service client from this configuration
    pub fn build_directory_client(&self) -> ClientResult<NetworkDirectoryClient> {
        NetworkDirectoryClient::from_config(self)
    }

    /// Create a Payment Provider client from this configuration
    pub fn build_payment_provider(&self) -> ClientResult<NetworkPaymentProvider> {
        NetworkPaymentProvider::from_config(self)
    }

    /// Create an Identity Provider client from this configuration
    pub fn build_identity_provider(&self) -> ClientResult<NetworkIdentityProvider> {
        NetworkIdentityProvider::from_config(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}
