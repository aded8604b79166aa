//! App - 应用上下文
//!
//! Built once at startup. Owns the network clients and both local stores,
//! and hands them to the flows by handle.

use std::sync::Arc;

use shared::error::{AppError, AppResult};
use shared::models::RestaurantId;
use table_client::{DirectoryClient, IdentityProvider, PaymentProvider};

use crate::auth::AuthFlow;
use crate::booking_store::PendingBookingStore;
use crate::checkout::{CheckoutEntry, CheckoutHandoff};
use crate::config::Config;
use crate::session::SessionContext;
use crate::waitlist::WaitlistSignup;

pub struct App {
    config: Config,
    directory: Arc<dyn DirectoryClient>,
    payment: Arc<dyn PaymentProvider>,
    identity: Arc<dyn IdentityProvider>,
    session: Arc<SessionContext>,
    pending: PendingBookingStore,
}

impl App {
    /// Build the network clients from configuration and open the stores
    pub fn from_config(config: Config) -> AppResult<Self> {
        std::fs::create_dir_all(config.data_dir()).map_err(|e| {
            AppError::storage(format!(
                "Failed to create data dir {}: {e}",
                config.data_dir().display()
            ))
        })?;

        let client_config = config.client_config();
        let directory = Arc::new(client_config.build_directory_client()?);
        let payment = Arc::new(client_config.build_payment_provider()?);
        let identity = Arc::new(client_config.build_identity_provider()?);

        tracing::debug!(
            directory = %client_config.directory_url,
            payment = %client_config.payment_base(),
            auth = %client_config.auth_base(),
            "Network clients ready"
        );
        Ok(Self::with_services(config, directory, payment, identity))
    }

    /// Assemble from already-built services
    pub fn with_services(
        config: Config,
        directory: Arc<dyn DirectoryClient>,
        payment: Arc<dyn PaymentProvider>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let session = SessionContext::load(config.session_path());
        let pending =
            PendingBookingStore::new(config.pending_booking_path(), config.booking_intent_ttl);
        Self {
            config,
            directory,
            payment,
            identity,
            session,
            pending,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn directory(&self) -> &dyn DirectoryClient {
        self.directory.as_ref()
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub fn pending_bookings(&self) -> &PendingBookingStore {
        &self.pending
    }

    pub fn checkout(&self, restaurant_id: &RestaurantId) -> CheckoutEntry {
        CheckoutHandoff::open(
            restaurant_id,
            self.session.clone(),
            &self.pending,
            self.payment.clone(),
            self.config.checkout_redirect_base.clone(),
        )
    }

    pub fn waitlist(&self, restaurant_id: RestaurantId) -> WaitlistSignup {
        WaitlistSignup::new(self.directory.clone(), restaurant_id)
    }

    pub fn auth(&self) -> AuthFlow {
        AuthFlow::new(
            self.identity.clone(),
            self.session.clone(),
            self.config.app_origin.clone(),
        )
    }
}
