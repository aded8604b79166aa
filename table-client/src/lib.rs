//! Table Client - HTTP clients for the TableMaster services
//!
//! Typed network access to the three external systems the booking flow talks to:
//! - Directory Service: restaurants, availability, waitlists, bookings
//! - Payment Provider: hosted checkout sessions
//! - Identity Provider: email/password and OAuth sign-in

pub mod config;
pub mod directory;
pub mod error;
pub mod http;
pub mod identity;
pub mod payment;
pub mod types;

pub use config::ClientConfig;
pub use directory::{DirectoryClient, NetworkDirectoryClient};
pub use error::{ClientError, ClientResult};
pub use identity::{IdentityProvider, NetworkIdentityProvider};
pub use payment::{NetworkPaymentProvider, PaymentProvider};
pub use types::{AuthSession, CheckoutSession, CheckoutSessionRequest, SignUpOutcome};
