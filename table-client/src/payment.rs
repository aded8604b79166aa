// table-client/src/payment.rs
// Payment Provider 客户端 - 创建托管支付会话

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpTransport;
use crate::types::{CheckoutSession, CheckoutSessionRequest};

const CHECKOUT_SESSION_PATH: &str = "api/stripe/create-checkout-session";

/// Hosted-checkout session factory
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// One session per call, never retried here
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> ClientResult<CheckoutSession>;
}

/// A 5xx reply means the provider is unavailable; any other non-2xx is a
/// rejection whose body `message` is what the diner sees.
fn payment_reject(status: StatusCode, message: String) -> ClientError {
    match status {
        s if s.is_server_error() => ClientError::Unavailable {
            status: s.as_u16(),
            message,
        },
        _ if message.is_empty() => {
            ClientError::PaymentRejected(format!("Checkout session failed ({})", status.as_u16()))
        }
        _ => ClientError::PaymentRejected(message),
    }
}

#[derive(Debug, Clone)]
pub struct NetworkPaymentProvider {
    http: HttpTransport,
}

impl NetworkPaymentProvider {
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let http = HttpTransport::new(config.payment_base(), config.timeout, Default::default())?
            .with_reject(payment_reject);
        Ok(Self { http })
    }
}

#[async_trait]
impl PaymentProvider for NetworkPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> ClientResult<CheckoutSession> {
        tracing::debug!(
            restaurant_id = %request.booking_details.restaurant_id(),
            "Requesting checkout session"
        );
        let session: CheckoutSession = self.http.post(CHECKOUT_SESSION_PATH, request).await?;
        if session.session_id.is_empty() {
            return Err(ClientError::InvalidResponse("empty sessionId".into()));
        }
        Ok(session)
    }
}
