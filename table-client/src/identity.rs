// table-client/src/identity.rs
// Identity Provider 客户端 - 邮箱密码登录、注册、OAuth

use async_trait::async_trait;
use reqwest::{StatusCode, Url};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::{self, HttpTransport};
use crate::types::{
    AuthSession, PasswordGrant, SignUpData, SignUpOutcome, SignUpReply, SignUpRequest,
};

/// Identity Provider API
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str)
    -> ClientResult<AuthSession>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> ClientResult<SignUpOutcome>;

    async fn sign_out(&self, access_token: &str) -> ClientResult<()>;

    /// Browser URL that starts an OAuth sign-in
    fn oauth_authorize_url(&self, provider: &str, redirect_to: &str) -> ClientResult<Url>;
}

fn auth_reject(status: StatusCode, message: String) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED if message.is_empty() => {
            ClientError::Unauthorized("Invalid credentials".into())
        }
        s if s.is_server_error() => ClientError::Unavailable {
            status: s.as_u16(),
            message,
        },
        _ => ClientError::AuthRejected(message),
    }
}

#[derive(Debug, Clone)]
pub struct NetworkIdentityProvider {
    http: HttpTransport,
}

impl NetworkIdentityProvider {
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let headers = http::header("apikey", config.anon_key.as_deref().unwrap_or_default())?;
        let http = HttpTransport::new(config.auth_base(), config.timeout, headers)?
            .with_reject(auth_reject);
        Ok(Self { http })
    }
}

#[async_trait]
impl IdentityProvider for NetworkIdentityProvider {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> ClientResult<AuthSession> {
        tracing::debug!(email = %email, "Signing in");
        self.http
            .post(
                "auth/v1/token?grant_type=password",
                &PasswordGrant { email, password },
            )
            .await
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> ClientResult<SignUpOutcome> {
        tracing::debug!(email = %email, "Signing up");
        let request = SignUpRequest {
            email,
            password,
            data: SignUpData {
                full_name: display_name,
                user_type: "user",
            },
        };
        let reply: SignUpReply = self.http.post("auth/v1/signup", &request).await?;
        Ok(match reply {
            SignUpReply::Session(session) => SignUpOutcome::Session(session),
            SignUpReply::User(user) => SignUpOutcome::ConfirmationRequired(user.profile()),
        })
    }

    async fn sign_out(&self, access_token: &str) -> ClientResult<()> {
        self.http
            .send_unit(self.http.post_bearer("auth/v1/logout", access_token))
            .await
    }

    fn oauth_authorize_url(&self, provider: &str, redirect_to: &str) -> ClientResult<Url> {
        Url::parse_with_params(
            &self.http.url("auth/v1/authorize"),
            &[("provider", provider), ("redirect_to", redirect_to)],
        )
        .map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }
}
