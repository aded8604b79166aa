// table-client/src/http.rs
// HTTP 传输层 - 共享的请求/响应处理

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, ClientResult};

/// 服务端返回的错误响应格式
///
/// The services disagree on the field name, so every known spelling is read.
#[derive(Debug, Default, serde::Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorBody {
    /// Parse an error body, falling back to the raw text
    pub fn parse(text: &str) -> String {
        match serde_json::from_str::<ErrorBody>(text) {
            Ok(body) => body
                .message
                .or(body.error_description)
                .or(body.msg)
                .or(body.error)
                .unwrap_or_default(),
            Err(_) => text.trim().to_string(),
        }
    }
}

/// Maps a non-success reply onto a [`ClientError`]
pub type RejectFn = fn(StatusCode, String) -> ClientError;

/// Default mapping used by the Directory Service
pub fn directory_reject(status: StatusCode, message: String) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized(message),
        StatusCode::NOT_FOUND | StatusCode::GONE => ClientError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            ClientError::Validation(message)
        }
        _ => ClientError::Unavailable {
            status: status.as_u16(),
            message,
        },
    }
}

/// 网络 HTTP 传输
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    reject: RejectFn,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout_secs: u64, headers: HeaderMap) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            reject: directory_reject,
        })
    }

    /// Replace the non-success mapping
    pub fn with_reject(mut self, reject: RejectFn) -> Self {
        self.reject = reject;
        self
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.client.get(self.url(path))).await
    }

    pub async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        self.send(self.client.get(self.url(path)).query(query)).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    /// POST and ignore whatever body comes back
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<()> {
        self.send_unit(self.client.post(self.url(path)).json(body))
            .await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send_unit(self.client.delete(self.url(path))).await
    }

    /// Attach a bearer token to an ad hoc request
    pub fn post_bearer(&self, path: &str, token: &str) -> RequestBuilder {
        self.client.post(self.url(path)).bearer_auth(token)
    }

    pub async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let response = req.send().await?;
        let response = self.check(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(error = %e, "Unexpected response body");
            ClientError::InvalidResponse(e.to_string())
        })
    }

    pub async fn send_unit(&self, req: RequestBuilder) -> ClientResult<()> {
        let response = req.send().await?;
        self.check(response).await?;
        Ok(())
    }

    async fn check(&self, response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let message = ErrorBody::parse(&text);
        tracing::warn!(status = status.as_u16(), message = %message, "Request rejected");
        Err((self.reject)(status, message))
    }
}

/// Header map with a single entry
pub fn header(name: &'static str, value: &str) -> ClientResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    if !value.is_empty() {
        let value =
            HeaderValue::from_str(value).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        headers.insert(name, value);
    }
    Ok(headers)
}
