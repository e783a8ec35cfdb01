/*
[INPUT]:  HTTP configuration (base URL, timeouts) and stored session tokens
[OUTPUT]: Configured reqwest client with bearer auth and refresh-on-401
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing pipeline behavior
*/

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::auth::TokenStore;
use crate::http::{DispoError, Result};
use crate::types::{ApiEnvelope, ApiMessage, RefreshData, RefreshTokenRequest};

/// Default base URL for the disposition service
const DEFAULT_BASE_URL: &str = "http://localhost:4000/api/v1";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Main HTTP client for the disposition service.
///
/// Holds the session token store and the refresh gate, so the 401 recovery
/// state lives on the client instance (one per app session) instead of in a
/// module-level flag.
#[derive(Debug, Clone)]
pub struct DispoClient {
    http_client: Client,
    base_url: String,
    tokens: TokenStore,
    refresh_gate: Arc<Mutex<()>>,
}

impl DispoClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a new client against an explicit base URL
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        // Validate eagerly so a bad config fails at startup, not per request
        Url::parse(base_url)?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens: TokenStore::new(),
            refresh_gate: Arc::new(Mutex::new(())),
        })
    }

    /// Shared token store backing the request pipeline
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Build full URL for an endpoint path.
    ///
    /// The base URL carries the `/api/v1` prefix, so endpoints are appended
    /// rather than joined (Url::join would drop the prefix).
    fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}", self.base_url, endpoint))?)
    }

    /// Build request builder for an endpoint, without authentication
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.endpoint_url(endpoint)?;
        Ok(self.http_client.request(method, url))
    }

    /// Send a request and parse the whole response body as `T`.
    ///
    /// Non-success statuses are mapped to `DispoError::Api`, reusing the
    /// server's `message` field when the error body carries one.
    pub(crate) async fn send_raw<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(DispoError::api_error(status, error_message(status, &body)));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Send a request and unwrap the `{success, message, data}` envelope
    pub(crate) async fn send_data<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let value: serde_json::Value = self.send_raw(builder).await?;
        unwrap_envelope(value)
    }

    /// Send one authenticated attempt with the given access token
    async fn attempt_authed<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        token: &str,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(method, endpoint)?.bearer_auth(token);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send_raw(builder).await
    }

    /// Authenticated request returning the whole response body.
    ///
    /// On a 401 the pipeline refreshes the session once and retries the
    /// original request once; any further 401 is surfaced to the caller.
    pub(crate) async fn authed_raw<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let token = self
            .tokens
            .access_token()
            .ok_or(DispoError::NotAuthenticated)?;

        match self
            .attempt_authed(method.clone(), endpoint, body, &token)
            .await
        {
            Err(err) if err.is_unauthorized() => {
                let fresh = self.refresh_access_token(&token).await?;
                self.attempt_authed(method, endpoint, body, &fresh).await
            }
            other => other,
        }
    }

    /// Authenticated request unwrapping the standard envelope
    pub(crate) async fn authed_data<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let value: serde_json::Value = self.authed_raw(method, endpoint, body).await?;
        unwrap_envelope(value)
    }

    /// Authenticated GET unwrapping the standard envelope
    pub(crate) async fn authed_get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.authed_data::<T, ()>(Method::GET, endpoint, None).await
    }

    /// Authenticated write that only expects an acknowledgement envelope
    pub(crate) async fn authed_ack<B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<ApiMessage>
    where
        B: Serialize + ?Sized,
    {
        let value: serde_json::Value = self.authed_raw(method, endpoint, body).await?;
        reject_unless_success(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Exchange the refresh token for a new token pair.
    ///
    /// The gate serializes concurrent refresh attempts: the first caller
    /// performs the exchange, later callers observe the rotated token and
    /// reuse it. A rejected refresh clears the store so every subsequent
    /// call fails fast with `SessionExpired`.
    async fn refresh_access_token(&self, stale: &str) -> Result<String> {
        let _guard = self.refresh_gate.lock().await;

        if let Some(current) = self.tokens.access_token() {
            if current != stale {
                return Ok(current);
            }
        }

        let Some(refresh_token) = self.tokens.refresh_token() else {
            self.tokens.clear();
            return Err(DispoError::SessionExpired);
        };

        debug!("access token rejected, refreshing session");
        let builder = self
            .request(Method::POST, "/auth/refresh-token")?
            .json(&RefreshTokenRequest { refresh_token });

        match self.send_data::<RefreshData>(builder).await {
            Ok(data) => {
                self.tokens
                    .set_tokens(&data.access_token, &data.refresh_token);
                Ok(data.access_token)
            }
            Err(err @ (DispoError::Api { .. } | DispoError::Rejected { .. })) => {
                warn!(error = %err, "session refresh rejected, clearing tokens");
                self.tokens.clear();
                Err(DispoError::SessionExpired)
            }
            Err(err) => Err(err),
        }
    }
}

/// Fail with `Rejected` when the envelope flags the call as unsuccessful.
/// Checked before payload deserialization: a rejected envelope usually
/// carries `data: null`, which would not parse as the payload type.
pub(crate) fn reject_unless_success(value: &serde_json::Value) -> Result<()> {
    let success = value
        .get("success")
        .and_then(|success| success.as_bool())
        .unwrap_or(false);
    if success {
        return Ok(());
    }

    let message = value
        .get("message")
        .and_then(|message| message.as_str())
        .unwrap_or("request failed")
        .to_string();
    Err(DispoError::Rejected { message })
}

/// Unwrap the `data` payload of a successful envelope
fn unwrap_envelope<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    reject_unless_success(&value)?;
    let envelope: ApiEnvelope<T> = serde_json::from_value(value)?;
    Ok(envelope.data)
}

/// Pull the server's `message` out of an error body, falling back to the
/// HTTP reason phrase
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|message| message.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = DispoClient::with_config_and_base_url(
            ClientConfig::default(),
            "http://localhost:4000/api/v1/",
        )
        .unwrap();

        let url = client.endpoint_url("/tasks").unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/api/v1/tasks");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = DispoClient::with_config_and_base_url(ClientConfig::default(), "not a url");
        assert!(result.is_err());
    }

    #[test]
    fn test_error_message_prefers_server_message() {
        let message = error_message(
            StatusCode::NOT_FOUND,
            r#"{"success": false, "message": "Task not found"}"#,
        );
        assert_eq!(message, "Task not found");
    }

    #[test]
    fn test_error_message_falls_back_to_reason() {
        let message = error_message(StatusCode::BAD_GATEWAY, "<html>upstream</html>");
        assert_eq!(message, "Bad Gateway");
    }
}
