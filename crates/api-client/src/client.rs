//! Main API client implementation

use crate::config::ClientConfig;
use crate::credentials::CredentialProvider;
use crate::endpoints::{AuthApi, ItemsApi, MessagesApi, TransactionsApi, UsersApi, WishlistApi};
use crate::error::{self, ApiError, ApiResult};
use crate::operation::{ApiRequest, AuthMode, Operation, RequestBody};
use crate::urls;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{Span, debug, instrument};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Query parameter carrying the credential on query-authenticated routes
const TOKEN_PARAM: &str = "token";

/// Stand-in sent when no credential is stored; the backend rejects it
const MISSING_TOKEN: &str = "null";

/// Tradepost marketplace API client
///
/// Each operation performs exactly one HTTP request: no retry, caching or
/// deduplication happens here. Cloning is cheap and clones share the
/// connection pool and the credential provider.
#[derive(Clone)]
pub struct MarketClient {
    inner: Client,
    config: Arc<ClientConfig>,
    credentials: Arc<dyn CredentialProvider>,
}

impl fmt::Debug for MarketClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl MarketClient {
    /// Create a new client with configuration from the environment
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config, credentials)
    }

    /// Create a new client with specific configuration
    pub fn with_config(
        config: ClientConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| ApiError::config("user_agent is not a valid header value"))?;
        default_headers.insert(USER_AGENT, user_agent);

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
            credentials,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the backend root
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Browsable URL for a stored media path; `""` for an empty path
    #[must_use]
    pub fn media_url(&self, path: &str) -> String {
        urls::full_image_url(&self.config.base_url, path)
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access registration and login
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Access item listing endpoints
    #[must_use]
    pub fn items(&self) -> ItemsApi {
        ItemsApi::new(self.clone())
    }

    /// Access wishlist endpoints
    #[must_use]
    pub fn wishlist(&self) -> WishlistApi {
        WishlistApi::new(self.clone())
    }

    /// Access user profile endpoints
    #[must_use]
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.clone())
    }

    /// Access transaction endpoints
    #[must_use]
    pub fn transactions(&self) -> TransactionsApi {
        TransactionsApi::new(self.clone())
    }

    /// Access messaging endpoints
    #[must_use]
    pub fn messages(&self) -> MessagesApi {
        MessagesApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Request execution
    // -------------------------------------------------------------------------

    /// Execute one request and classify the response.
    ///
    /// 2xx: the body parsed as JSON, verbatim (`null` for `204 No Content`).
    /// Anything else: [`ApiError::Api`] carrying the normalized message.
    #[instrument(
        skip(self, request),
        fields(operation = ?request.operation(), request_id, status)
    )]
    pub async fn execute(&self, request: ApiRequest) -> ApiResult<Value> {
        let (operation, path, query, body) = request.into_parts();
        let endpoint = operation.endpoint();
        let url = urls::resolve(&self.config.base_url, &path);
        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());

        let mut builder = self
            .inner
            .request(endpoint.method.clone(), &url)
            .header(X_REQUEST_ID, &request_id);

        match endpoint.auth {
            AuthMode::None => {
                if !query.is_empty() {
                    builder = builder.query(&query);
                }
            }
            AuthMode::Header => {
                builder = builder.header(AUTHORIZATION, format!("Bearer {}", self.token(operation)));
                if !query.is_empty() {
                    builder = builder.query(&query);
                }
            }
            AuthMode::Query => {
                let token = self.token(operation);
                builder = builder.query(&[(TOKEN_PARAM, token.as_str())]);
                if !query.is_empty() {
                    builder = builder.query(&query);
                }
            }
        }

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        debug!(method = %endpoint.method, path = %path, "Sending request");
        let start = Instant::now();
        let response = builder.send().await?;
        let status = response.status();
        Span::current().record("status", status.as_u16());
        debug!(
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis(),
            "Response received"
        );

        Self::handle_response(response, endpoint.fallback).await
    }

    /// Current credential, or the literal `null` when none is stored
    fn token(&self, operation: Operation) -> String {
        self.credentials.token().unwrap_or_else(|| {
            debug!(?operation, "No credential stored, sending placeholder");
            MISSING_TOKEN.to_string()
        })
    }

    /// Handle HTTP response and parse
    async fn handle_response(response: Response, fallback: &str) -> ApiResult<Value> {
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let body = response.bytes().await?;

        if status.is_success() {
            Ok(serde_json::from_slice(&body)?)
        } else {
            let err = error::normalize(status, &body, fallback);
            debug!(status = status.as_u16(), error = %err, "Request rejected");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::StaticToken;

    #[test]
    fn test_client_creation() {
        let config = ClientConfig::development();
        let client = MarketClient::with_config(config, Arc::new(StaticToken::none()));
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ClientConfig::development().with_base_url("ftp://nope");
        let client = MarketClient::with_config(config, Arc::new(StaticToken::none()));
        assert!(matches!(client, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_media_url_uses_configured_root() {
        let client = MarketClient::with_config(
            ClientConfig::development(),
            Arc::new(StaticToken::none()),
        )
        .unwrap();
        assert_eq!(
            client.media_url("/api/images/a.png"),
            "http://localhost:8000/api/images/a.png"
        );
        assert_eq!(client.media_url(""), "");
    }

    #[test]
    fn test_missing_token_placeholder() {
        let client = MarketClient::with_config(
            ClientConfig::development(),
            Arc::new(StaticToken::none()),
        )
        .unwrap();
        assert_eq!(client.token(Operation::GetProfile), "null");
    }
}
