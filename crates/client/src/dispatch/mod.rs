//! Request dispatcher for the storefront REST backend.
//!
//! Every facade call funnels through [`ApiClient::send`]:
//!
//! - **Target**: `base_url + path`, with optional query pairs.
//! - **Headers**: `Content-Type: application/json`, caller extras, then
//!   `Authorization: Bearer <token>` when a session token is present.
//! - **Transport failure**: [`ApiError::Connectivity`] with a fixed
//!   user-facing message.
//! - **401**: on auth endpoints (login, pre-login, register, OTP) the response
//!   is treated like any other failure. Elsewhere the session and the
//!   response cache are cleared and [`ApiError::AuthExpired`] is returned; navigation is left to
//!   [`crate::AuthRedirect`].
//! - **Other non-2xx**: [`ApiError::Api`] with the backend `detail`.
//! - **2xx**: the decoded JSON body (`null` for an empty body).
//!
//! No retries, no de-duplication, no cancellation. Concurrent calls complete
//! in any order; a cached key written twice keeps the last write.

pub mod error;
pub mod response;

pub use error::ApiError;

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use storefront_core::{AppConfig, ResponseCache, SessionStore};

/// Default base URL for the backend API.
const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "storefront/0.1";

/// Paths whose 401 means "bad credentials" rather than "session expired".
const AUTH_ENDPOINTS: &[&str] = &["/auth/login", "/auth/pre-login", "/auth/login-otp", "/auth/register", "/auth/otp/"];

/// Dispatcher configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every path is appended to (default: http://localhost:8000/api).
    pub base_url: String,
    /// Request timeout (default: 30s).
    pub timeout: Duration,
    /// User-agent string (default: storefront/0.x).
    pub user_agent: String,
    /// Lifetime of cached catalog responses (default: 5 minutes).
    pub cache_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cache_ttl: storefront_core::DEFAULT_TTL,
        }
    }
}

impl From<&AppConfig> for ClientConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
            cache_ttl: config.cache_ttl(),
        }
    }
}

/// A single logical request: method, path, optional query, body and headers.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None, headers: HeaderMap::new() }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Serialize `body` as the JSON request body.
    pub fn json(mut self, body: &impl Serialize) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?);
        Ok(self)
    }

    pub fn query(mut self, pairs: Vec<(&'static str, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn header(mut self, name: header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Whether a 401 from this path means rejected credentials.
    pub fn is_auth_endpoint(&self) -> bool {
        AUTH_ENDPOINTS.iter().any(|prefix| self.path.starts_with(prefix))
    }
}

/// Storefront API client.
///
/// Cheap to clone: the HTTP pool, session store and cache are shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: Arc<SessionStore>,
    cache: Arc<ResponseCache>,
}

impl ApiClient {
    /// Create a client over an already hydrated session store.
    pub fn new(config: ClientConfig, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        url::Url::parse(&config.base_url).map_err(|e| ApiError::InvalidRequest(format!("base url: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("failed to build HTTP client: {e}")))?;

        let cache = Arc::new(ResponseCache::with_ttl(config.cache_ttl));

        Ok(Self { http, config, session, cache })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Dispatch a request and return the decoded JSON body.
    pub async fn send(&self, req: ApiRequest) -> Result<Value, ApiError> {
        let start = Instant::now();
        let url = format!("{}{}", self.config.base_url, req.path);

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(req.headers.clone());
        if let Some(token) = self.session.token().await {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ApiError::InvalidRequest("session token is not a valid header value".to_string()))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let mut builder = self.http.request(req.method.clone(), &url).headers(headers);
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(body) = &req.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::debug!(method = %req.method, path = %req.path, error = %e, "transport failure");
            ApiError::from(e)
        })?;

        let status = response.status();
        tracing::debug!(
            method = %req.method,
            path = %req.path,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "API response"
        );

        if status == StatusCode::UNAUTHORIZED && !req.is_auth_endpoint() {
            tracing::warn!(path = %req.path, "authorization rejected; clearing session");
            if let Err(e) = self.session.clear_session().await {
                tracing::warn!(error = %e, "failed to clear persisted session");
            }
            self.cache.clear().await;
            return Err(ApiError::AuthExpired);
        }

        let bytes = response.bytes().await?;
        let parsed: Result<Value, serde_json::Error> =
            if bytes.iter().all(u8::is_ascii_whitespace) { Ok(Value::Null) } else { serde_json::from_slice(&bytes) };

        if !status.is_success() {
            let message = response::detail_message(parsed.as_ref().ok());
            return Err(ApiError::Api { status: status.as_u16(), message });
        }

        parsed.map_err(ApiError::from)
    }

    /// Dispatch a request and decode the body into `T`.
    pub async fn send_as<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T, ApiError> {
        decode(self.send(req).await?)
    }

    /// GET through the response cache.
    ///
    /// A fresh entry under `key` is returned without touching the network;
    /// otherwise the response is fetched and stored under `key`.
    pub async fn get_cached<T: DeserializeOwned>(&self, key: String, req: ApiRequest) -> Result<T, ApiError> {
        if let Some(value) = self.cache.get(&key).await {
            return decode(value);
        }

        let value = self.send(req).await?;
        self.cache.set(key, value.clone()).await;
        decode(value)
    }
}

/// Convert a JSON payload into a typed model.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(ApiError::from)
}
