//! Request transport for the members API.
//!
//! [`ApiClient`](crate::ApiClient) builds [`ApiRequest`]s and hands them to a
//! [`Transport`]. The transport only moves bytes: it does not interpret status
//! codes, so every non-2xx response comes back as an ordinary [`ApiResponse`].

use crate::config::ApiConfig;
use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP methods used by the members API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Returns the method name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One call to the members API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path below the origin, e.g. `/api/integrations/3`.
    pub path: String,
    /// Query parameters in order.
    pub query: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Creates a request with no query and no body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Sets the query parameters.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Status and decoded body of an HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// JSON body, or `Value::Null` when empty or not JSON.
    pub body: Value,
}

impl ApiResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Returns true for a 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the body's `error` string, if present.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.body
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

/// Sends requests to the members API.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a request and returns whatever response the server produced.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` only when no HTTP response was received.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// reqwest-backed transport with a cookie jar holding the session.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: reqwest::Url,
    cookies: Arc<Jar>,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Builds a transport for the configured origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let mut base_url = reqwest::Url::parse(config.base_url()).map_err(|e| {
            TransportError::new(format!("invalid base URL {}: {e}", config.base_url()))
        })?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let cookies = Arc::new(Jar::default());
        let mut builder = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&cookies))
            .user_agent(config.user_agent());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::new(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            cookies,
        })
    }

    /// Returns the normalized origin.
    #[must_use]
    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    /// Exports the session cookies as a `Cookie` header value.
    #[must_use]
    pub fn session_cookies(&self) -> Option<String> {
        self.cookies
            .cookies(&self.base_url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    /// Loads cookies previously produced by [`Self::session_cookies`].
    pub fn restore_cookies(&self, header: &str) {
        for cookie in header.split(';').map(str::trim).filter(|c| !c.is_empty()) {
            self.cookies.add_cookie_str(cookie, &self.base_url);
        }
    }

    fn url(&self, path: &str) -> Result<reqwest::Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::new(format!("invalid request path {path}: {e}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url(&request.path)?;
        debug!(method = request.method.as_str(), url = %url, "sending request");

        let mut builder = self.client.request(request.method.into(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, path = %request.path, "request failed");
            if e.is_timeout() {
                TransportError::new(format!("request to {} timed out", request.path))
            } else {
                TransportError::new(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::new(format!("failed to read response body: {e}")))?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::Null)
        };

        debug!(status, path = %request.path, "received response");
        Ok(ApiResponse { status, body })
    }
}
