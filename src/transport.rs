//! HTTP transport seam.
//!
//! The admin client never talks to `reqwest` directly; it hands fully-formed
//! [`ApiRequest`]s to a [`Transport`]. Every request carries its own header
//! map, so nothing set for one call can leak into another.

use async_trait::async_trait;
use bytes::Bytes;
use metrics::counter;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("connection failed: {0}")]
    Connection(String),
}

impl TransportError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }
}

/// One outgoing request, addressed relative to the API base.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Executes a single request and reports the raw status and body.
///
/// Non-2xx statuses are not errors at this layer; only failing to obtain a
/// response at all is.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
    base: Url,
}

impl ReqwestTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let base = normalize_base(Url::parse(base_url)?);
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("aacnews-admin/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn url(&self, path: &str) -> Result<Url, TransportError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(TransportError::Url)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url(&request.path)?;
        let method = request.method.clone();
        debug!(%method, %url, "sending admin api request");

        let mut headers = request.headers;
        let mut req = self.client.request(request.method, url);
        if let Some(body) = request.body {
            if !headers.contains_key(CONTENT_TYPE) {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
            req = req.body(serde_json::to_vec(&body)?);
        }

        counter!("aacnews_admin_requests_total", "method" => method.to_string()).increment(1);
        let resp = match req.headers(headers).send().await {
            Ok(resp) => resp,
            Err(err) => {
                counter!("aacnews_admin_request_failures_total", "method" => method.to_string())
                    .increment(1);
                return Err(err.into());
            }
        };

        let status = resp.status();
        if !status.is_success() {
            counter!("aacnews_admin_request_failures_total", "method" => method.to_string())
                .increment(1);
        }
        let body = resp.bytes().await?;
        Ok(ApiResponse { status, body })
    }
}

/// Relative joins only append when the base path ends in `/`.
fn normalize_base(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.set_query(None);
    base
}
