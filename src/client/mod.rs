//! Admin API client.
//!
//! Every operation reads the current credential, builds its own header map,
//! and funnels the transport result through [`AdminClient::dispatch`], so all
//! of them resolve to the raw response body or fail with the untouched error
//! body.

mod crosspost;
mod newsletters;
mod posts;
mod types;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use aacnews_api_types::{Payload, ResourceId};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Method;
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::Value;
use tracing::warn;

use crate::credentials::CredentialProvider;
use crate::error::AdminError;
use crate::transport::{ApiRequest, Transport};

pub use crosspost::{CrossPostOutcome, CrossPostSettings, flatten_columns};

/// Header carrying the access token on every authorized request.
pub const ACCESS_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-access-token");

/// Escape set for a single path segment: everything but RFC 3986 unreserved.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Server-managed entity with list/get/save/delete operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Type,
    Post,
    Newsletter,
}

impl Resource {
    /// Collection root path, relative to the API base.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Type => "types",
            Self::Post => "posts",
            Self::Newsletter => "newsletters",
        }
    }

    pub fn item(self, id: &ResourceId) -> Result<String, AdminError> {
        Ok(format!("{}/{}", self.collection(), path_segment(id)?))
    }
}

/// Encode an identifier as exactly one path segment.
///
/// Empty and dot identifiers would address a different resource once the URL
/// is resolved, so they are refused.
pub(crate) fn path_segment(id: &ResourceId) -> Result<String, AdminError> {
    match id.as_str() {
        "" | "." | ".." => Err(AdminError::InvalidIdentifier(id.to_string())),
        raw => Ok(utf8_percent_encode(raw, SEGMENT).to_string()),
    }
}

#[derive(Clone)]
pub struct AdminClient {
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialProvider>,
    cross_post: CrossPostSettings,
}

impl AdminClient {
    pub fn new(transport: Arc<dyn Transport>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            transport,
            credentials,
            cross_post: CrossPostSettings::default(),
        }
    }

    #[must_use]
    pub fn with_cross_post(mut self, settings: CrossPostSettings) -> Self {
        self.cross_post = settings;
        self
    }

    pub fn cross_post_settings(&self) -> &CrossPostSettings {
        &self.cross_post
    }

    /// GET the collection root of `resource`.
    pub async fn list(&self, resource: Resource) -> Result<Value, AdminError> {
        self.dispatch(ApiRequest::new(Method::GET, resource.collection()))
            .await
    }

    pub async fn get(&self, resource: Resource, id: &ResourceId) -> Result<Value, AdminError> {
        self.dispatch(ApiRequest::new(Method::GET, resource.item(id)?))
            .await
    }

    /// Create or update: `PUT {collection}/{id}` when the payload carries an
    /// identifier, otherwise `POST {collection}`.
    pub async fn save(&self, resource: Resource, payload: &Payload) -> Result<Value, AdminError> {
        let body = Value::Object(payload.clone());
        let request = match ResourceId::from_payload(payload) {
            Some(id) => ApiRequest::new(Method::PUT, resource.item(&id)?),
            None => ApiRequest::new(Method::POST, resource.collection()),
        };
        self.dispatch(request.with_body(body)).await
    }

    pub async fn remove(&self, resource: Resource, id: &ResourceId) -> Result<Value, AdminError> {
        self.dispatch(ApiRequest::new(Method::DELETE, resource.item(id)?))
            .await
    }

    /// Attach the credential, execute, and adapt the response.
    pub(crate) async fn dispatch(&self, request: ApiRequest) -> Result<Value, AdminError> {
        let request = self.authorize(request)?;
        let response = self.transport.execute(request).await?;
        let body = decode_body(&response.body);
        if response.status.is_success() {
            Ok(body)
        } else {
            warn!(status = %response.status, "admin api request rejected");
            Err(AdminError::server(response.status, body))
        }
    }

    fn authorize(&self, mut request: ApiRequest) -> Result<ApiRequest, AdminError> {
        if let Some(credential) = self.credentials.credential() {
            let mut value = HeaderValue::from_str(credential.token())
                .map_err(|_| AdminError::InvalidCredential)?;
            value.set_sensitive(true);
            request.headers.insert(ACCESS_TOKEN_HEADER, value);
        }
        Ok(request)
    }
}

/// JSON bodies decode as JSON; anything else (HTML templates, plain-text
/// errors) is kept as a string. An empty body is `null`.
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
