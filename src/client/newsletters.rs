use aacnews_api_types::{Payload, ResourceId, SendNewsletterRequest};
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde_json::Value;
use tracing::debug;

use super::{AdminClient, Resource};
use crate::error::AdminError;
use crate::transport::ApiRequest;

/// Content type the mailing endpoint expects on `send`.
const SEND_CONTENT_TYPE: &str = "text/html";

impl AdminClient {
    pub async fn get_newsletters(&self) -> Result<Value, AdminError> {
        self.list(Resource::Newsletter).await
    }

    pub async fn get_newsletter(&self, id: impl Into<ResourceId>) -> Result<Value, AdminError> {
        self.get(Resource::Newsletter, &id.into()).await
    }

    pub async fn save_newsletter(&self, payload: &Payload) -> Result<Value, AdminError> {
        self.save(Resource::Newsletter, payload).await
    }

    pub async fn remove_newsletter(&self, id: impl Into<ResourceId>) -> Result<Value, AdminError> {
        self.remove(Resource::Newsletter, &id.into()).await
    }

    /// HTML template used as the starting point of a newsletter.
    pub async fn get_template(&self) -> Result<Value, AdminError> {
        debug!("fetching newsletter template");
        self.dispatch(ApiRequest::new(Method::GET, "template")).await
    }

    /// Hand a rendered newsletter to the mailing pipeline.
    pub async fn send_newsletter(&self, html: &str, title: &str) -> Result<Value, AdminError> {
        let body = serde_json::to_value(SendNewsletterRequest {
            html: html.to_owned(),
            title: title.to_owned(),
        })?;
        let request = ApiRequest::new(Method::POST, "send")
            .with_header(CONTENT_TYPE, HeaderValue::from_static(SEND_CONTENT_TYPE))
            .with_body(body);
        self.dispatch(request).await
    }
}
