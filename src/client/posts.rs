use aacnews_api_types::{HistoryEntry, Payload, ResourceId};
use reqwest::Method;
use serde_json::Value;

use super::{AdminClient, Resource, path_segment};
use crate::error::AdminError;
use crate::transport::ApiRequest;

impl AdminClient {
    pub async fn get_posts(&self) -> Result<Value, AdminError> {
        self.list(Resource::Post).await
    }

    pub async fn get_posts_published(&self) -> Result<Value, AdminError> {
        self.dispatch(ApiRequest::new(Method::GET, "posts/published"))
            .await
    }

    pub async fn get_post(&self, id: impl Into<ResourceId>) -> Result<Value, AdminError> {
        self.get(Resource::Post, &id.into()).await
    }

    pub async fn save_post(&self, payload: &Payload) -> Result<Value, AdminError> {
        self.save(Resource::Post, payload).await
    }

    pub async fn remove_post(&self, id: impl Into<ResourceId>) -> Result<Value, AdminError> {
        self.remove(Resource::Post, &id.into()).await
    }

    /// Full version history of a post, oldest first as the server orders it.
    pub async fn get_history_post(
        &self,
        post_id: impl Into<ResourceId>,
    ) -> Result<Value, AdminError> {
        let path = format!("posts/history/{}", path_segment(&post_id.into())?);
        self.dispatch(ApiRequest::new(Method::GET, path)).await
    }

    pub async fn get_history_post_by_version(
        &self,
        post_id: impl Into<ResourceId>,
        version: impl Into<ResourceId>,
    ) -> Result<Value, AdminError> {
        let path = format!(
            "posts/history/{}/{}",
            path_segment(&post_id.into())?,
            path_segment(&version.into())?
        );
        self.dispatch(ApiRequest::new(Method::GET, path)).await
    }

    /// Typed view over [`AdminClient::get_history_post`].
    pub async fn history_entries(
        &self,
        post_id: impl Into<ResourceId>,
    ) -> Result<Vec<HistoryEntry>, AdminError> {
        let body = self.get_history_post(post_id).await?;
        Ok(serde_json::from_value(body)?)
    }
}
