use aacnews_api_types::{Payload, ResourceId};
use serde_json::Value;

use super::{AdminClient, Resource};
use crate::error::AdminError;

impl AdminClient {
    pub async fn get_types(&self) -> Result<Value, AdminError> {
        self.list(Resource::Type).await
    }

    pub async fn get_type(&self, id: impl Into<ResourceId>) -> Result<Value, AdminError> {
        self.get(Resource::Type, &id.into()).await
    }

    pub async fn save_type(&self, payload: &Payload) -> Result<Value, AdminError> {
        self.save(Resource::Type, payload).await
    }

    pub async fn remove_type(&self, id: impl Into<ResourceId>) -> Result<Value, AdminError> {
        self.remove(Resource::Type, &id.into()).await
    }
}
