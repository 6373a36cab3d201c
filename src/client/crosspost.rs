use aacnews_api_types::{ColumnGroup, CrossPostRequest, Payload};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, trace};

use super::AdminClient;
use crate::error::AdminError;
use crate::transport::ApiRequest;

const DIIGO_PATH: &str = "diigo/posts";
const SLACK_PATH: &str = "slack/posts";

/// Toggles for the external cross-posting targets.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CrossPostSettings {
    /// Off by default: Slack is notified when a post is created.
    pub slack_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CrossPostOutcome {
    Published(Value),
    Disabled { flattened: usize },
}

/// Flatten column groups into one ordered list of posts, tagging every post
/// with the `{id, name}` of the group it came from.
pub fn flatten_columns(groups: &[ColumnGroup]) -> Vec<Payload> {
    let mut posts = Vec::new();
    for group in groups {
        let tag = Value::from(group.descriptor());
        for post in group.columns.iter().flatten() {
            let mut post = post.clone();
            post.insert("type".to_owned(), tag.clone());
            let entry = Value::Object(post.clone());
            trace!(post = %entry, "flattened cross-post entry");
            posts.push(post);
        }
    }
    posts
}

impl AdminClient {
    /// Forward the flattened posts to the Diigo bookmarking bridge.
    pub async fn add_post_diigo(&self, groups: &[ColumnGroup]) -> Result<Value, AdminError> {
        let posts = flatten_columns(groups);
        self.post_cross_post(DIIGO_PATH, posts).await
    }

    /// Forward the flattened posts to Slack, unless that target is disabled,
    /// in which case this resolves immediately without a request.
    pub async fn add_post_slack(
        &self,
        groups: &[ColumnGroup],
    ) -> Result<CrossPostOutcome, AdminError> {
        let posts = flatten_columns(groups);
        if !self.cross_post.slack_enabled {
            info!(
                flattened = posts.len(),
                "slack cross-post disabled; skipping"
            );
            return Ok(CrossPostOutcome::Disabled {
                flattened: posts.len(),
            });
        }
        self.post_cross_post(SLACK_PATH, posts)
            .await
            .map(CrossPostOutcome::Published)
    }

    async fn post_cross_post(&self, path: &str, posts: Vec<Payload>) -> Result<Value, AdminError> {
        let body = serde_json::to_value(CrossPostRequest { posts })?;
        self.dispatch(ApiRequest::new(Method::POST, path).with_body(body))
            .await
    }
}
