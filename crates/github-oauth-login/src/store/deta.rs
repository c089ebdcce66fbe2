//! Deta-Base-compatible HTTP user store.
//!
//! Records live under `{api_url}/{project_id}/{base}/items`. The project key
//! authenticates every call through the `X-API-Key` header.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use url::Url;

use super::{UserStore, ensure_valid};
use crate::client::middleware;
use crate::config::{Config, api};
use crate::error::{StoreError, StoreResult};
use crate::models::UserProfile;

const API_KEY_HEADER: &str = "X-API-Key";

/// Response to a batch `PUT /items`.
#[derive(Debug, Deserialize)]
struct PutItemsResponse {
    #[serde(default)]
    processed: Option<ItemBatch>,
    #[serde(default)]
    failed: Option<ItemBatch>,
}

#[derive(Debug, Deserialize)]
struct ItemBatch {
    #[serde(default)]
    items: Vec<UserProfile>,
}

/// User store backed by a Deta Base.
#[derive(Clone)]
pub struct DetaUserStore {
    client: ClientWithMiddleware,
    project_key: String,
    items_url: Url,
}

impl DetaUserStore {
    /// Create a store for `base_name` in the project identified by `project_key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Misconfigured`] if the project key has no
    /// `<project_id>_` prefix or the API URL cannot hold path segments.
    pub fn new(
        project_key: &str,
        base_name: &str,
        api_url: &str,
        client_config: &Config,
    ) -> StoreResult<Self> {
        let project_id = project_id(project_key)?;

        let mut items_url = Url::parse(api_url)
            .map_err(|e| StoreError::Misconfigured(format!("invalid store URL: {e}")))?;
        items_url
            .path_segments_mut()
            .map_err(|()| StoreError::Misconfigured("store URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend([project_id, base_name, "items"]);

        let client = Client::builder()
            .user_agent(api::USER_AGENT)
            .timeout(client_config.request_timeout)
            .connect_timeout(client_config.connect_timeout)
            .build()?;

        Ok(Self {
            client: middleware::build(client, client_config.max_retries),
            project_key: project_key.to_string(),
            items_url,
        })
    }

    fn item_url(&self, key: &str) -> Url {
        let mut url = self.items_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(key);
        }
        url
    }
}

#[async_trait]
impl UserStore for DetaUserStore {
    async fn put(&self, user: UserProfile) -> StoreResult<UserProfile> {
        ensure_valid(&user)?;

        let body = serde_json::to_string(&serde_json::json!({ "items": [user] }))?;

        let response = self
            .client
            .put(self.items_url.as_str())
            .header(API_KEY_HEADER, &self.project_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(StoreError::Rejected { status: status.as_u16(), message: text });
        }

        let parsed: PutItemsResponse = serde_json::from_str(&text)?;
        let failed = parsed.failed.map_or(0, |b| b.items.len());

        parsed
            .processed
            .and_then(|b| b.items.into_iter().next())
            .ok_or_else(|| StoreError::Rejected {
                status: status.as_u16(),
                message: format!("record not processed ({failed} failed)"),
            })
    }

    async fn get(&self, key: &str) -> StoreResult<Option<UserProfile>> {
        let response = self
            .client
            .get(self.item_url(key).as_str())
            .header(API_KEY_HEADER, &self.project_key)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let text = response.text().await?;
        if !status.is_success() {
            return Err(StoreError::Rejected { status: status.as_u16(), message: text });
        }

        Ok(Some(serde_json::from_str(&text)?))
    }
}

impl std::fmt::Debug for DetaUserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetaUserStore").field("items_url", &self.items_url.as_str()).finish()
    }
}

/// The project id is everything before the first `_` of the project key.
fn project_id(project_key: &str) -> StoreResult<&str> {
    match project_key.split_once('_') {
        Some((id, secret)) if !id.is_empty() && !secret.is_empty() => Ok(id),
        _ => Err(StoreError::Misconfigured(
            "project key must look like <project_id>_<secret>".to_string(),
        )),
    }
}
