//! Cinemeta (Stremio's public metadata addon) client.
//!
//! No API key is needed. Only the `meta` endpoint is used.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{TitleLookupError, TitleResolver};
use crate::stream::ContentType;

/// Cinemeta client configuration (`[cinemeta]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CinemetaConfig {
    /// Base URL (default: https://v3-cinemeta.strem.io).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Lookup timeout in seconds (default: 5).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://v3-cinemeta.strem.io".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for CinemetaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CinemetaConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// The subset of a Cinemeta meta object the curator uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CinemetaMeta {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
}

impl CinemetaMeta {
    /// `name`, falling back to `originalName`; blank values are ignored.
    pub fn title(&self) -> Option<&str> {
        [self.name.as_deref(), self.original_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct MetaResponse {
    #[serde(default)]
    meta: Option<CinemetaMeta>,
}

/// Cinemeta API client.
pub struct CinemetaClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl CinemetaClient {
    /// Create a new Cinemeta client.
    pub fn new(config: CinemetaConfig) -> Result<Self, TitleLookupError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(TitleLookupError::NotConfigured(
                "Cinemeta base URL is required".to_string(),
            ));
        }

        let timeout = config.timeout();
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    fn meta_url(&self, content_type: ContentType, id: &str) -> String {
        format!(
            "{}/meta/{}/{}.json",
            self.base_url,
            content_type.as_str(),
            urlencoding::encode(id)
        )
    }

    /// Fetch the meta object for `id`.
    pub async fn get_meta(
        &self,
        content_type: ContentType,
        id: &str,
    ) -> Result<CinemetaMeta, TitleLookupError> {
        let url = self.meta_url(content_type, id);

        debug!("Cinemeta get meta: type={}, id={}", content_type, id);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                TitleLookupError::Timeout(self.timeout)
            } else {
                TitleLookupError::HttpError(e)
            }
        })?;

        let status = response.status();
        if status == 404 {
            return Err(TitleLookupError::NotFound(format!("{} {}", content_type, id)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TitleLookupError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: MetaResponse = response.json().await.map_err(|e| {
            TitleLookupError::ParseError(format!("Failed to parse meta response: {}", e))
        })?;

        body.meta
            .ok_or_else(|| TitleLookupError::NotFound(format!("{} {}", content_type, id)))
    }
}

#[async_trait]
impl TitleResolver for CinemetaClient {
    fn name(&self) -> &str {
        "cinemeta"
    }

    async fn resolve_title(
        &self,
        content_type: ContentType,
        id: &str,
    ) -> Result<String, TitleLookupError> {
        let meta = self.get_meta(content_type, id).await?;
        meta.title()
            .map(str::to_string)
            .ok_or_else(|| TitleLookupError::NotFound(format!("no title for {}", id)))
    }
}
