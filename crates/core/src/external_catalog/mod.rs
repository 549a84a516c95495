//! Canonical title resolution against external metadata catalogs.
//!
//! The curation pipeline only needs one thing from a catalog: the
//! human-readable title for a movie or series id. Lookups are fallible
//! and callers are expected to degrade to a local label on any error.

mod cinemeta;

pub use cinemeta::{CinemetaClient, CinemetaConfig, CinemetaMeta};

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::stream::ContentType;

/// Errors that can occur when resolving a title.
#[derive(Debug, Error)]
pub enum TitleLookupError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Resource not found (404), or found without a usable title.
    #[error("Title not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The lookup did not finish in time.
    #[error("Lookup timed out after {0:?}")]
    Timeout(Duration),

    /// Client not configured.
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Resolves a canonical title for a content id.
#[async_trait]
pub trait TitleResolver: Send + Sync {
    /// Short identifier used in logs and metrics.
    fn name(&self) -> &str;

    /// Look up the canonical title for `id` (e.g. `tt0111161`).
    async fn resolve_title(
        &self,
        content_type: ContentType,
        id: &str,
    ) -> Result<String, TitleLookupError>;
}
