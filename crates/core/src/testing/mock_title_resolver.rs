//! Mock title resolver for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::external_catalog::{TitleLookupError, TitleResolver};
use crate::stream::ContentType;

/// A recorded title lookup for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedLookup {
    pub content_type: ContentType,
    pub id: String,
}

/// Mock implementation of the TitleResolver trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable titles per id
/// - Track lookups for assertions
/// - Simulate failures and slow responses
///
/// # Example
///
/// ```rust,ignore
/// use autostream_core::testing::MockTitleResolver;
///
/// let resolver = MockTitleResolver::new();
/// resolver.add_title("tt0111161", "The Shawshank Redemption").await;
///
/// let title = resolver.resolve_title(ContentType::Movie, "tt0111161").await?;
/// ```
#[derive(Debug)]
pub struct MockTitleResolver {
    /// Titles by id.
    titles: Arc<RwLock<HashMap<String, String>>>,
    /// Recorded lookups.
    lookups: Arc<RwLock<Vec<RecordedLookup>>>,
    /// If set, the next lookup will fail with this error.
    next_error: Arc<RwLock<Option<TitleLookupError>>>,
    /// If set, every lookup sleeps this long before answering.
    delay: Arc<RwLock<Option<Duration>>>,
}

impl Default for MockTitleResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTitleResolver {
    /// Create a new mock resolver that knows no titles.
    pub fn new() -> Self {
        Self {
            titles: Arc::new(RwLock::new(HashMap::new())),
            lookups: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            delay: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a mock resolver with one known title.
    pub async fn with_title(id: &str, title: &str) -> Self {
        let resolver = Self::new();
        resolver.add_title(id, title).await;
        resolver
    }

    /// Register the title for an id.
    pub async fn add_title(&self, id: &str, title: &str) {
        self.titles
            .write()
            .await
            .insert(id.to_string(), title.to_string());
    }

    /// Get all recorded lookups.
    pub async fn recorded_lookups(&self) -> Vec<RecordedLookup> {
        self.lookups.read().await.clone()
    }

    /// Get the number of lookups performed.
    pub async fn lookup_count(&self) -> usize {
        self.lookups.read().await.len()
    }

    /// Configure the next lookup to fail with the given error.
    pub async fn set_next_error(&self, error: TitleLookupError) {
        *self.next_error.write().await = Some(error);
    }

    /// Delay every lookup, e.g. longer than a caller's timeout.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }
}

#[async_trait]
impl TitleResolver for MockTitleResolver {
    fn name(&self) -> &str {
        "mock"
    }

    async fn resolve_title(
        &self,
        content_type: ContentType,
        id: &str,
    ) -> Result<String, TitleLookupError> {
        self.lookups.write().await.push(RecordedLookup {
            content_type,
            id: id.to_string(),
        });

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        self.titles
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| TitleLookupError::NotFound(id.to_string()))
    }
}
