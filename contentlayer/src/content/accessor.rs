//! Cached content accessor.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::error::{ContentError, ContentResult};
use super::id::EntityId;
use super::query::merge_preview;
use crate::cache::{CacheAsideStore, CacheKey, CacheStats};
use crate::config::ContentConfig;
use crate::transport::{HttpTransport, QueryParams, Transport, TransportError, Verb};

/// Retrieves content entities, caching single-entity reads.
///
/// - [`get`](Self::get) goes through the cache-aside store, keyed by
///   `content_<type>` and the entity id. Concurrent gets for the same entity
///   share one transport call.
/// - [`list`](Self::list) always calls the transport.
///
/// Each accessor owns its own store; nothing is shared between instances.
pub struct ContentAccessor {
    /// The transport used for every request.
    transport: Arc<dyn Transport>,

    /// Cache of single-entity reads.
    store: CacheAsideStore<CacheKey, Value, TransportError>,

    /// Sent as `$preview` with every get.
    preview_content: bool,
}

impl ContentAccessor {
    /// Create a new accessor.
    ///
    /// # Arguments
    ///
    /// * `transport` - The transport used for every request
    /// * `preview_content` - Value of the `$preview` flag sent with gets
    pub fn new(transport: Arc<dyn Transport>, preview_content: bool) -> Self {
        Self {
            transport,
            store: CacheAsideStore::new(),
            preview_content,
        }
    }

    /// Create an accessor backed by an [`HttpTransport`].
    pub fn from_config(config: &ContentConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::new(Arc::new(transport), config.preview_content))
    }

    /// Get one entity, from the cache when possible.
    ///
    /// On a miss the transport is called with `get`, `/content/<type>`, the id
    /// and the caller's query merged with `$preview`.
    ///
    /// # Errors
    ///
    /// - [`ContentError::EmptyContentType`] / [`ContentError::EmptyId`] for
    ///   empty arguments, before any cache or transport access
    /// - [`ContentError::Transport`] when the fetch fails; nothing is cached
    pub async fn get(
        &self,
        content_type: &str,
        id: impl Into<EntityId>,
        query: Option<&QueryParams>,
    ) -> ContentResult<Value> {
        if content_type.is_empty() {
            return Err(ContentError::EmptyContentType);
        }
        let id = id.into();
        if id.is_empty() {
            return Err(ContentError::EmptyId {
                content_type: content_type.to_string(),
            });
        }

        let key = CacheKey::new(content_namespace(content_type), id.as_str());
        let transport = Arc::clone(&self.transport);
        let path = content_path(content_type);
        let params = merge_preview(self.preview_content, query);
        let id = id.into_string();

        let value = self
            .store
            .get_or_load(key, move || async move {
                transport
                    .request(Verb::Get, &path, Some(id.as_str()), Some(&params))
                    .await
            })
            .await?;
        Ok(value)
    }

    /// List entities of a type. Never cached.
    ///
    /// The query is passed through unchanged; `$preview` is not added.
    ///
    /// # Errors
    ///
    /// - [`ContentError::EmptyContentType`] for an empty type
    /// - [`ContentError::Transport`] when the fetch fails
    pub async fn list(
        &self,
        content_type: &str,
        query: Option<&QueryParams>,
    ) -> ContentResult<Value> {
        if content_type.is_empty() {
            return Err(ContentError::EmptyContentType);
        }

        let path = content_path(content_type);
        debug!(content_type, "Listing content, bypassing cache");
        let value = self.transport.request(Verb::Get, &path, None, query).await?;
        Ok(value)
    }

    /// Cache counters for this accessor.
    pub fn cache_stats(&self) -> CacheStats {
        self.store.stats()
    }

    /// Whether gets request preview content.
    pub fn preview_content(&self) -> bool {
        self.preview_content
    }
}

/// Cache namespace for a content type: `content_<type>`.
pub fn content_namespace(content_type: &str) -> String {
    format!("content_{}", content_type)
}

/// Transport path for a content type: `/content/<type>`.
pub fn content_path(content_type: &str) -> String {
    format!("/content/{}", content_type)
}
