//! Content retrieval.
//!
//! [`ContentAccessor`] is the public entry point:
//!
//! ```text
//! get(type, id, query) ──► CacheAsideStore (key: content_<type> + id)
//!                              └── miss ──► Transport: get /content/<type> id {$preview, ..query}
//!
//! list(type, query)    ──► Transport: get /content/<type> query
//! ```
//!
//! # Example
//!
//! ```ignore
//! use contentlayer::config::ContentConfig;
//! use contentlayer::content::ContentAccessor;
//!
//! let config = ContentConfig::new("https://cms.example.com/api").with_preview_content(true);
//! let accessor = ContentAccessor::from_config(&config)?;
//!
//! let article = accessor.get("article", 42u64, None).await?;
//! let again = accessor.get("article", 42u64, None).await?; // served from cache
//! let latest = accessor.list("article", None).await?;      // always fetched
//! ```

mod accessor;
mod error;
mod id;
mod query;

pub use accessor::{content_namespace, content_path, ContentAccessor};
pub use error::{ContentError, ContentResult};
pub use id::EntityId;
pub use query::{merge_preview, PREVIEW_PARAM};
