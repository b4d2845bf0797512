//! Cache-aside storage with request coalescing.
//!
//! # Architecture
//!
//! ```text
//! caller ──► CacheAsideStore::get_or_load(key, loader)
//!                 │
//!                 ├── Resolved   ──► clone of stored value (no load)
//!                 ├── Loading    ──► await the shared in-flight load
//!                 └── (absent)   ──► insert Loading, run loader
//!                                      ├── Ok  ──► Resolved
//!                                      └── Err ──► entry removed
//! ```
//!
//! The store is generic over key, value and error types. Domain-specific key
//! construction lives with the callers (see [`crate::content`]).
//!
//! # Example
//!
//! ```ignore
//! use contentlayer::cache::{CacheAsideStore, CacheKey};
//!
//! let store: CacheAsideStore<CacheKey, String, String> = CacheAsideStore::new();
//! let key = CacheKey::new("content_article", "42");
//!
//! let value = store
//!     .get_or_load(key, || async { Ok("fetched".to_string()) })
//!     .await?;
//! ```

mod key;
mod store;
mod traits;

pub use key::CacheKey;
pub use store::CacheAsideStore;
pub use traits::{BoxFuture, CacheStats};
