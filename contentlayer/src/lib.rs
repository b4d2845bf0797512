//! contentlayer - Cached content retrieval
//!
//! This library fetches content entities from a remote content service and
//! keeps single-entity reads in a cache-aside store, so repeated and
//! concurrent reads of the same entity cost at most one network request.
//!
//! - [`content`]: the [`ContentAccessor`](content::ContentAccessor) (`get` / `list`)
//! - [`cache`]: the generic [`CacheAsideStore`](cache::CacheAsideStore)
//! - [`transport`]: the [`Transport`](transport::Transport) trait and its HTTP implementation
//! - [`config`]: runtime and persisted configuration

pub mod cache;
pub mod config;
pub mod content;
pub mod transport;

pub use content::{ContentAccessor, ContentError, EntityId};
pub use transport::{QueryParams, Transport, TransportError};
