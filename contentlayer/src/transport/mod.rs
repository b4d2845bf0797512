//! Content transport abstraction.
//!
//! The transport performs the actual network request for the accessor. It is
//! treated as an opaque async call taking a verb, a path, an optional entity
//! id and optional query parameters:
//!
//! ```text
//! request(Get, "/content/article", Some("42"), {"$preview": true})
//!     ──► GET {base_url}/content/article/42?$preview=true
//! ```
//!
//! Timeouts are configured on the transport; the accessor does not retry.
//!
//! # Example
//!
//! ```ignore
//! use contentlayer::transport::{HttpTransport, Transport, Verb};
//!
//! let transport = HttpTransport::new("https://cms.example.com/api")?;
//! let article = transport
//!     .request(Verb::Get, "/content/article", Some("42"), None)
//!     .await?;
//! ```

mod http;
mod types;

pub use http::{HttpTransport, Transport, DEFAULT_TIMEOUT_SECS};
pub use types::{QueryParams, TransportError, Verb};

#[cfg(test)]
pub use http::tests::{MockTransport, RecordedCall};
