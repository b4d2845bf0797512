//! Transport request and error types.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

/// Query parameters sent with a content request.
pub type QueryParams = Map<String, Value>;

/// Request verb understood by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Read a resource or a collection.
    Get,
}

impl Verb {
    /// Lowercase verb name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "get",
        }
    }

    /// Matching HTTP method.
    pub fn method(&self) -> reqwest::Method {
        match self {
            Verb::Get => reqwest::Method::GET,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by a transport.
///
/// `Clone` so one failed load can be delivered to every caller waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be sent or its response could not be read.
    #[error("Request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body was not valid JSON.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be created.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}
