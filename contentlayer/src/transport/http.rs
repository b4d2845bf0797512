//! Transport abstraction and its HTTP implementation.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use super::types::{QueryParams, TransportError, Verb};
use crate::cache::BoxFuture;
use crate::config::ContentConfig;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Trait for content transport operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock transports in tests. It is dyn-compatible so accessors
/// can hold an `Arc<dyn Transport>`.
pub trait Transport: Send + Sync {
    /// Performs a content request.
    ///
    /// # Arguments
    ///
    /// * `verb` - The request verb
    /// * `path` - Resource path, e.g. `/content/article`
    /// * `id` - Entity identifier, absent for collection requests
    /// * `params` - Query parameters, if any
    ///
    /// # Returns
    ///
    /// The decoded response body or an error.
    fn request<'a>(
        &'a self,
        verb: Verb,
        path: &'a str,
        id: Option<&'a str>,
        params: Option<&'a QueryParams>,
    ) -> BoxFuture<'a, Result<Value, TransportError>>;
}

/// HTTP transport using reqwest.
///
/// Builds `{base_url}{path}[/{id}]`, appends the query parameters and decodes
/// the JSON response body.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a new transport with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new transport with a custom timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Creates a transport from content configuration.
    pub fn from_config(config: &ContentConfig) -> Result<Self, TransportError> {
        Self::with_timeout(config.base_url.clone(), config.timeout)
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full request URL.
    fn build_url(
        &self,
        path: &str,
        id: Option<&str>,
        params: Option<&QueryParams>,
    ) -> Result<Url, TransportError> {
        let raw = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let mut url =
            Url::parse(&raw).map_err(|e| TransportError::InvalidUrl(format!("{}: {}", raw, e)))?;

        if let Some(id) = id {
            url.path_segments_mut()
                .map_err(|_| TransportError::InvalidUrl(format!("{} cannot be a base", raw)))?
                .push(id);
        }

        let pairs: Vec<(&str, String)> = params
            .into_iter()
            .flat_map(|p| p.iter())
            .filter_map(|(k, v)| query_value(v).map(|v| (k.as_str(), v)))
            .collect();
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (k, v) in &pairs {
                query.append_pair(k, v);
            }
        }

        Ok(url)
    }
}

/// Flatten a JSON query value to its wire form.
///
/// Strings are sent as-is, `null` is omitted and everything else is sent as
/// compact JSON text (`true`, `3`, `["a","b"]`).
fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl Transport for HttpTransport {
    fn request<'a>(
        &'a self,
        verb: Verb,
        path: &'a str,
        id: Option<&'a str>,
        params: Option<&'a QueryParams>,
    ) -> BoxFuture<'a, Result<Value, TransportError>> {
        Box::pin(async move {
            let url = self.build_url(path, id, params)?;
            debug!(verb = %verb, url = %url, "Sending content request");

            let response = self
                .client
                .request(verb.method(), url.clone())
                .header(ACCEPT, "application/json")
                .send()
                .await
                .map_err(|e| TransportError::Request(e.to_string()))?;

            // Check HTTP status
            let status = response.status();
            if !status.is_success() {
                return Err(TransportError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| TransportError::Request(format!("Failed to read response: {}", e)))?;

            serde_json::from_slice(&body).map_err(|e| TransportError::Decode(e.to_string()))
        })
    }
}
