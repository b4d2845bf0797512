//! Composite cache keys.
//!
//! A [`CacheKey`] pairs a namespace with an entity identifier. The two parts
//! are kept as separate fields, so `("content_a", "b_1")` and
//! `("content_a_b", "1")` are distinct keys even though their concatenations
//! would be equal.

use std::fmt;

/// Cache key made of a namespace and an entity identifier.
///
/// The display form is `{namespace}:{id}` and is only used in logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    namespace: String,
    id: String,
}

impl CacheKey {
    /// Create a new cache key.
    ///
    /// # Arguments
    ///
    /// * `namespace` - Logical partition of the key space (e.g. `content_article`)
    /// * `id` - Entity identifier within the namespace
    pub fn new(namespace: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            id: id.into(),
        }
    }

    /// Namespace part of the key.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Identifier part of the key.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.id)
    }
}
