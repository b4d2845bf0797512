//! Query composition for single-entity requests.

use serde_json::Value;

use crate::transport::QueryParams;

/// Query parameter carrying the preview flag.
pub const PREVIEW_PARAM: &str = "$preview";

/// Merge the configured preview flag with caller query fields.
///
/// `$preview` is inserted first and the caller's fields second, so a field
/// supplied by the caller always wins, including an explicit `$preview`.
pub fn merge_preview(preview: bool, query: Option<&QueryParams>) -> QueryParams {
    let mut merged = QueryParams::new();
    merged.insert(PREVIEW_PARAM.to_string(), Value::Bool(preview));
    if let Some(query) = query {
        for (key, value) in query {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
