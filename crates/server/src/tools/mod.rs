//! MCP tool implementations.
//!
//! This module contains all tools exposed by the eyerise server.

use std::sync::Arc;

use eyerise_client::CachedFetchClient;
use eyerise_core::ResponseStore;

pub mod cache;
pub mod deeplink_parse;
pub mod http_get;

pub use cache::{CacheLookupParams, lookup_impl};
pub use deeplink_parse::{DeeplinkParseParams, deeplink_parse_impl};
pub use http_get::{HttpGetParams, http_get_impl};

/// Fetch client over a type-erased store, as held by the server.
pub type SharedClient = CachedFetchClient<Arc<dyn ResponseStore>>;

/// Serialize a tool output as pretty JSON text content.
pub(crate) fn json_result<T: serde::Serialize>(output: &T) -> Result<rmcp::model::CallToolResult, rmcp::ErrorData> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| eyerise_core::Error::InvalidInput(format!("Failed to serialize output: {e}")))?;
    Ok(rmcp::model::CallToolResult::success(vec![rmcp::model::Content::text(json)]))
}

#[cfg(test)]
pub(crate) fn text_of(result: &rmcp::model::CallToolResult) -> String {
    let content_val = serde_json::to_value(&result.content[0]).unwrap();
    content_val
        .get("text")
        .and_then(|v| v.as_str())
        .expect("Expected text field in content")
        .to_string()
}
