//! cache_lookup tool implementation.
//!
//! Reports what the expiring cache would serve for a GET of a URL. A miss is
//! a normal result, not an error.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use eyerise_client::canonicalize;
use eyerise_core::{CacheRequest, Error, ExpiringCache, ResponseStore};

use crate::tools::json_result;

/// Parameters for the cache_lookup tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheLookupParams {
    /// URL whose cached GET response to look up.
    pub url: String,
}

/// Output from the cache_lookup tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheLookupOutput {
    /// The canonical URL looked up.
    pub url: String,
    /// Whether the URL matches the bypass list.
    pub bypassed: bool,
    /// Whether a fresh response is cached.
    pub hit: bool,
    /// Status of the cached response.
    pub status: Option<u16>,
    /// Final URL of the cached response.
    pub final_url: Option<String>,
    /// Size of the cached body in bytes.
    pub body_bytes: Option<usize>,
}

/// Implementation of the cache_lookup tool.
pub async fn lookup_impl<S: ResponseStore>(
    cache: &ExpiringCache<S>, params: CacheLookupParams,
) -> Result<CallToolResult, McpError> {
    let url = canonicalize(&params.url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
    let bypassed = cache.is_bypassed(url.as_str());
    let request = CacheRequest::get(url);

    let cached = cache.lookup(&request).await?;

    let output = CacheLookupOutput {
        url: request.url.to_string(),
        bypassed,
        hit: cached.is_some(),
        status: cached.as_ref().map(|r| r.status),
        final_url: cached.as_ref().map(|r| r.url.clone()),
        body_bytes: cached.as_ref().map(|r| r.body.len()),
    };

    json_result(&output)
}
