//! http_get tool implementation.
//!
//! Fetches a URL through the expiring cache.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use eyerise_client::{CachedFetchClient, FetchResponse};
use eyerise_core::{Error, ResponseStore};

use super::json_result;

/// Input parameters for http_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HttpGetParams {
    /// The URL to fetch. A missing scheme defaults to https.
    pub url: String,
}

/// Output structure for http_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HttpGetOutput {
    /// The canonical URL requested.
    pub url: String,
    /// The final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response headers in the order received.
    pub headers: Vec<(String, String)>,
    /// Response body decoded as UTF-8 (lossy).
    pub body: String,
    /// Whether the response was served from the cache.
    pub from_cache: bool,
    /// Time taken in milliseconds.
    pub fetch_ms: u64,
}

impl From<FetchResponse> for HttpGetOutput {
    fn from(fetched: FetchResponse) -> Self {
        Self {
            url: fetched.url.to_string(),
            final_url: fetched.response.url,
            status: fetched.response.status,
            headers: fetched.response.headers,
            body: String::from_utf8_lossy(&fetched.response.body).into_owned(),
            from_cache: fetched.from_cache,
            fetch_ms: fetched.fetch_ms,
        }
    }
}

/// Implementation of the http_get tool.
pub async fn http_get_impl<S: ResponseStore>(
    client: &CachedFetchClient<S>, params: HttpGetParams,
) -> Result<CallToolResult, McpError> {
    if params.url.trim().is_empty() {
        return Err(Error::InvalidInput("url cannot be empty".into()).into());
    }

    let fetched = client.get(&params.url).await?;
    tracing::debug!(url = %fetched.url, from_cache = fetched.from_cache, "http_get served");

    json_result(&HttpGetOutput::from(fetched))
}
