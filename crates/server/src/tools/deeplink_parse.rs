//! deeplink_parse tool implementation.
//!
//! Decomposes a deep link without any network or cache access.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use eyerise_core::{DeepLinkComponents, Error};

use super::json_result;

/// Parameters for the deeplink_parse tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeeplinkParseParams {
    /// The deep link to decompose, e.g. `myapp://host/path?id=42`.
    pub url: String,
}

/// Implementation of the deeplink_parse tool.
pub fn deeplink_parse_impl(params: DeeplinkParseParams) -> Result<CallToolResult, McpError> {
    if params.url.trim().is_empty() {
        return Err(Error::InvalidInput("url cannot be empty".into()).into());
    }

    let components = DeepLinkComponents::parse_str(&params.url)
        .ok_or_else(|| Error::InvalidInput(format!("not a deep link (needs scheme, host and path): {}", params.url)))?;

    json_result(&components)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::text_of;

    #[test]
    fn test_parse_ok() {
        let params = DeeplinkParseParams { url: "myapp://host/path?a=1&b=x&a=2&flag".into() };
        let result = deeplink_parse_impl(params).unwrap();
        let output: DeepLinkComponents = serde_json::from_str(&text_of(&result)).unwrap();

        assert_eq!(output.scheme, "myapp");
        assert_eq!(output.host, "host");
        assert_eq!(output.path.as_deref(), Some("/path"));
        assert_eq!(output.parameters.get_int("a"), Some(1));
        assert!(output.parameters.exists("flag"));
        assert_eq!(output.parameters.len(), 4);
    }

    #[test]
    fn test_parse_opaque_is_invalid_input() {
        let params = DeeplinkParseParams { url: "scheme:opaque".into() };
        let err = deeplink_parse_impl(params).unwrap_err();
        assert_eq!(err.code.0, -32602);
    }

    #[test]
    fn test_parse_empty() {
        let params = DeeplinkParseParams { url: "  ".into() };
        assert!(deeplink_parse_impl(params).is_err());
    }
}
