//! Deep link decomposition.
//!
//! A deep link such as `myapp://host/path?item=42&tab=reviews` is split into
//! its scheme, host, path and the query items in their original order.
//! Parsing never fails loudly: anything that is not a hierarchical URL with a
//! host yields `None`.

mod parameters;

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use url::Url;

pub use parameters::{DeepLinkParameter, DeepLinkParameters};

/// Components of a deep link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DeepLinkComponents {
    pub scheme: String,
    pub host: String,
    pub path: Option<String>,
    pub parameters: DeepLinkParameters,
}

impl DeepLinkComponents {
    /// Decompose `url` into its deep link components.
    ///
    /// Returns `None` for opaque URLs (`mailto:x`, `scheme:opaque`) and for
    /// URLs with an empty host.
    pub fn parse(url: &Url) -> Option<Self> {
        if url.cannot_be_a_base() {
            return None;
        }

        let host = url.host_str().filter(|h| !h.is_empty())?;
        let parameters = url.query().map(parse_query).unwrap_or_default();

        Some(Self {
            scheme: url.scheme().to_string(),
            host: host.to_string(),
            path: Some(decode(url.path())),
            parameters,
        })
    }

    /// Parse `input` as a URL, then decompose it.
    ///
    /// Relative references and malformed text yield `None`.
    pub fn parse_str(input: &str) -> Option<Self> {
        let url = Url::parse(input.trim()).ok()?;
        Self::parse(&url)
    }
}

/// Split a raw query string into ordered items.
///
/// `+` is kept literally; only percent escapes are decoded.
fn parse_query(query: &str) -> DeepLinkParameters {
    query
        .split('&')
        .filter(|item| !item.is_empty())
        .map(|item| match item.split_once('=') {
            Some((name, value)) => (decode(name), Some(decode(value))),
            None => (decode(item), None),
        })
        .collect()
}

fn decode(component: &str) -> String {
    percent_decode_str(component).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let link = DeepLinkComponents::parse_str("myapp://host/path?param1=123&param2=abc").unwrap();
        assert_eq!(link.scheme, "myapp");
        assert_eq!(link.host, "host");
        assert_eq!(link.path.as_deref(), Some("/path"));
        assert_eq!(link.parameters.get_int("param1"), Some(123));
        assert_eq!(link.parameters.get_string("param2"), Some("abc"));
    }

    #[test]
    fn test_parse_duplicate_names() {
        let link = DeepLinkComponents::parse_str("scheme://host/path?a=1&b=x&a=2").unwrap();
        assert_eq!(link.parameters.get_int("a"), Some(1));
        assert_eq!(link.parameters.get_string("b"), Some("x"));
        assert!(link.parameters.exists("a"));
        assert!(!link.parameters.exists("c"));
        assert_eq!(link.parameters.len(), 3);
    }

    #[test]
    fn test_parse_opaque_url() {
        assert!(DeepLinkComponents::parse_str("scheme:opaque").is_none());
        assert!(DeepLinkComponents::parse_str("mailto:someone@example.com").is_none());
    }

    #[test]
    fn test_parse_relative_reference() {
        assert!(DeepLinkComponents::parse_str("/just/a/path?x=1").is_none());
        assert!(DeepLinkComponents::parse_str("").is_none());
    }

    #[test]
    fn test_parse_empty_host() {
        assert!(DeepLinkComponents::parse_str("myapp:///path").is_none());
    }

    #[test]
    fn test_parse_empty_query() {
        let link = DeepLinkComponents::parse_str("myapp://host/path").unwrap();
        assert!(link.parameters.is_empty());

        let link = DeepLinkComponents::parse_str("myapp://host/path?").unwrap();
        assert!(link.parameters.is_empty());
    }

    #[test]
    fn test_parse_value_less_item() {
        let link = DeepLinkComponents::parse_str("myapp://host/path?debug&level=3").unwrap();
        assert!(link.parameters.exists("debug"));
        assert_eq!(link.parameters.get_string("debug"), None);
        assert_eq!(link.parameters.get_int("level"), Some(3));
    }

    #[test]
    fn test_parse_empty_value_is_not_missing() {
        let link = DeepLinkComponents::parse_str("myapp://host/path?q=").unwrap();
        assert_eq!(link.parameters.get_string("q"), Some(""));
    }

    #[test]
    fn test_parse_percent_decoding() {
        let link = DeepLinkComponents::parse_str("myapp://host/path?name=John%20Doe&op=a+b&eq=x%3Dy").unwrap();
        assert_eq!(link.parameters.get_string("name"), Some("John Doe"));
        assert_eq!(link.parameters.get_string("op"), Some("a+b"));
        assert_eq!(link.parameters.get_string("eq"), Some("x=y"));
    }

    #[test]
    fn test_parse_value_with_raw_equals() {
        let link = DeepLinkComponents::parse_str("myapp://host/path?token=abc==").unwrap();
        assert_eq!(link.parameters.get_string("token"), Some("abc=="));
    }

    #[test]
    fn test_parse_preserves_order() {
        let link = DeepLinkComponents::parse_str("myapp://host/p?z=1&a=2&m=3").unwrap();
        let names: Vec<_> = link.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_parse_host_without_path() {
        let link = DeepLinkComponents::parse_str("myapp://host").unwrap();
        assert_eq!(link.host, "host");
        assert_eq!(link.path.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_http_url() {
        let url = Url::parse("https://example.com/products/42?ref=mail").unwrap();
        let link = DeepLinkComponents::parse(&url).unwrap();
        assert_eq!(link.scheme, "https");
        assert_eq!(link.host, "example.com");
        assert_eq!(link.path.as_deref(), Some("/products/42"));
        assert_eq!(link.parameters.get_string("ref"), Some("mail"));
    }

    #[test]
    fn test_parse_ignores_fragment() {
        let link = DeepLinkComponents::parse_str("myapp://host/path?a=1#section").unwrap();
        assert_eq!(link.parameters.get_string("a"), Some("1"));
        assert_eq!(link.parameters.len(), 1);
    }
}
