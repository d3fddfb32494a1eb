//! URL canonicalization so equivalent inputs share one cache key.

use url::Url;

/// Error type for URL canonicalization failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Canonicalize user input into a fetchable URL.
///
/// - surrounding whitespace is trimmed
/// - a missing scheme defaults to `https://`
/// - only `http` and `https` are accepted
/// - the fragment is dropped (never sent, never part of the cache key)
/// - the query string is kept byte for byte, since its order can matter
///
/// Host lowercasing and default-port removal come from the `url` parser for
/// these special schemes.
pub fn canonicalize(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let candidate =
        if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };

    let mut url = Url::parse(&candidate).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlError::UnsupportedScheme(url.scheme().to_string()));
    }

    url.set_fragment(None);
    Ok(url)
}
