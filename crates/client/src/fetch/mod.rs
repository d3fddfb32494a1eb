//! HTTP fetch pipeline served through the expiring cache.
//!
//! ### Flow
//! - Canonicalize the input URL (default `https`, drop fragment)
//! - Look the GET request up in the [`ExpiringCache`]; bypassed URLs and
//!   expired entries fall through to the network
//! - Fetch with reqwest, enforcing timeout, redirect and body size limits
//! - Store successful (2xx) responses; other statuses are returned uncached

pub mod url;

use std::time::{Duration, Instant};

use reqwest::{Client, header};

pub use self::url::{UrlError, canonicalize};

use eyerise_core::{AppConfig, CacheRequest, CachedResponse, Error, ExpiringCache, ResponseStore};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "eyerise/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "eyerise/0.1".to_string(),
            max_bytes: 5 * 1024 * 1024,
            timeout: Duration::from_millis(20000),
            max_redirects: 5,
        }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            ..Self::default()
        }
    }
}

/// Response from a fetch, either replayed from cache or fresh.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The canonical URL requested
    pub url: ::url::Url,
    /// Status, headers and body
    pub response: CachedResponse,
    /// Whether the response came from the cache
    pub from_cache: bool,
    /// Time taken in milliseconds
    pub fetch_ms: u64,
}

/// HTTP client whose GETs go through an [`ExpiringCache`].
pub struct CachedFetchClient<S> {
    http: Client,
    config: FetchConfig,
    cache: ExpiringCache<S>,
}

impl<S: ResponseStore> CachedFetchClient<S> {
    /// Create a new fetch client with the given configuration and cache.
    pub fn new(config: FetchConfig, cache: ExpiringCache<S>) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config, cache })
    }

    /// GET a URL, serving it from the cache when a fresh entry exists.
    pub async fn get(&self, url_str: &str) -> Result<FetchResponse, Error> {
        let start = Instant::now();
        let url = canonicalize(url_str).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        let request = CacheRequest::get(url.clone());

        if let Some(response) = self.cache.lookup(&request).await? {
            return Ok(FetchResponse { url, response, from_cache: true, fetch_ms: elapsed_ms(start) });
        }

        let response = self.fetch(&url).await?;

        if (200..300).contains(&response.status) {
            self.cache.store(&request, response.clone()).await?;
        } else {
            tracing::debug!(url = url.as_str(), status = response.status, "not caching non-success response");
        }

        Ok(FetchResponse { url, response, from_cache: false, fetch_ms: elapsed_ms(start) })
    }

    /// Fetch from the network, bypassing the cache entirely.
    async fn fetch(&self, url: &::url::Url) -> Result<CachedResponse, Error> {
        let start = Instant::now();

        let response = self.http.get(url.as_str()).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::FetchTimeout(format!("{url}: {e}"))
            } else {
                Error::HttpError(format!("network error: {e}"))
            }
        })?;

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers = header_pairs(response.headers());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::HttpError(format!("failed to read response: {e}")))?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", bytes.len(), self.config.max_bytes)));
        }

        tracing::debug!(
            "fetched {} -> {} in {}ms ({} bytes)",
            url,
            final_url,
            elapsed_ms(start),
            bytes.len()
        );

        Ok(CachedResponse { url: final_url, status, headers, body: bytes.to_vec() })
    }

    /// Get reference to the cache.
    pub fn cache(&self) -> &ExpiringCache<S> {
        &self.cache
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

fn header_pairs(headers: &header::HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| (name.as_str().to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned()))
        .collect()
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyerise_core::MemoryStore;

    fn cached(body: &str) -> CachedResponse {
        CachedResponse {
            url: "https://example.invalid/page".into(),
            status: 200,
            headers: vec![("content-type".into(), "text/plain".into())],
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, "eyerise/0.1");
        assert_eq!(config.max_bytes, 5 * 1024 * 1024);
        assert_eq!(config.timeout, Duration::from_millis(20000));
        assert_eq!(config.max_redirects, 5);
    }

    #[test]
    fn test_fetch_config_from_app_config() {
        let app = AppConfig { user_agent: "tester/2".into(), max_bytes: 1024, timeout_ms: 1500, ..Default::default() };
        let config = FetchConfig::from(&app);
        assert_eq!(config.user_agent, "tester/2");
        assert_eq!(config.max_bytes, 1024);
        assert_eq!(config.timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_header_pairs_preserves_repeats() {
        let mut headers = header::HeaderMap::new();
        headers.append(header::SET_COOKIE, "a=1".parse().unwrap());
        headers.append(header::SET_COOKIE, "b=2".parse().unwrap());
        let pairs = header_pairs(&headers);
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|(k, _)| k == "set-cookie"));
    }

    #[tokio::test]
    async fn test_client_new() {
        let client = CachedFetchClient::new(FetchConfig::default(), ExpiringCache::new(MemoryStore::new()));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_get_serves_fresh_entry_without_network() {
        let cache = ExpiringCache::new(MemoryStore::new());
        let request = CacheRequest::get(canonicalize("https://example.invalid/page").unwrap());
        cache.store(&request, cached("hello")).await.unwrap();

        let client = CachedFetchClient::new(FetchConfig::default(), cache).unwrap();
        let result = client.get("example.invalid/page#frag").await.unwrap();

        assert!(result.from_cache);
        assert_eq!(result.response.body, b"hello");
        assert_eq!(result.url.as_str(), "https://example.invalid/page");
    }

    #[tokio::test]
    async fn test_get_rejects_invalid_url() {
        let client = CachedFetchClient::new(FetchConfig::default(), ExpiringCache::new(MemoryStore::new())).unwrap();
        assert!(matches!(client.get("").await, Err(Error::InvalidUrl(_))));
        assert!(matches!(client.get("ftp://example.com").await, Err(Error::InvalidUrl(_))));
    }
}
