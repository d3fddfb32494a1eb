//! TTL and bypass policy over a [`ResponseStore`].

use chrono::{DateTime, TimeDelta, Utc};

use super::entry::{CacheEntry, CacheRequest, CachedResponse};
use super::store::ResponseStore;
use crate::Error;

/// Default time-to-live (24 hours).
pub const DEFAULT_TTL_SECONDS: u64 = 24 * 60 * 60;

/// Response cache that evicts entries older than its TTL on read and skips
/// lookups for bypassed URLs.
///
/// Reads are not atomic with respect to eviction: two concurrent lookups of
/// the same expired key may both remove it.
#[derive(Debug)]
pub struct ExpiringCache<S> {
    store: S,
    ttl_seconds: u64,
    ignored_substrings: Vec<String>,
}

impl<S: ResponseStore> ExpiringCache<S> {
    /// Wrap `store` with the default TTL and an empty bypass list.
    pub fn new(store: S) -> Self {
        Self { store, ttl_seconds: DEFAULT_TTL_SECONDS, ignored_substrings: Vec::new() }
    }

    pub fn with_ttl_seconds(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    pub fn with_ignored_substrings(mut self, ignored: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ignored_substrings = ignored.into_iter().map(Into::into).collect();
        self
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    pub fn set_ttl_seconds(&mut self, ttl_seconds: u64) {
        self.ttl_seconds = ttl_seconds;
    }

    pub fn ignored_substrings(&self) -> &[String] {
        &self.ignored_substrings
    }

    pub fn set_ignored_substrings(&mut self, ignored: Vec<String>) {
        self.ignored_substrings = ignored;
    }

    /// Append one substring to the bypass list.
    pub fn ignore(&mut self, substring: impl Into<String>) {
        self.ignored_substrings.push(substring.into());
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Whether lookups for `url` skip the cache. Case-sensitive containment.
    pub fn is_bypassed(&self, url: &str) -> bool {
        self.ignored_substrings.iter().any(|s| url.contains(s.as_str()))
    }

    /// Whether `entry` is older than the TTL at `now`.
    ///
    /// An entry aged exactly the TTL is still fresh.
    pub fn is_expired(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.stored_at) > self.ttl()
    }

    fn ttl(&self) -> TimeDelta {
        i64::try_from(self.ttl_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }

    /// Look up the response cached for `request`.
    ///
    /// Returns `Ok(None)` when the URL is bypassed, when nothing is stored, or
    /// when the stored entry expired (it is evicted first). Store errors are
    /// returned unchanged.
    pub async fn lookup(&self, request: &CacheRequest) -> Result<Option<CachedResponse>, Error> {
        let url = request.url.as_str();
        if self.is_bypassed(url) {
            tracing::debug!(url, "cache bypassed");
            return Ok(None);
        }

        let key = request.cache_key();
        let Some(entry) = self.store.get(&key).await? else {
            tracing::debug!(url, "cache miss");
            return Ok(None);
        };

        if self.is_expired(&entry, Utc::now()) {
            tracing::debug!(url, stored_at = %entry.stored_at, ttl_seconds = self.ttl_seconds, "cache entry expired");
            self.store.remove(&key).await?;
            return Ok(None);
        }

        tracing::debug!(url, "cache hit");
        Ok(Some(entry.response))
    }

    /// Store `response` for `request`, stamped with the current time.
    ///
    /// Overwrites any previous entry. The bypass list is not consulted.
    pub async fn store(&self, request: &CacheRequest, response: CachedResponse) -> Result<(), Error> {
        let entry = CacheEntry { response, stored_at: Utc::now() };
        tracing::debug!(url = request.url.as_str(), "cache store");
        self.store.set(&request.cache_key(), entry).await
    }
}
