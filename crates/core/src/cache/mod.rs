//! Expiring response cache.
//!
//! [`ExpiringCache`] decorates any [`ResponseStore`] with two independent
//! policies:
//!
//! - a bypass list: lookups for URLs containing any listed substring always
//!   miss and never touch the store
//! - a rolling TTL: entries older than the TTL are evicted on read instead of
//!   being served
//!
//! Two stores are provided: [`MemoryStore`] and the SQLite-backed
//! [`SqliteStore`] (WAL mode, versioned migrations).

pub mod entry;
pub mod expiring;
pub mod hash;
pub mod migrations;
pub mod sqlite;
pub mod store;

pub use crate::Error;

pub use entry::{CacheEntry, CacheRequest, CachedResponse};
pub use expiring::{DEFAULT_TTL_SECONDS, ExpiringCache};
pub use sqlite::SqliteStore;
pub use store::{MemoryStore, ResponseStore};
