//! Core types and shared functionality for eyerise.
//!
//! This crate provides:
//! - Deep link decomposition into scheme, host, path and ordered parameters
//! - An expiring response cache over pluggable stores (memory, SQLite)
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod deeplink;
pub mod error;

pub use cache::{CacheEntry, CacheRequest, CachedResponse, ExpiringCache, MemoryStore, ResponseStore, SqliteStore};
pub use config::{AppConfig, ConfigError};
pub use deeplink::{DeepLinkComponents, DeepLinkParameters};
pub use error::Error;
