//! Client code for eyerise.
//!
//! This crate provides the HTTP fetch pipeline that serves responses through
//! the expiring cache, shared by the server.

pub mod fetch;

pub use fetch::{CachedFetchClient, FetchConfig, FetchResponse, UrlError, canonicalize};
