//! Cache-related MCP tools.

pub mod lookup;

pub use lookup::{CacheLookupParams, lookup_impl};
