//! OpenSearch implementation of the search engine provider.
//!
//! This module provides a concrete implementation of `SearchEngineProvider`
//! using the OpenSearch Rust crate.

mod bulk;
mod provider;

pub use provider::OpenSearchProvider;
