//! # Index Rebuilder Repository
//!
//! This crate provides traits and implementations for talking to the search
//! engine. It includes definitions for errors, interfaces, physical index
//! naming, and a concrete implementation for OpenSearch.

pub mod errors;
pub mod interfaces;
pub mod naming;
pub mod opensearch;
pub mod types;

pub use errors::SearchEngineError;
pub use interfaces::SearchEngineProvider;
pub use naming::physical_index_name;
pub use opensearch::OpenSearchProvider;
pub use types::{BulkItemFailure, BulkSummary};
