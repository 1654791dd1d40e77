//! Search engine provider trait definition.
//!
//! This module defines the abstract interface for the engine operations the
//! rebuild pipeline needs, allowing for different backend implementations
//! (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchEngineError;
use crate::types::BulkSummary;
use index_rebuilder_shared::Document;

/// Abstracts the underlying search engine (OpenSearch, Elasticsearch, etc.).
///
/// Implementations are injected into the rebuild driver as a shared handle,
/// which keeps the engine connection out of the pipeline's state and makes
/// mock implementations straightforward in tests.
///
/// All methods return `Result<T, SearchEngineError>`. Per-item bulk failures
/// are not errors at this level; they are classified into the returned
/// `BulkSummary` so the caller can tolerate partial acceptance.
#[async_trait]
pub trait SearchEngineProvider: Send + Sync {
    /// Create a new physical index.
    ///
    /// # Arguments
    ///
    /// * `index` - The physical index name
    /// * `mappings` - Field-type schema, passed through opaquely; `Null` means none
    /// * `settings` - Engine-level index settings, passed through opaquely; `Null` means none
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was created
    /// * `Err(SearchEngineError)` - If the request fails or the engine rejects it
    async fn create_index(
        &self,
        index: &str,
        mappings: &Value,
        settings: &Value,
    ) -> Result<(), SearchEngineError>;

    /// Index a batch of documents with one bulk request.
    ///
    /// The request uses immediate-refresh semantics: newly written documents
    /// are searchable before the call returns. Per-item outcomes are
    /// classified into the returned summary; documents that succeeded stay
    /// indexed even when others in the same batch were rejected.
    ///
    /// # Arguments
    ///
    /// * `index` - The physical index the batch is addressed at
    /// * `documents` - The documents to index
    ///
    /// # Returns
    ///
    /// * `Ok(BulkSummary)` - Accepted count plus per-item failure reasons
    /// * `Err(SearchEngineError)` - If the bulk request itself fails
    async fn bulk_index(
        &self,
        index: &str,
        documents: &[Document],
    ) -> Result<BulkSummary, SearchEngineError>;

    /// Look up the physical indices currently bound to an alias.
    ///
    /// An alias that does not exist yet reads as the empty set (the
    /// first-run bootstrap case), not an error.
    async fn get_alias_indices(&self, alias: &str) -> Result<Vec<String>, SearchEngineError>;

    /// Atomically repoint an alias at a new physical index.
    ///
    /// Issues a single multi-action alias update: an add action binding
    /// `alias` to `new_index`, plus (only when `old_indices` is non-empty)
    /// a remove-index action that unbinds and deletes every old index in the
    /// same engine call. Readers observe either the old binding or the new
    /// one, never an intermediate state.
    async fn swap_alias(
        &self,
        alias: &str,
        new_index: &str,
        old_indices: &[String],
    ) -> Result<(), SearchEngineError>;

    /// Probe engine connectivity.
    ///
    /// Used by the wiring layer before a rebuild is attempted.
    async fn ping(&self) -> Result<(), SearchEngineError>;
}
