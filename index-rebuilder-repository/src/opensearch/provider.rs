//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchEngineProvider`
//! using the OpenSearch Rust crate.

use async_trait::async_trait;
use opensearch::{
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesGetAliasParts},
    params::Refresh,
    BulkParts, OpenSearch,
};
use serde_json::{json, Map, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::errors::SearchEngineError;
use crate::interfaces::SearchEngineProvider;
use crate::opensearch::bulk::classify_bulk_response;
use crate::types::BulkSummary;
use index_rebuilder_shared::Document;

/// OpenSearch provider implementation.
///
/// Wraps a single-node OpenSearch client and exposes the engine operations
/// the rebuild pipeline needs: index creation, bulk indexing, alias lookup,
/// and the atomic alias swap.
///
/// # Example
///
/// ```ignore
/// use index_rebuilder_repository::OpenSearchProvider;
///
/// let provider = OpenSearchProvider::new("http://localhost:9200").await?;
/// provider.ping().await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(SearchEngineError)` - If connection setup fails
    pub async fn new(url: &str) -> Result<Self, SearchEngineError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchEngineError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchEngineError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch provider");

        Ok(Self { client })
    }

    /// Build the create-index request body, omitting `Null` sections.
    fn create_index_body(mappings: &Value, settings: &Value) -> Value {
        let mut body = Map::new();
        if !mappings.is_null() {
            body.insert("mappings".to_string(), mappings.clone());
        }
        if !settings.is_null() {
            body.insert("settings".to_string(), settings.clone());
        }
        Value::Object(body)
    }

    /// Build the action list for an atomic alias swap.
    ///
    /// The add action binds the alias to the new index; the remove-index
    /// action, present only when there are old indices, unbinds and
    /// deletes them in the same engine call.
    fn alias_swap_actions(alias: &str, new_index: &str, old_indices: &[String]) -> Vec<Value> {
        let mut actions = vec![json!({ "add": { "index": new_index, "alias": alias } })];
        if !old_indices.is_empty() {
            actions.push(json!({ "remove_index": { "indices": old_indices } }));
        }
        actions
    }
}

#[async_trait]
impl SearchEngineProvider for OpenSearchProvider {
    async fn create_index(
        &self,
        index: &str,
        mappings: &Value,
        settings: &Value,
    ) -> Result<(), SearchEngineError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(Self::create_index_body(mappings, settings))
            .send()
            .await
            .map_err(|e| SearchEngineError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %index, status = %status, body = %error_body, "Create index request failed");
            return Err(SearchEngineError::index_creation(format!(
                "Create index failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(index = %index, "Index created");
        Ok(())
    }

    /// Submit one bulk request with immediate-refresh semantics.
    ///
    /// The whole batch is sent as a single `_bulk` call with `refresh=true`
    /// so documents are searchable before this returns. Per-item rejections
    /// are classified into the summary; only a transport-level or
    /// whole-request failure is an `Err`.
    async fn bulk_index(
        &self,
        index: &str,
        documents: &[Document],
    ) -> Result<BulkSummary, SearchEngineError> {
        if documents.is_empty() {
            return Ok(BulkSummary::clean(0));
        }

        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(documents.len() * 2);
        for doc in documents {
            body.push(json!({ "index": {} }).into());
            body.push(doc.clone().into());
        }

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .refresh(Refresh::True)
            .body(body)
            .send()
            .await
            .map_err(|e| SearchEngineError::bulk(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %index, status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchEngineError::bulk(format!(
                "Bulk failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchEngineError::parse(e.to_string()))?;

        Ok(classify_bulk_response(&response_body, documents.len()))
    }

    async fn get_alias_indices(&self, alias: &str) -> Result<Vec<String>, SearchEngineError> {
        let response = self
            .client
            .indices()
            .get_alias(IndicesGetAliasParts::Name(&[alias]))
            .send()
            .await
            .map_err(|e| SearchEngineError::alias(e.to_string()))?;

        let status = response.status_code();

        // 404 is the bootstrap case: the alias has never been bound.
        if status.as_u16() == 404 {
            debug!(alias = %alias, "Alias not bound yet");
            return Ok(Vec::new());
        }

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(alias = %alias, status = %status, body = %error_body, "Get alias request failed");
            return Err(SearchEngineError::alias(format!(
                "Get alias failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchEngineError::parse(e.to_string()))?;

        // The response is keyed by physical index name.
        let indices = body
            .as_object()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();

        Ok(indices)
    }

    async fn swap_alias(
        &self,
        alias: &str,
        new_index: &str,
        old_indices: &[String],
    ) -> Result<(), SearchEngineError> {
        let actions = Self::alias_swap_actions(alias, new_index, old_indices);

        let response = self
            .client
            .indices()
            .update_aliases()
            .body(json!({ "actions": actions }))
            .send()
            .await
            .map_err(|e| SearchEngineError::alias(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(alias = %alias, index = %new_index, status = %status, body = %error_body, "Update aliases request failed");
            return Err(SearchEngineError::alias(format!(
                "Update aliases failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(alias = %alias, index = %new_index, removed = ?old_indices, "Alias swapped");
        Ok(())
    }

    async fn ping(&self) -> Result<(), SearchEngineError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| SearchEngineError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            return Err(SearchEngineError::connection(format!(
                "Ping failed with status {}",
                status
            )));
        }

        Ok(())
    }
}
