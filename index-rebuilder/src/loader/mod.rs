//! Loader module for the rebuild pipeline.
//!
//! Submits document batches to the new physical index using the engine's
//! bulk protocol and classifies the outcome.

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::errors::RebuildError;
use index_rebuilder_repository::{BulkSummary, SearchEngineProvider};
use index_rebuilder_shared::Document;

/// Loader that writes batches into one physical index.
///
/// The loader is responsible for:
/// - Submitting each batch as a single bulk request
/// - Logging the per-batch outcome, including per-item failure reasons
///
/// Partial acceptance within a batch is tolerated: accepted documents stay
/// indexed, rejected ones are logged and never retried or re-queued.
pub struct BulkLoader {
    provider: Arc<dyn SearchEngineProvider>,
    alias: String,
    index_name: String,
}

impl BulkLoader {
    /// Create a loader targeting `index_name` (built for `alias`).
    pub fn new(
        provider: Arc<dyn SearchEngineProvider>,
        alias: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            alias: alias.into(),
            index_name: index_name.into(),
        }
    }

    /// Submit one batch and classify the response.
    ///
    /// Synchronous from the driver's point of view: the driver does not
    /// advance its offset or fetch the next batch until this resolves. A
    /// transport-level failure is an error; per-item rejections are not.
    #[instrument(skip(self, documents), fields(count = documents.len()))]
    pub async fn submit(
        &self,
        offset: usize,
        documents: &[Document],
    ) -> Result<BulkSummary, RebuildError> {
        let summary = self
            .provider
            .bulk_index(&self.index_name, documents)
            .await
            .map_err(|e| {
                RebuildError::loader(format!(
                    "Bulk submission of {} documents failed: {}",
                    documents.len(),
                    e
                ))
            })?;

        if summary.is_clean() {
            info!(
                alias = %self.alias,
                index = %self.index_name,
                offset,
                count = documents.len(),
                "Batch bulk succeeded"
            );
        } else {
            let reasons: Vec<&str> = summary.failures.iter().map(|f| f.reason.as_str()).collect();
            error!(
                alias = %self.alias,
                index = %self.index_name,
                offset,
                count = documents.len(),
                accepted = summary.accepted,
                reasons = ?reasons,
                "Batch bulk reported item failures"
            );
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use index_rebuilder_repository::{BulkItemFailure, SearchEngineError};

    /// Mock engine provider for testing.
    struct MockEngineProvider {
        bulk_calls: AtomicUsize,
        item_failures: usize,
        fail_transport: bool,
    }

    impl MockEngineProvider {
        fn new() -> Self {
            Self {
                bulk_calls: AtomicUsize::new(0),
                item_failures: 0,
                fail_transport: false,
            }
        }

        fn with_item_failures(count: usize) -> Self {
            Self {
                item_failures: count,
                ..Self::new()
            }
        }

        fn with_transport_failure() -> Self {
            Self {
                fail_transport: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl SearchEngineProvider for MockEngineProvider {
        async fn create_index(
            &self,
            _index: &str,
            _mappings: &Value,
            _settings: &Value,
        ) -> Result<(), SearchEngineError> {
            Ok(())
        }

        async fn bulk_index(
            &self,
            _index: &str,
            documents: &[Document],
        ) -> Result<BulkSummary, SearchEngineError> {
            self.bulk_calls.fetch_add(1, Ordering::SeqCst);

            if self.fail_transport {
                return Err(SearchEngineError::bulk("connection reset"));
            }

            let failures = (0..self.item_failures.min(documents.len()))
                .map(|_| BulkItemFailure {
                    status: 400,
                    reason: "rejected".to_string(),
                })
                .collect::<Vec<_>>();

            Ok(BulkSummary {
                accepted: documents.len() - failures.len(),
                failures,
            })
        }

        async fn get_alias_indices(&self, _alias: &str) -> Result<Vec<String>, SearchEngineError> {
            Ok(Vec::new())
        }

        async fn swap_alias(
            &self,
            _alias: &str,
            _new_index: &str,
            _old_indices: &[String],
        ) -> Result<(), SearchEngineError> {
            Ok(())
        }

        async fn ping(&self) -> Result<(), SearchEngineError> {
            Ok(())
        }
    }

    fn docs(n: usize) -> Vec<Document> {
        (0..n).map(|i| json!({ "id": i })).collect()
    }

    #[tokio::test]
    async fn test_clean_submission() {
        let provider = Arc::new(MockEngineProvider::new());
        let loader = BulkLoader::new(provider.clone(), "products", "products-1");

        let summary = loader.submit(0, &docs(3)).await.unwrap();

        assert!(summary.is_clean());
        assert_eq!(summary.accepted, 3);
        assert_eq!(provider.bulk_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_item_failures_are_not_an_error() {
        let provider = Arc::new(MockEngineProvider::with_item_failures(2));
        let loader = BulkLoader::new(provider, "products", "products-1");

        let summary = loader.submit(10, &docs(10)).await.unwrap();

        assert_eq!(summary.accepted, 8);
        assert_eq!(summary.failures.len(), 2);
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_loader_error() {
        let provider = Arc::new(MockEngineProvider::with_transport_failure());
        let loader = BulkLoader::new(provider, "products", "products-1");

        let result = loader.submit(0, &docs(5)).await;

        assert!(matches!(result, Err(RebuildError::LoaderError(_))));
    }
}
