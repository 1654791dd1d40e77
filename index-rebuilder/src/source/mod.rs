//! Batch sources for the rebuild pipeline.
//!
//! A batch source produces the documents to index, one offset-addressed
//! slice at a time. The driver fetches strictly sequentially: the next batch
//! is requested only after the previous one has been submitted.

use async_trait::async_trait;

use crate::errors::RebuildError;
use index_rebuilder_shared::{Document, RebuildConfig};

/// Caller-supplied producer of document batches.
///
/// `offset` is the count of documents submitted so far; it advances by the
/// full size of each returned batch, whether or not the engine accepted
/// every item. An empty batch signals exhaustion and ends ingestion. An
/// error also ends ingestion; it is logged with offset context but does not
/// abort the run.
#[async_trait]
pub trait BatchSource: Send + Sync {
    /// Fetch the next slice of documents starting at `offset`.
    async fn fetch(
        &self,
        offset: usize,
        config: &RebuildConfig,
    ) -> Result<Vec<Document>, RebuildError>;
}

/// Batch source serving a pre-collected document set in fixed-size pages.
///
/// Useful for tests and for small rebuilds where the full document set is
/// already in memory.
pub struct InMemorySource {
    documents: Vec<Document>,
    batch_size: usize,
}

impl InMemorySource {
    /// Create a source paging `documents` by `batch_size`.
    pub fn new(documents: Vec<Document>, batch_size: usize) -> Self {
        Self {
            documents,
            // A zero batch size would never make progress.
            batch_size: batch_size.max(1),
        }
    }
}

#[async_trait]
impl BatchSource for InMemorySource {
    async fn fetch(
        &self,
        offset: usize,
        _config: &RebuildConfig,
    ) -> Result<Vec<Document>, RebuildError> {
        if offset >= self.documents.len() {
            return Ok(Vec::new());
        }
        let end = (offset + self.batch_size).min(self.documents.len());
        Ok(self.documents[offset..end].to_vec())
    }
}
