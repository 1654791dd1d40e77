//! Response types for search engine operations.

/// One rejected item from a bulk request.
///
/// Carries the engine-reported status code and reason for the rejection.
/// Which document the failure belongs to is not tracked; the pipeline logs
/// reasons and moves on rather than retrying individual items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItemFailure {
    /// HTTP-style status the engine reported for the item.
    pub status: u16,
    /// The engine-reported failure reason.
    pub reason: String,
}

/// Classification of one bulk response.
///
/// `accepted + failures.len()` equals the number of documents submitted.
/// A summary with failures is not an error: accepted documents remain
/// indexed and the batch is never rolled back or retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkSummary {
    /// Number of documents the engine accepted.
    pub accepted: usize,
    /// Per-item failures, in response order.
    pub failures: Vec<BulkItemFailure>,
}

impl BulkSummary {
    /// A summary in which every submitted document was accepted.
    pub fn clean(accepted: usize) -> Self {
        Self {
            accepted,
            failures: Vec::new(),
        }
    }

    /// Whether every submitted document was accepted.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
