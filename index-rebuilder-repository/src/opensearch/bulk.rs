//! Bulk response classification.
//!
//! The engine's bulk endpoint reports one outcome per submitted operation.
//! This module turns that response body into a `BulkSummary` the pipeline
//! can act on without knowing the wire format.

use serde_json::Value;

use crate::types::{BulkItemFailure, BulkSummary};

/// Classify a bulk response body into per-item successes and failures.
///
/// `item_count` is the number of documents that were submitted; the engine
/// echoes one entry per document under `items`. When the top-level `errors`
/// flag is unset the whole batch was accepted and the items are not walked.
/// Entries without an `error` object count as accepted, so a malformed body
/// can only over-report acceptance, never invent failures.
pub(crate) fn classify_bulk_response(body: &Value, item_count: usize) -> BulkSummary {
    if !body["errors"].as_bool().unwrap_or(false) {
        return BulkSummary::clean(item_count);
    }

    let mut failures = Vec::new();
    if let Some(items) = body["items"].as_array() {
        for item in items {
            // Each entry is keyed by the operation type, e.g. {"index": {...}}.
            let outcome = item
                .as_object()
                .and_then(|ops| ops.values().next())
                .unwrap_or(&Value::Null);
            if let Some(error) = outcome.get("error") {
                failures.push(BulkItemFailure {
                    status: outcome["status"].as_u64().unwrap_or(0) as u16,
                    reason: error["reason"]
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| error.to_string()),
                });
            }
        }
    }

    BulkSummary {
        accepted: item_count.saturating_sub(failures.len()),
        failures,
    }
}
