//! Post-ingestion validation gate.
//!
//! An optional, caller-supplied check that runs after ingestion completes
//! and before the alias is touched.

use async_trait::async_trait;

use crate::errors::RebuildError;
use index_rebuilder_shared::RebuildConfig;

/// Caller-supplied check over the freshly built index.
///
/// When no validator is supplied the run is unconditionally treated as
/// valid. `Ok(false)` or an error halts the run before the cutover: the
/// alias keeps its previous binding and the new physical index is left in
/// place for operational tooling to inspect or remove.
#[async_trait]
pub trait Validator: Send + Sync {
    /// Decide whether the rebuilt index may go live.
    async fn validate(&self, config: &RebuildConfig) -> Result<bool, RebuildError>;
}
