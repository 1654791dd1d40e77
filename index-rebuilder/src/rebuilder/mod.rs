//! Rebuild driver for blue-green index rebuilds.
//!
//! Coordinates index creation, the ingestion loop, the validation gate, and
//! the atomic alias cutover.

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::errors::RebuildError;
use crate::loader::BulkLoader;
use crate::source::BatchSource;
use crate::validate::Validator;
use index_rebuilder_repository::{physical_index_name, SearchEngineProvider};
use index_rebuilder_shared::{IngestStats, RebuildConfig};

/// Driver for blue-green index rebuilds.
///
/// A rebuild creates a fresh physical index named after the alias, streams
/// batches from the source into it, optionally validates the result, and
/// atomically repoints the alias at the new index while deleting the old
/// ones. Readers resolving the alias see either the pre-run index set or
/// the new index, never an intermediate state.
///
/// Concurrent rebuilds of *different* aliases are independent and safe.
/// Rebuilds of the *same* alias are not guarded here; callers must
/// serialize them, otherwise two runs can race on the cutover.
pub struct IndexRebuilder {
    provider: Arc<dyn SearchEngineProvider>,
}

impl IndexRebuilder {
    /// Create a rebuilder using the given engine provider.
    pub fn new(provider: Arc<dyn SearchEngineProvider>) -> Self {
        Self { provider }
    }

    /// Run a full rebuild for `config.alias`.
    ///
    /// Returns `true` iff the new physical index was created, fully
    /// ingested, validated (when a validator is supplied), and bound as the
    /// alias's sole target. Every failure is logged with context and
    /// converted; nothing propagates past this boundary. Callers needing
    /// finer-grained outcomes must inspect the log stream.
    #[instrument(skip_all, fields(alias = %config.alias))]
    pub async fn rebuild(
        &self,
        config: &RebuildConfig,
        source: &dyn BatchSource,
        validator: Option<&dyn Validator>,
    ) -> bool {
        match self.execute(config, source, validator).await {
            Ok(_) => true,
            Err(e) => {
                error!(alias = %config.alias, error = %e, "Rebuild failed");
                false
            }
        }
    }

    /// Run the rebuild phases, stopping at the first failure.
    async fn execute(
        &self,
        config: &RebuildConfig,
        source: &dyn BatchSource,
        validator: Option<&dyn Validator>,
    ) -> Result<IngestStats, RebuildError> {
        if config.alias.is_empty() {
            return Err(RebuildError::config("alias must not be empty"));
        }

        let index_name = physical_index_name(&config.alias);

        self.provider
            .create_index(&index_name, &config.mappings, &config.settings)
            .await?;
        info!(alias = %config.alias, index = %index_name, "Created index");

        let stats = self.ingest(config, &index_name, source).await?;

        if let Some(validator) = validator {
            match validator.validate(config).await {
                Ok(true) => {
                    info!(alias = %config.alias, index = %index_name, "Validation succeeded");
                }
                Ok(false) => {
                    error!(alias = %config.alias, index = %index_name, "Validation failed");
                    return Err(RebuildError::validation(
                        "validator rejected the rebuilt index",
                    ));
                }
                Err(e) => {
                    error!(alias = %config.alias, index = %index_name, error = %e, "Validation failed");
                    return Err(RebuildError::validation(format!("validator error: {}", e)));
                }
            }
        }

        self.cutover(&config.alias, &index_name).await?;

        Ok(stats)
    }

    /// Stream batches from the source into the new index.
    ///
    /// The loop is iterative and strictly sequential: exactly one batch is
    /// in flight at any time, and the next fetch starts only after the
    /// previous bulk submission has resolved. A fetch error ends ingestion
    /// the same way an empty batch does; the run then proceeds to
    /// validation and cutover with whatever was indexed.
    async fn ingest(
        &self,
        config: &RebuildConfig,
        index_name: &str,
        source: &dyn BatchSource,
    ) -> Result<IngestStats, RebuildError> {
        let loader = BulkLoader::new(Arc::clone(&self.provider), &config.alias, index_name);
        let mut stats = IngestStats::default();
        let mut offset = 0usize;

        loop {
            let batch = match source.fetch(offset, config).await {
                Ok(batch) => batch,
                Err(e) => {
                    error!(alias = %config.alias, index = %index_name, offset, error = %e, "Batch fetch failed");
                    break;
                }
            };

            if batch.is_empty() {
                break;
            }

            info!(
                alias = %config.alias,
                index = %index_name,
                offset,
                count = batch.len(),
                "Fetched batch"
            );

            let summary = loader.submit(offset, &batch).await?;
            stats.record_batch(batch.len(), !summary.is_clean());

            // Offset advances by the requested batch size even when items
            // were rejected; failed items are not re-fetched.
            offset += batch.len();
        }

        info!(
            alias = %config.alias,
            index = %index_name,
            documents = stats.documents,
            batches = stats.batches,
            batch_failures = stats.batch_failures,
            "Ingestion complete"
        );

        Ok(stats)
    }

    /// Atomically repoint the alias at the new index.
    ///
    /// The previous binding is read first (an unbound alias reads as the
    /// empty set); the swap itself is a single engine call that binds the
    /// alias to the new index and deletes the old ones. A failed swap
    /// leaves the old binding authoritative.
    async fn cutover(&self, alias: &str, new_index: &str) -> Result<(), RebuildError> {
        let old_indices = self
            .provider
            .get_alias_indices(alias)
            .await
            .map_err(|e| RebuildError::cutover(format!("alias lookup failed: {}", e)))?;

        self.provider
            .swap_alias(alias, new_index, &old_indices)
            .await
            .map_err(|e| RebuildError::cutover(format!("alias update failed: {}", e)))?;

        info!(alias = %alias, index = %new_index, removed = ?old_indices, "Aliases updated");
        Ok(())
    }
}

/// Run a blue-green rebuild for `config.alias`.
///
/// This is the pipeline's public entry point. It creates a fresh physical
/// index, streams batches from `source` into it, runs the optional
/// `validator`, and atomically repoints the alias on success.
///
/// Returns `true` iff the new index was created, fully ingested, validated
/// (when applicable), and bound as the alias's sole target. All failures
/// are logged and converted to `false`; the caller observes the boolean and
/// the log stream only. Rebuilds of the same alias must be serialized by
/// the caller.
pub async fn rebuild_index(
    provider: Arc<dyn SearchEngineProvider>,
    config: &RebuildConfig,
    source: &dyn BatchSource,
    validator: Option<&dyn Validator>,
) -> bool {
    IndexRebuilder::new(provider)
        .rebuild(config, source, validator)
        .await
}
