//! Per-run configuration for an index rebuild.
//!
//! This module defines the immutable descriptor a caller hands to the
//! pipeline for one rebuild run.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A document to be indexed.
///
/// The pipeline never inspects document contents; documents are handed to the
/// engine's bulk protocol as-is.
pub type Document = Value;

/// Immutable configuration for a single rebuild run.
///
/// The `alias` is the stable, caller-facing logical index name. Each run
/// builds a fresh physical index derived from it and repoints the alias on
/// success. `mappings` and `settings` are passed through to the engine
/// opaquely; `Value::Null` means "none".
///
/// The config is read-only for the duration of the run and carries no
/// transport parameters; the engine connection is injected separately.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RebuildConfig {
    /// The logical index name the rebuild targets.
    pub alias: String,
    /// Field-type schema for the new physical index, opaque to the pipeline.
    #[serde(default)]
    pub mappings: Value,
    /// Engine-level index settings, opaque to the pipeline.
    #[serde(default)]
    pub settings: Value,
}

impl RebuildConfig {
    /// Create a config with no mappings or settings.
    ///
    /// # Example
    ///
    /// ```
    /// use index_rebuilder_shared::RebuildConfig;
    ///
    /// let config = RebuildConfig::new("products");
    /// assert_eq!(config.alias, "products");
    /// ```
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            mappings: Value::Null,
            settings: Value::Null,
        }
    }

    /// Set the field mappings for the new physical index.
    pub fn with_mappings(mut self, mappings: Value) -> Self {
        self.mappings = mappings;
        self
    }

    /// Set the engine-level settings for the new physical index.
    pub fn with_settings(mut self, settings: Value) -> Self {
        self.settings = settings;
        self
    }
}
