//! # Index Rebuilder Shared
//!
//! This crate defines shared data structures and types used across the index
//! rebuild pipeline. It includes the per-run configuration and the ingestion
//! statistics accumulated during a rebuild.

pub mod types;

pub use types::ingest_stats::IngestStats;
pub use types::rebuild_config::{Document, RebuildConfig};
