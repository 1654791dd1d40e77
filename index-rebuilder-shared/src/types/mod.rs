//! This module defines the core data structures and types used across the
//! rebuild pipeline. It re-exports specific types like `RebuildConfig` and
//! `IngestStats`.

pub mod ingest_stats;
pub mod rebuild_config;

pub use ingest_stats::IngestStats;
pub use rebuild_config::{Document, RebuildConfig};
