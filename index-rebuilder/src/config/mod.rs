//! Configuration and dependency initialization for the rebuild pipeline.

mod dependencies;

pub use dependencies::{ConnectionMode, Dependencies};
