//! Error types for the rebuild pipeline.

use thiserror::Error;

use index_rebuilder_repository::SearchEngineError;

/// Errors that can occur during a rebuild run.
///
/// None of these escape the public entry point; the driver logs them and
/// converts the run outcome to a boolean.
#[derive(Error, Debug)]
pub enum RebuildError {
    /// Invalid run configuration.
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Error from the batch source.
    #[error("Source error: {0}")]
    SourceError(String),

    /// Error from the bulk loader.
    #[error("Loader error: {0}")]
    LoaderError(String),

    /// The validation gate rejected the rebuilt index.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The alias cutover failed.
    #[error("Cutover error: {0}")]
    CutoverError(String),

    /// Error from the search engine.
    #[error("Engine error: {0}")]
    EngineError(#[from] SearchEngineError),
}

impl RebuildError {
    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a source error.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::SourceError(msg.into())
    }

    /// Create a loader error.
    pub fn loader(msg: impl Into<String>) -> Self {
        Self::LoaderError(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a cutover error.
    pub fn cutover(msg: impl Into<String>) -> Self {
        Self::CutoverError(msg.into())
    }
}
