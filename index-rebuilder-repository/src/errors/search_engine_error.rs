//! Search engine error types.
//!
//! This module defines the unified error type for all engine-facing
//! operations performed by the rebuild pipeline.

use thiserror::Error;

/// Unified errors from search engine operations.
///
/// Used by the `SearchEngineProvider` trait for all engine calls. Transport
/// failures, non-success responses, and malformed response bodies all map
/// into these variants; per-item bulk failures do not, since they are
/// reported in `BulkSummary` instead.
#[derive(Debug, Clone, Error)]
pub enum SearchEngineError {
    /// Failed to establish a connection to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to create a physical index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// A bulk request failed at the transport or engine level.
    #[error("Bulk error: {0}")]
    BulkError(String),

    /// An alias lookup or alias update failed.
    #[error("Alias error: {0}")]
    AliasError(String),

    /// The engine returned a non-success response.
    #[error("Response error: {0}")]
    ResponseError(String),

    /// Failed to parse a response from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize data for the search engine.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SearchEngineError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a bulk error.
    pub fn bulk(msg: impl Into<String>) -> Self {
        Self::BulkError(msg.into())
    }

    /// Create an alias error.
    pub fn alias(msg: impl Into<String>) -> Self {
        Self::AliasError(msg.into())
    }

    /// Create a response error.
    pub fn response(msg: impl Into<String>) -> Self {
        Self::ResponseError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }
}
