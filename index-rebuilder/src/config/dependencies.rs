//! Dependency initialization and wiring for the rebuild pipeline.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::errors::RebuildError;
use crate::rebuilder::IndexRebuilder;
use index_rebuilder_repository::{OpenSearchProvider, SearchEngineProvider};

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

/// Connection mode for the search engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Fail immediately if the connection fails.
    FailFast,
    /// Retry the connection on an interval until successful.
    Retry,
}

impl ConnectionMode {
    /// Parse connection mode from environment variable.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive)
    /// Defaults to "retry" if not set or invalid.
    fn from_env() -> Self {
        match env::var("OPENSEARCH_CONNECTION_MODE")
            .unwrap_or_else(|_| "retry".to_string())
            .to_lowercase()
            .as_str()
        {
            "fail-fast" | "failfast" | "fail_fast" => Self::FailFast,
            "retry" => Self::Retry,
            _ => {
                warn!("Invalid OPENSEARCH_CONNECTION_MODE, defaulting to 'retry'");
                Self::Retry
            }
        }
    }
}

/// Container for the initialized pipeline dependencies.
pub struct Dependencies {
    /// The engine provider handle, shared across rebuild runs.
    pub provider: Arc<dyn SearchEngineProvider>,
    /// A rebuilder wired to the provider, ready to run.
    pub rebuilder: IndexRebuilder,
}

impl Dependencies {
    /// Initialize the pipeline from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `OPENSEARCH_CONNECTION_MODE`: Connection mode - "fail-fast" or "retry" (default: retry)
    /// - `OPENSEARCH_RETRY_INTERVAL_SECS`: Retry interval in seconds (default: 15)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(RebuildError)` - If initialization fails (only in fail-fast mode)
    pub async fn from_env() -> Result<Self, RebuildError> {
        let url = env::var("OPENSEARCH_URL").unwrap_or_else(|_| DEFAULT_OPENSEARCH_URL.to_string());
        let connection_mode = ConnectionMode::from_env();
        let retry_interval = env::var("OPENSEARCH_RETRY_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_INTERVAL_SECS);

        info!(
            opensearch_url = %url,
            connection_mode = ?connection_mode,
            retry_interval_secs = retry_interval,
            "Initializing dependencies"
        );

        let provider = Self::connect(
            &url,
            connection_mode,
            Duration::from_secs(retry_interval),
        )
        .await?;

        info!("Search engine connection established");

        let provider: Arc<dyn SearchEngineProvider> = Arc::new(provider);
        let rebuilder = IndexRebuilder::new(Arc::clone(&provider));

        Ok(Self {
            provider,
            rebuilder,
        })
    }

    /// Connect to the search engine with retry logic based on connection mode.
    async fn connect(
        url: &str,
        mode: ConnectionMode,
        retry_interval: Duration,
    ) -> Result<OpenSearchProvider, RebuildError> {
        loop {
            match Self::try_connect(url).await {
                Ok(provider) => return Ok(provider),
                Err(e) => match mode {
                    ConnectionMode::FailFast => {
                        return Err(RebuildError::config(format!(
                            "Failed to connect to the search engine: {}",
                            e
                        )));
                    }
                    ConnectionMode::Retry => {
                        warn!(
                            opensearch_url = %url,
                            error = %e,
                            retry_interval_secs = retry_interval.as_secs(),
                            "Failed to connect to the search engine, retrying..."
                        );
                        sleep(retry_interval).await;
                    }
                },
            }
        }
    }

    /// Attempt one connection, probing with a ping.
    async fn try_connect(url: &str) -> Result<OpenSearchProvider, RebuildError> {
        let provider = OpenSearchProvider::new(url).await.map_err(|e| {
            RebuildError::config(format!("Failed to create OpenSearch provider: {}", e))
        })?;

        provider
            .ping()
            .await
            .map_err(|e| RebuildError::config(format!("Search engine ping failed: {}", e)))?;

        Ok(provider)
    }
}
