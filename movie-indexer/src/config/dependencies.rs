//! Dependency initialization and wiring for the movie indexer.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use super::settings::{ConnectionMode, SearchBackend, Settings};
use crate::reindex::ReindexPipeline;
use crate::search::MovieSearcher;
use crate::server::AppState;
use crate::IndexingError;
use movie_indexer_repository::{InMemoryProvider, OpenSearchProvider, SearchIndexProvider};
use movie_source::{HttpMovieSource, MovieSource};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Rebuilds the index from the catalog.
    pub pipeline: Arc<ReindexPipeline>,
    /// Answers search requests.
    pub searcher: Arc<MovieSearcher>,
}

impl Dependencies {
    /// Initialize all dependencies from settings.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If initialization fails (only in fail-fast mode)
    pub async fn new(settings: &Settings) -> Result<Self, IndexingError> {
        info!(
            backend = ?settings.backend,
            opensearch_url = %settings.opensearch_url,
            index_name = %settings.index_name,
            source_url = %settings.source_url,
            connection_mode = ?settings.connection_mode,
            retry_interval_secs = settings.retry_interval.as_secs(),
            "Initializing dependencies"
        );

        let source: Arc<dyn MovieSource> = Arc::new(HttpMovieSource::new(&settings.source_url));

        let provider: Arc<dyn SearchIndexProvider> = match settings.backend {
            SearchBackend::Memory => {
                info!("Using in-memory search index");
                Arc::new(InMemoryProvider::new())
            }
            SearchBackend::OpenSearch => {
                let provider = Self::connect_to_opensearch(
                    &settings.opensearch_url,
                    settings.connection_mode,
                    settings.retry_interval,
                )
                .await?;
                info!("OpenSearch connection established");
                Arc::new(provider)
            }
        };

        Ok(Self::from_parts(source, provider, settings))
    }

    /// Wire already-constructed clients together.
    pub fn from_parts(
        source: Arc<dyn MovieSource>,
        provider: Arc<dyn SearchIndexProvider>,
        settings: &Settings,
    ) -> Self {
        let pipeline = ReindexPipeline::with_config(
            source,
            provider.clone(),
            settings.index_name.clone(),
            settings.reindex,
        );
        let searcher = MovieSearcher::new(provider, settings.index_name.clone());

        Self {
            pipeline: Arc::new(pipeline),
            searcher: Arc::new(searcher),
        }
    }

    /// Shared state for the HTTP handlers.
    pub fn app_state(&self) -> AppState {
        AppState::new(self.pipeline.clone(), self.searcher.clone())
    }

    /// Connect to OpenSearch with retry logic based on connection mode.
    async fn connect_to_opensearch(
        url: &str,
        mode: ConnectionMode,
        retry_interval: Duration,
    ) -> Result<OpenSearchProvider, IndexingError> {
        loop {
            match Self::try_connect_opensearch(url).await {
                Ok(provider) => return Ok(provider),
                Err(e) => match mode {
                    ConnectionMode::FailFast => {
                        return Err(IndexingError::config(format!(
                            "Failed to connect to OpenSearch: {}",
                            e
                        )));
                    }
                    ConnectionMode::Retry => {
                        warn!(
                            opensearch_url = %url,
                            error = %e,
                            retry_interval_secs = retry_interval.as_secs(),
                            "Failed to connect to OpenSearch, retrying..."
                        );
                        sleep(retry_interval).await;
                    }
                },
            }
        }
    }

    /// Attempt to connect to OpenSearch and confirm the cluster is usable.
    async fn try_connect_opensearch(url: &str) -> Result<OpenSearchProvider, IndexingError> {
        let provider = OpenSearchProvider::new(url).await.map_err(|e| {
            IndexingError::config(format!("Failed to create OpenSearch provider: {}", e))
        })?;

        let healthy = provider
            .health_check()
            .await
            .map_err(|e| IndexingError::config(format!("Health check failed: {}", e)))?;

        if !healthy {
            return Err(IndexingError::config("OpenSearch cluster is not healthy"));
        }

        Ok(provider)
    }
}
