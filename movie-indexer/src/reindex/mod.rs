//! Reindex pipeline.
//!
//! Drains every page of the movie catalog for a title filter, then replaces the
//! target index wholesale: delete, create, insert each record, refresh.
//!
//! Page-level failures reported by the catalog are logged and skipped over; a
//! transport failure or any index operation failure aborts the whole run.

use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::errors::ReindexError;
use movie_indexer_repository::SearchIndexProvider;
use movie_indexer_shared::MovieRecord;
use movie_source::{MovieSource, PageStatus};

/// Default number of consecutive failed pages tolerated before aborting.
pub const DEFAULT_MAX_CONSECUTIVE_PAGE_FAILURES: u32 = 3;

/// Default upper bound on pages fetched in a single run.
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Configuration for the reindex pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReindexConfig {
    /// Abort once this many pages in a row report a non-success status.
    /// Values below 1 are treated as 1.
    pub max_consecutive_page_failures: u32,
    /// Abort as soon as the catalog reports more pages than this.
    pub max_pages: u32,
}

impl Default for ReindexConfig {
    fn default() -> Self {
        Self {
            max_consecutive_page_failures: DEFAULT_MAX_CONSECUTIVE_PAGE_FAILURES,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Result of a successful reindex run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReindexSummary {
    /// Number of records written to the new index.
    pub indexed_count: usize,
}

/// Pipeline that rebuilds the movie index from the catalog.
pub struct ReindexPipeline {
    source: Arc<dyn MovieSource>,
    provider: Arc<dyn SearchIndexProvider>,
    index_name: String,
    config: ReindexConfig,
}

impl ReindexPipeline {
    /// Create a new pipeline with default configuration.
    pub fn new(
        source: Arc<dyn MovieSource>,
        provider: Arc<dyn SearchIndexProvider>,
        index_name: impl Into<String>,
    ) -> Self {
        Self::with_config(source, provider, index_name, ReindexConfig::default())
    }

    /// Create a new pipeline with custom configuration.
    pub fn with_config(
        source: Arc<dyn MovieSource>,
        provider: Arc<dyn SearchIndexProvider>,
        index_name: impl Into<String>,
        config: ReindexConfig,
    ) -> Self {
        Self {
            source,
            provider,
            index_name: index_name.into(),
            config,
        }
    }

    /// The index this pipeline rebuilds.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Rebuild the index from every catalog page matching `filter`.
    ///
    /// # Arguments
    ///
    /// * `filter` - Title substring to ask the catalog for; `None` for every title
    ///
    /// # Returns
    ///
    /// * `Ok(ReindexSummary)` - The number of records indexed
    /// * `Err(ReindexError)` - If the catalog transport or any index operation failed;
    ///   the index may be left missing or partially loaded
    #[instrument(skip(self), fields(index = %self.index_name))]
    pub async fn reindex(&self, filter: Option<&str>) -> Result<ReindexSummary, ReindexError> {
        info!(
            "Starting movie indexing process for substring: {}",
            filter.unwrap_or("All titles")
        );

        let movies = self.drain_source(filter).await?;
        self.replace_index(&movies).await?;

        info!(count = movies.len(), "Successfully indexed {} movies", movies.len());

        Ok(ReindexSummary {
            indexed_count: movies.len(),
        })
    }

    /// Fetch pages until the catalog's reported page count is reached.
    async fn drain_source(&self, filter: Option<&str>) -> Result<Vec<MovieRecord>, ReindexError> {
        let max_failures = self.config.max_consecutive_page_failures.max(1);

        let mut page: u32 = 1;
        // Corrected by the first response
        let mut total_pages: u32 = 1;
        let mut consecutive_failures: u32 = 0;
        let mut movies = Vec::new();

        while page <= total_pages {
            info!(page = page, "Fetching movies from page {}", page);
            let fetched = self.source.fetch_page(filter, page).await?;

            // A failed page without a count keeps the last known one
            total_pages = match (fetched.status, fetched.total_pages) {
                (_, Some(reported)) => reported,
                (PageStatus::Ok, None) => 1,
                (PageStatus::Failed { .. }, None) => total_pages,
            };

            if total_pages > self.config.max_pages {
                error!(
                    total_pages = total_pages,
                    limit = self.config.max_pages,
                    "Catalog reported too many pages"
                );
                return Err(ReindexError::PageLimitExceeded {
                    limit: self.config.max_pages,
                });
            }

            match fetched.status {
                PageStatus::Ok => consecutive_failures = 0,
                PageStatus::Failed { status_code } => {
                    error!(
                        page = page,
                        status_code = status_code,
                        "Failed to fetch movies from page {}, status code: {}",
                        page,
                        status_code
                    );
                    consecutive_failures += 1;
                    if consecutive_failures >= max_failures {
                        return Err(ReindexError::TooManyPageFailures {
                            failures: consecutive_failures,
                            last_page: page,
                        });
                    }
                }
            }

            movies.extend(fetched.records);
            page += 1;
        }

        Ok(movies)
    }

    /// Delete, recreate and load the index.
    async fn replace_index(&self, movies: &[MovieRecord]) -> Result<(), ReindexError> {
        info!("Deleting existing index {}", self.index_name);
        self.provider.delete_index(&self.index_name).await?;

        info!("Creating new index {}", self.index_name);
        self.provider.create_index(&self.index_name).await?;

        for movie in movies {
            self.provider.index_document(&self.index_name, movie).await?;
        }

        self.provider.refresh_index(&self.index_name).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_indexer_repository::InMemoryProvider;
    use movie_source::{FetchedPage, MockMovieSource};

    fn movies(prefix: &str, count: usize) -> Vec<MovieRecord> {
        (0..count)
            .map(|i| MovieRecord::new(format!("{} {}", prefix, i), 2000, format!("tt{:07}", i)))
            .collect()
    }

    fn pipeline(
        source: Arc<MockMovieSource>,
        provider: Arc<InMemoryProvider>,
        config: ReindexConfig,
    ) -> ReindexPipeline {
        ReindexPipeline::with_config(source, provider, "movies", config)
    }

    #[tokio::test]
    async fn test_counts_every_page() {
        let source = Arc::new(MockMovieSource::with_pages(vec![
            FetchedPage::ok(movies("A", 3), 3),
            FetchedPage::ok(movies("B", 4), 3),
            FetchedPage::ok(movies("C", 2), 3),
        ]));
        let provider = Arc::new(InMemoryProvider::new());

        let summary = pipeline(source.clone(), provider.clone(), ReindexConfig::default())
            .reindex(None)
            .await
            .unwrap();

        assert_eq!(summary.indexed_count, 9);
        assert_eq!(provider.document_count("movies"), 9);
        assert_eq!(source.request_count(), 3);
    }

    #[tokio::test]
    async fn test_missing_total_pages_stops_after_first_page() {
        let mut page = FetchedPage::ok(movies("A", 2), 1);
        page.total_pages = None;
        let source = Arc::new(MockMovieSource::repeating(page));
        let provider = Arc::new(InMemoryProvider::new());

        let summary = pipeline(source.clone(), provider, ReindexConfig::default())
            .reindex(Some("A"))
            .await
            .unwrap();

        assert_eq!(summary.indexed_count, 2);
        assert_eq!(source.requests(), vec![(Some("A".to_string()), 1)]);
    }

    #[tokio::test]
    async fn test_failed_page_keeps_partial_data() {
        let mut failed = FetchedPage::failed(503);
        failed.records = movies("Partial", 1);
        failed.total_pages = Some(3);

        let source = Arc::new(MockMovieSource::with_pages(vec![
            FetchedPage::ok(movies("A", 2), 3),
            failed,
            FetchedPage::ok(movies("C", 2), 3),
        ]));
        let provider = Arc::new(InMemoryProvider::new());

        let summary = pipeline(source, provider, ReindexConfig::default())
            .reindex(None)
            .await
            .unwrap();

        assert_eq!(summary.indexed_count, 5);
    }

    #[tokio::test]
    async fn test_consecutive_failures_abort() {
        let mut failed = FetchedPage::failed(500);
        failed.total_pages = Some(10);
        let source = Arc::new(MockMovieSource::repeating(failed));
        let provider = Arc::new(InMemoryProvider::with_index("movies", movies("Old", 3)));

        let config = ReindexConfig {
            max_consecutive_page_failures: 2,
            ..ReindexConfig::default()
        };
        let result = pipeline(source.clone(), provider.clone(), config)
            .reindex(None)
            .await;

        assert!(matches!(
            result,
            Err(ReindexError::TooManyPageFailures {
                failures: 2,
                last_page: 2
            })
        ));
        assert_eq!(source.request_count(), 2);
        // Aborting while draining leaves the existing index untouched
        assert_eq!(provider.document_count("movies"), 3);
    }

    #[tokio::test]
    async fn test_failure_counter_resets_on_success() {
        let mut failed = FetchedPage::failed(502);
        failed.total_pages = Some(4);

        let source = Arc::new(MockMovieSource::with_pages(vec![
            failed.clone(),
            FetchedPage::ok(movies("B", 1), 4),
            failed,
            FetchedPage::ok(movies("D", 1), 4),
        ]));
        let provider = Arc::new(InMemoryProvider::new());

        let config = ReindexConfig {
            max_consecutive_page_failures: 2,
            ..ReindexConfig::default()
        };
        let summary = pipeline(source, provider, config).reindex(None).await.unwrap();

        assert_eq!(summary.indexed_count, 2);
    }

    #[tokio::test]
    async fn test_page_limit() {
        let source = Arc::new(MockMovieSource::repeating(FetchedPage::ok(
            movies("A", 1),
            50,
        )));
        let provider = Arc::new(InMemoryProvider::new());

        let config = ReindexConfig {
            max_pages: 5,
            ..ReindexConfig::default()
        };
        let result = pipeline(source.clone(), provider.clone(), config)
            .reindex(None)
            .await;

        assert!(matches!(
            result,
            Err(ReindexError::PageLimitExceeded { limit: 5 })
        ));
        // The first response already reports too many pages
        assert_eq!(source.request_count(), 1);
        assert!(!provider.has_index("movies"));
    }

    #[tokio::test]
    async fn test_page_limit_allows_exact_count() {
        let source = Arc::new(MockMovieSource::repeating(FetchedPage::ok(
            movies("A", 1),
            5,
        )));
        let provider = Arc::new(InMemoryProvider::new());

        let config = ReindexConfig {
            max_pages: 5,
            ..ReindexConfig::default()
        };
        let summary = pipeline(source.clone(), provider, config)
            .reindex(None)
            .await
            .unwrap();

        assert_eq!(summary.indexed_count, 5);
        assert_eq!(source.request_count(), 5);
    }

    #[tokio::test]
    async fn test_failed_page_without_count_keeps_paging() {
        let source = Arc::new(MockMovieSource::with_pages(vec![
            FetchedPage::ok(movies("A", 2), 3),
            FetchedPage::failed(502),
            FetchedPage::ok(movies("C", 2), 3),
        ]));
        let provider = Arc::new(InMemoryProvider::new());

        let summary = pipeline(source.clone(), provider, ReindexConfig::default())
            .reindex(None)
            .await
            .unwrap();

        assert_eq!(summary.indexed_count, 4);
        assert_eq!(source.request_count(), 3);
    }

    #[tokio::test]
    async fn test_transport_error_aborts() {
        let source = Arc::new(MockMovieSource::with_pages(vec![
            FetchedPage::ok(movies("A", 2), 2),
            FetchedPage::ok(movies("B", 2), 2),
        ]));
        source.fail_transport_on(2);
        let provider = Arc::new(InMemoryProvider::new());

        let result = pipeline(source, provider.clone(), ReindexConfig::default())
            .reindex(None)
            .await;

        assert!(matches!(result, Err(ReindexError::SourceError(_))));
        assert!(!provider.has_index("movies"));
    }

    #[tokio::test]
    async fn test_empty_catalog_leaves_empty_index() {
        let source = Arc::new(MockMovieSource::repeating(FetchedPage::ok(Vec::new(), 1)));
        let provider = Arc::new(InMemoryProvider::with_index("movies", movies("Old", 2)));

        let summary = pipeline(source, provider.clone(), ReindexConfig::default())
            .reindex(None)
            .await
            .unwrap();

        assert_eq!(summary.indexed_count, 0);
        assert!(provider.has_index("movies"));
        assert_eq!(provider.document_count("movies"), 0);
    }
}
