//! Movie search.
//!
//! Translates a [`MovieQuery`] into a store request and classifies the result:
//! hits, nothing found, or a store failure.

use std::sync::Arc;
use tracing::{debug, error, instrument};

use movie_indexer_repository::{MovieSearchRequest, SearchIndexError, SearchIndexProvider};
use movie_indexer_shared::{MovieQuery, MovieRecord};

/// Result of a search.
#[derive(Debug)]
pub enum SearchOutcome {
    /// At least one record matched, in store ranking order.
    Found(Vec<MovieRecord>),
    /// The query matched no records.
    NotFound,
    /// The store could not answer.
    Failed(SearchIndexError),
}

/// Runs filtered, paginated searches against one index.
pub struct MovieSearcher {
    provider: Arc<dyn SearchIndexProvider>,
    index_name: String,
}

impl MovieSearcher {
    pub fn new(provider: Arc<dyn SearchIndexProvider>, index_name: impl Into<String>) -> Self {
        Self {
            provider,
            index_name: index_name.into(),
        }
    }

    /// Search for movies matching every present criterion of `query`.
    #[instrument(skip(self), fields(index = %self.index_name))]
    pub async fn search(&self, query: &MovieQuery) -> SearchOutcome {
        let request = MovieSearchRequest::from(query);

        match self.provider.search(&self.index_name, &request).await {
            Ok(hits) if hits.is_empty() => {
                debug!(total = hits.total, "No movies matched");
                SearchOutcome::NotFound
            }
            Ok(hits) => {
                debug!(
                    returned = hits.records.len(),
                    total = hits.total,
                    "Search completed"
                );
                SearchOutcome::Found(hits.records)
            }
            Err(e) => {
                error!(error = %e, "Search failed");
                SearchOutcome::Failed(e)
            }
        }
    }
}
