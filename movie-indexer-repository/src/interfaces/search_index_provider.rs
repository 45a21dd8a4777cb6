//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, in-memory, etc.).

use async_trait::async_trait;
use movie_indexer_shared::MovieRecord;

use crate::errors::SearchIndexError;
use crate::types::{MovieHits, MovieSearchRequest};

/// Abstracts the underlying search index implementation (OpenSearch, in-memory, etc.).
///
/// Every operation names the index it targets, so a single provider can serve
/// several indexes. Implementations are injected as `Arc<dyn SearchIndexProvider>`
/// into the reindex pipeline and the searcher.
///
/// All methods return `Result<T, SearchIndexError>` for consistent error handling across
/// different backend implementations.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Delete an index and every document in it.
    ///
    /// Deleting an index that does not exist succeeds.
    ///
    /// # Arguments
    ///
    /// * `index` - Name of the index to delete
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was deleted (or didn't exist)
    /// * `Err(SearchIndexError)` - If the deletion fails
    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError>;

    /// Create an empty index with the movie mappings.
    ///
    /// # Arguments
    ///
    /// * `index` - Name of the index to create
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was created
    /// * `Err(SearchIndexError)` - If creation fails, including when the index already exists
    async fn create_index(&self, index: &str) -> Result<(), SearchIndexError>;

    /// Insert one document under a backend-generated id.
    ///
    /// # Arguments
    ///
    /// * `index` - Name of the target index
    /// * `movie` - The record to store, unchanged
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was stored
    /// * `Err(SearchIndexError)` - If the insert fails
    async fn index_document(&self, index: &str, movie: &MovieRecord)
        -> Result<(), SearchIndexError>;

    /// Make every document inserted so far visible to search.
    async fn refresh_index(&self, index: &str) -> Result<(), SearchIndexError>;

    /// Run a filtered, windowed search.
    ///
    /// Hits come back in the backend's ranking order.
    ///
    /// # Arguments
    ///
    /// * `index` - Name of the index to query
    /// * `request` - Filter clauses plus the offset/size window
    ///
    /// # Returns
    ///
    /// * `Ok(MovieHits)` - The window of matching records (possibly empty)
    /// * `Err(SearchIndexError)` - If the query fails
    async fn search(
        &self,
        index: &str,
        request: &MovieSearchRequest,
    ) -> Result<MovieHits, SearchIndexError>;

    /// Check whether the backend is reachable and able to serve requests.
    async fn health_check(&self) -> Result<bool, SearchIndexError>;
}
