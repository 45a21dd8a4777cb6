//! In-memory search index provider.
//!
//! Keeps every index as a vector of records guarded by a `RwLock`. Used by the
//! test suites and by the service when `SEARCH_BACKEND=memory`, so the HTTP surface
//! can run without an OpenSearch cluster.
//!
//! Ranking: with a title clause, shorter titles (fewer words) rank first, which is
//! how a length-normalized relevance score orders single-term matches. Ties, and
//! queries without a title clause, keep insertion order.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use movie_indexer_shared::MovieRecord;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::types::{MovieHits, MovieSearchRequest};

/// Search index provider backed by process memory.
#[derive(Default)]
pub struct InMemoryProvider {
    indexes: RwLock<HashMap<String, Vec<MovieRecord>>>,
}

impl InMemoryProvider {
    /// Create a provider with no indexes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider holding one index pre-loaded with `records`.
    pub fn with_index(index: &str, records: Vec<MovieRecord>) -> Self {
        let provider = Self::new();
        provider
            .indexes
            .write()
            .unwrap()
            .insert(index.to_string(), records);
        provider
    }

    /// Whether the index exists.
    pub fn has_index(&self, index: &str) -> bool {
        self.indexes.read().unwrap().contains_key(index)
    }

    /// Snapshot of every record in the index, in insertion order.
    pub fn documents(&self, index: &str) -> Vec<MovieRecord> {
        self.indexes
            .read()
            .unwrap()
            .get(index)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of records in the index.
    pub fn document_count(&self, index: &str) -> usize {
        self.indexes
            .read()
            .unwrap()
            .get(index)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

/// Word count of a record's title, used as the relevance key.
fn title_length(record: &MovieRecord) -> usize {
    record
        .title()
        .map(|title| title.split_whitespace().count())
        .unwrap_or(usize::MAX)
}

#[async_trait]
impl SearchIndexProvider for InMemoryProvider {
    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError> {
        self.indexes.write().unwrap().remove(index);
        Ok(())
    }

    async fn create_index(&self, index: &str) -> Result<(), SearchIndexError> {
        let mut indexes = self.indexes.write().unwrap();
        if indexes.contains_key(index) {
            return Err(SearchIndexError::index_creation(format!(
                "Index {} already exists",
                index
            )));
        }
        indexes.insert(index.to_string(), Vec::new());
        Ok(())
    }

    async fn index_document(
        &self,
        index: &str,
        movie: &MovieRecord,
    ) -> Result<(), SearchIndexError> {
        let mut indexes = self.indexes.write().unwrap();
        let documents = indexes
            .get_mut(index)
            .ok_or_else(|| SearchIndexError::index_not_found(index))?;
        documents.push(movie.clone());
        Ok(())
    }

    async fn refresh_index(&self, index: &str) -> Result<(), SearchIndexError> {
        if self.has_index(index) {
            Ok(())
        } else {
            Err(SearchIndexError::index_not_found(index))
        }
    }

    async fn search(
        &self,
        index: &str,
        request: &MovieSearchRequest,
    ) -> Result<MovieHits, SearchIndexError> {
        let indexes = self.indexes.read().unwrap();
        let documents = indexes
            .get(index)
            .ok_or_else(|| SearchIndexError::index_not_found(index))?;

        let mut matches: Vec<&MovieRecord> = documents
            .iter()
            .filter(|record| request.filter.matches(record))
            .collect();

        if request.filter.title().is_some() {
            // Stable sort keeps insertion order among equal lengths
            matches.sort_by_key(|record| title_length(record));
        }

        let total = matches.len() as u64;
        let offset = usize::try_from(request.offset).unwrap_or(usize::MAX);
        let records = matches
            .into_iter()
            .skip(offset)
            .take(request.size as usize)
            .cloned()
            .collect();

        Ok(MovieHits { records, total })
    }

    async fn health_check(&self) -> Result<bool, SearchIndexError> {
        Ok(true)
    }
}
