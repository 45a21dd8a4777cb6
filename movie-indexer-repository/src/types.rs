//! Request and response types for search index operations.

use movie_indexer_shared::{MovieFilter, MovieQuery, MovieRecord};

/// A filtered, windowed search against one index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieSearchRequest {
    /// Clauses every hit must satisfy.
    pub filter: MovieFilter,
    /// Number of ranked hits to skip.
    pub offset: u64,
    /// Maximum number of hits to return.
    pub size: u32,
}

impl MovieSearchRequest {
    /// Create a request from its parts.
    pub fn new(filter: MovieFilter, offset: u64, size: u32) -> Self {
        Self {
            filter,
            offset,
            size,
        }
    }
}

impl From<&MovieQuery> for MovieSearchRequest {
    fn from(query: &MovieQuery) -> Self {
        Self::new(query.filter(), query.offset(), query.size)
    }
}

/// Ranked hits returned by a search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieHits {
    /// Stored records, in the backend's ranking order.
    pub records: Vec<MovieRecord>,
    /// Total number of matching documents, ignoring the window.
    pub total: u64,
}

impl MovieHits {
    /// True when no records were returned.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
