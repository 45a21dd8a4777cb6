//! # Movie Indexer Shared
//!
//! This crate defines shared data structures and types used across the movie indexer.
//! It includes the opaque movie record passed between the source, the index and the
//! HTTP surface, and the search query with its filter clauses.

pub mod types;

pub use types::movie_query::{
    FilterClause, MovieFilter, MovieQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use types::movie_record::{MovieRecord, IMDB_ID_FIELD, TITLE_FIELD, YEAR_FIELD};
