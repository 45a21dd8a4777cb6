//! This module defines the core data structures and types used across the movie indexer.
//! It re-exports specific types like `MovieRecord` and `MovieQuery`.

pub mod movie_query;
pub mod movie_record;

pub use movie_query::{FilterClause, MovieFilter, MovieQuery};
pub use movie_record::MovieRecord;
