//! # Movie Indexer Repository
//!
//! This crate provides traits and implementations for interacting with the
//! movie search index. It includes definitions for errors, interfaces, a
//! concrete implementation for OpenSearch and an in-memory implementation for
//! tests and local development.

pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod opensearch;
pub mod types;

pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use memory::InMemoryProvider;
pub use opensearch::OpenSearchProvider;
pub use types::{MovieHits, MovieSearchRequest};
