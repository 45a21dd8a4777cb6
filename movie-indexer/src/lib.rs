//! # Movie Indexer
//!
//! Drains the external movie catalog into a search index and serves filtered,
//! paginated search over HTTP.
//!
//! ## Architecture
//!
//! 1. **Reindex**: fetches every catalog page for a title filter, then replaces the index
//! 2. **Search**: turns query parameters into a conjunctive filter and a result window
//! 3. **Server**: axum routes for indexing, searching and health
//!
//! ## Modules
//!
//! - [`config`]: Settings and dependency initialization
//! - [`reindex`]: The reindex pipeline
//! - [`search`]: The movie searcher
//! - [`server`]: HTTP routes and handlers
//! - [`telemetry`]: Optional log file sink
//! - [`errors`]: Error types for the indexer

pub mod config;
pub mod errors;
pub mod reindex;
pub mod search;
pub mod server;
pub mod telemetry;

pub use config::{Dependencies, Settings};
pub use errors::{ApiError, ReindexError};
pub use reindex::{ReindexConfig, ReindexPipeline, ReindexSummary};
pub use search::{MovieSearcher, SearchOutcome};
pub use server::{create_app, run_server, AppState};

use thiserror::Error;

/// Errors that can occur during service initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The HTTP server failed to bind or serve.
    #[error("Server error: {0}")]
    ServerError(#[from] std::io::Error),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
