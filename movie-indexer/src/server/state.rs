//! Shared state for the HTTP handlers.

use std::sync::Arc;

use crate::reindex::ReindexPipeline;
use crate::search::MovieSearcher;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ReindexPipeline>,
    pub searcher: Arc<MovieSearcher>,
}

impl AppState {
    pub fn new(pipeline: Arc<ReindexPipeline>, searcher: Arc<MovieSearcher>) -> Self {
        Self { pipeline, searcher }
    }
}
