//! Error types for the movie indexer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use movie_indexer_repository::SearchIndexError;
use movie_source::SourceError;

/// Message returned to callers for any internal failure.
pub const GENERIC_ERROR_DETAIL: &str = "An unexpected error occurred";

/// Message returned to callers when a search matches nothing.
pub const NOT_FOUND_DETAIL: &str = "No movies found";

/// Errors that abort a reindex run.
#[derive(Error, Debug)]
pub enum ReindexError {
    /// The catalog could not be reached or returned an unreadable page.
    #[error("Source error: {0}")]
    SourceError(#[from] SourceError),

    /// The search index rejected a delete, create, insert or refresh.
    #[error("Index error: {0}")]
    IndexError(#[from] SearchIndexError),

    /// Too many pages in a row came back with a non-success status.
    #[error("Aborted after {failures} consecutive failed pages (last page {last_page})")]
    TooManyPageFailures { failures: u32, last_page: u32 },

    /// The catalog reported more pages than the run is allowed to fetch.
    #[error("Catalog reported more than {limit} pages")]
    PageLimitExceeded { limit: u32 },
}

/// Errors returned from HTTP handlers.
///
/// The response body is always `{"detail": <message>}`. Internal causes are
/// logged where they happen and never reach the caller.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request parameters.
    #[error("{0}")]
    Validation(String),

    /// The search matched no movies.
    #[error("No movies found")]
    NotFound,

    /// Any failure inside the service.
    #[error("An unexpected error occurred")]
    Internal,
}

impl ApiError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

impl From<ReindexError> for ApiError {
    fn from(_: ReindexError) -> Self {
        ApiError::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::validation("bad").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_details_are_generic() {
        assert_eq!(ApiError::Internal.to_string(), GENERIC_ERROR_DETAIL);
        assert_eq!(ApiError::NotFound.to_string(), NOT_FOUND_DETAIL);
    }

    #[test]
    fn test_reindex_error_hides_cause() {
        let err = ReindexError::from(SearchIndexError::index_creation("disk full"));
        let api_err = ApiError::from(err);

        assert!(matches!(api_err, ApiError::Internal));
        assert!(!api_err.to_string().contains("disk full"));
    }
}
