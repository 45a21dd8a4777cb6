//! HTTP request handlers.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::errors::ApiError;
use crate::search::SearchOutcome;
use crate::server::state::AppState;
use movie_indexer_shared::{MovieQuery, MovieRecord, MAX_PAGE_SIZE};

/// Longest accepted `substr` or `title`, in characters.
pub const MAX_TEXT_LENGTH: usize = 100;

/// Query parameters for `POST /movies/index`.
#[derive(Debug, Default, Deserialize)]
pub struct IndexParams {
    pub substr: Option<String>,
}

impl IndexParams {
    /// The catalog title filter, if one was given.
    pub fn validate(self) -> Result<Option<String>, ApiError> {
        match self.substr {
            None => Ok(None),
            Some(substr) => {
                let length = substr.chars().count();
                if length == 0 || length > MAX_TEXT_LENGTH {
                    return Err(ApiError::validation(format!(
                        "substr must be between 1 and {} characters",
                        MAX_TEXT_LENGTH
                    )));
                }
                Ok(Some(substr))
            }
        }
    }
}

/// Query parameters for `GET /movies/search/`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl SearchParams {
    /// Check bounds and build the query. A blank title is treated as absent.
    pub fn validate(self) -> Result<MovieQuery, ApiError> {
        let page = match self.page {
            None => 1,
            Some(page) => u32::try_from(page)
                .ok()
                .filter(|page| *page > 0)
                .ok_or_else(|| ApiError::validation("page must be greater than 0"))?,
        };

        let size = match self.size {
            None => movie_indexer_shared::DEFAULT_PAGE_SIZE,
            Some(size) => u32::try_from(size)
                .ok()
                .filter(|size| (1..=MAX_PAGE_SIZE).contains(size))
                .ok_or_else(|| {
                    ApiError::validation(format!("size must be between 1 and {}", MAX_PAGE_SIZE))
                })?,
        };

        let mut query = MovieQuery::new(page, size);

        if let Some(title) = self.title {
            if title.chars().count() > MAX_TEXT_LENGTH {
                return Err(ApiError::validation(format!(
                    "title must be at most {} characters",
                    MAX_TEXT_LENGTH
                )));
            }
            if !title.trim().is_empty() {
                query = query.with_title(title);
            }
        }

        if let Some(year) = self.year {
            query = query.with_year(year);
        }

        Ok(query)
    }
}

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Rebuild the movie index from the catalog.
pub async fn index_movies(
    State(state): State<AppState>,
    params: Result<Query<IndexParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::validation(e.body_text()))?;
    let substr = params.validate()?;

    info!(substr = ?substr, "Received index request");

    match state.pipeline.reindex(substr.as_deref()).await {
        Ok(summary) => Ok((
            StatusCode::OK,
            Json(json!({
                "indexed": summary.indexed_count,
                "status": "success"
            })),
        )),
        Err(e) => {
            error!("An unexpected error occurred during the indexing process: {}", e);
            Err(e.into())
        }
    }
}

/// Search indexed movies by title and year.
pub async fn search_movies(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<MovieRecord>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::validation(e.body_text()))?;
    let query = params.validate()?;

    match state.searcher.search(&query).await {
        SearchOutcome::Found(records) => Ok(Json(records)),
        SearchOutcome::NotFound => Err(ApiError::NotFound),
        // Already logged by the searcher
        SearchOutcome::Failed(_) => Err(ApiError::Internal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(title: Option<&str>, page: Option<i64>, size: Option<i64>) -> SearchParams {
        SearchParams {
            title: title.map(str::to_string),
            year: None,
            page,
            size,
        }
    }

    #[test]
    fn test_search_defaults() {
        let query = SearchParams::default().validate().unwrap();
        assert_eq!(query, MovieQuery::default());
    }

    #[test]
    fn test_search_bounds() {
        assert!(search(None, Some(0), None).validate().is_err());
        assert!(search(None, Some(-3), None).validate().is_err());
        assert!(search(None, None, Some(0)).validate().is_err());
        assert!(search(None, None, Some(101)).validate().is_err());
        assert!(search(None, None, Some(100)).validate().is_ok());
        assert!(search(Some(&"x".repeat(101)), None, None).validate().is_err());
        assert!(search(Some(&"x".repeat(100)), None, None).validate().is_ok());
    }

    #[test]
    fn test_blank_title_is_absent() {
        let query = search(Some("  "), None, None).validate().unwrap();
        assert_eq!(query.title, None);
    }

    #[test]
    fn test_search_fields_carried() {
        let params = SearchParams {
            title: Some("Maze".to_string()),
            year: Some(2015),
            page: Some(2),
            size: Some(5),
        };
        let query = params.validate().unwrap();

        assert_eq!(query.title.as_deref(), Some("Maze"));
        assert_eq!(query.year, Some(2015));
        assert_eq!(query.page, 2);
        assert_eq!(query.size, 5);
    }

    #[test]
    fn test_index_substr_bounds() {
        let params = |s: Option<&str>| IndexParams {
            substr: s.map(str::to_string),
        };

        assert_eq!(params(None).validate().unwrap(), None);
        assert_eq!(
            params(Some("maze")).validate().unwrap(),
            Some("maze".to_string())
        );
        assert!(params(Some("")).validate().is_err());
        assert!(params(Some(&"a".repeat(101))).validate().is_err());
    }
}
