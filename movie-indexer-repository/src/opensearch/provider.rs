//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust crate.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesRefreshParts},
    IndexParts, OpenSearch, SearchParts,
};
use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

use movie_indexer_shared::MovieRecord;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::get_index_settings;
use crate::opensearch::queries::build_search_body;
use crate::types::{MovieHits, MovieSearchRequest};

/// OpenSearch provider implementation.
///
/// # Example
///
/// ```ignore
/// use movie_indexer_repository::{OpenSearchProvider, SearchIndexProvider};
/// use movie_indexer_shared::MovieRecord;
///
/// let provider = OpenSearchProvider::new("http://localhost:9200").await?;
///
/// provider.delete_index("movies").await?;
/// provider.create_index("movies").await?;
/// provider
///     .index_document("movies", &MovieRecord::new("The Antman", 2002, "tt0321249"))
///     .await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If connection setup fails
    pub async fn new(url: &str) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch provider");

        Ok(Self { client })
    }

    /// Extract the stored records from a search response body.
    ///
    /// Hits keep the order OpenSearch returned them in.
    fn parse_hits(body: &Value) -> Result<MovieHits, SearchIndexError> {
        let hits = body["hits"]["hits"]
            .as_array()
            .ok_or_else(|| SearchIndexError::parse("Response has no hits array"))?;

        let records = hits
            .iter()
            .map(|hit| {
                serde_json::from_value::<MovieRecord>(hit["_source"].clone())
                    .map_err(|e| SearchIndexError::parse(format!("Invalid _source: {}", e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total = body["hits"]["total"]["value"]
            .as_u64()
            .unwrap_or(records.len() as u64);

        Ok(MovieHits { records, total })
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::index_deletion(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - index may not exist
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Delete index request failed");
            return Err(SearchIndexError::index_deletion(format!(
                "Delete index failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(index = %index, "Index deleted");
        Ok(())
    }

    async fn create_index(&self, index: &str) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Create index request failed");
            return Err(SearchIndexError::index_creation(format!(
                "Create index failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(index = %index, "Index created");
        Ok(())
    }

    async fn index_document(
        &self,
        index: &str,
        movie: &MovieRecord,
    ) -> Result<(), SearchIndexError> {
        let body = serde_json::to_value(movie)
            .map_err(|e| SearchIndexError::serialization(e.to_string()))?;

        let response = self
            .client
            .index(IndexParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(SearchIndexError::index(format!(
                "Index failed with status {}: {}",
                status, error_body
            )));
        }

        Ok(())
    }

    async fn refresh_index(&self, index: &str) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::refresh(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Refresh request failed");
            return Err(SearchIndexError::refresh(format!(
                "Refresh failed with status {}: {}",
                status, error_body
            )));
        }

        Ok(())
    }

    async fn search(
        &self,
        index: &str,
        request: &MovieSearchRequest,
    ) -> Result<MovieHits, SearchIndexError> {
        let body = build_search_body(request);
        debug!(index = %index, query = %body, "Executing search");

        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::query(e.to_string()))?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            return Err(SearchIndexError::index_not_found(index));
        }
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchIndexError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        Self::parse_hits(&response_body)
    }

    async fn health_check(&self) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let health: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;
        let status = health["status"].as_str().unwrap_or("unknown");

        info!(status = %status, "OpenSearch cluster status");

        Ok(status == "green" || status == "yellow")
    }
}
