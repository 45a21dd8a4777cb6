//! Service settings read from environment variables.

use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use tracing::warn;

use crate::reindex::{ReindexConfig, DEFAULT_MAX_CONSECUTIVE_PAGE_FAILURES, DEFAULT_MAX_PAGES};
use crate::IndexingError;
use movie_indexer_repository::opensearch::DEFAULT_INDEX_NAME;
use movie_source::DEFAULT_SOURCE_URL;

/// Default bind address.
const DEFAULT_SERVER_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Default HTTP port.
const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

/// Connection mode for OpenSearch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Fail immediately if the cluster is unreachable.
    FailFast,
    /// Retry every retry interval until the cluster is healthy.
    Retry,
}

impl ConnectionMode {
    /// Valid values: "fail-fast" or "retry" (case-insensitive).
    /// Anything else falls back to "retry".
    fn parse(value: Option<&str>) -> Self {
        match value.unwrap_or("retry").to_lowercase().as_str() {
            "fail-fast" | "failfast" | "fail_fast" => Self::FailFast,
            "retry" => Self::Retry,
            other => {
                warn!(
                    value = %other,
                    "Invalid OPENSEARCH_CONNECTION_MODE, defaulting to 'retry'"
                );
                Self::Retry
            }
        }
    }
}

/// Which search index backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBackend {
    /// An OpenSearch cluster at `opensearch_url`.
    OpenSearch,
    /// A process-local index; contents are lost on restart.
    Memory,
}

impl SearchBackend {
    fn parse(value: Option<&str>) -> Result<Self, IndexingError> {
        match value.map(str::to_lowercase).as_deref() {
            None | Some("opensearch") => Ok(Self::OpenSearch),
            Some("memory") => Ok(Self::Memory),
            Some(other) => Err(IndexingError::config(format!(
                "Unknown SEARCH_BACKEND '{}', expected 'opensearch' or 'memory'",
                other
            ))),
        }
    }
}

/// Runtime settings for the service.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_host: IpAddr,
    pub server_port: u16,
    pub backend: SearchBackend,
    pub opensearch_url: String,
    pub index_name: String,
    pub source_url: String,
    pub connection_mode: ConnectionMode,
    pub retry_interval: Duration,
    pub reindex: ReindexConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_SERVER_HOST,
            server_port: DEFAULT_SERVER_PORT,
            backend: SearchBackend::OpenSearch,
            opensearch_url: DEFAULT_OPENSEARCH_URL.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            source_url: DEFAULT_SOURCE_URL.to_string(),
            connection_mode: ConnectionMode::Retry,
            retry_interval: Duration::from_secs(DEFAULT_RETRY_INTERVAL_SECS),
            reindex: ReindexConfig::default(),
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `SERVER_HOST`: Bind address (default: 0.0.0.0)
    /// - `SERVER_PORT`: HTTP port (default: 8000)
    /// - `SEARCH_BACKEND`: "opensearch" or "memory" (default: opensearch)
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `INDEX_NAME`: Target index name (default: movies)
    /// - `MOVIE_SOURCE_URL`: Catalog search endpoint
    /// - `REINDEX_MAX_PAGE_FAILURES`: Consecutive failed pages before a reindex aborts (default: 3)
    /// - `REINDEX_MAX_PAGES`: Most pages a single reindex may fetch (default: 1000)
    /// - `OPENSEARCH_CONNECTION_MODE`: "fail-fast" or "retry" (default: retry)
    /// - `OPENSEARCH_RETRY_INTERVAL_SECS`: Retry interval in seconds (default: 15)
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    ///
    /// Malformed numbers and addresses are configuration errors rather than
    /// silently replaced by defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let retry_interval = parse_or(
            "OPENSEARCH_RETRY_INTERVAL_SECS",
            &lookup,
            DEFAULT_RETRY_INTERVAL_SECS,
        )?;

        Ok(Self {
            server_host: parse_or("SERVER_HOST", &lookup, defaults.server_host)?,
            server_port: parse_or("SERVER_PORT", &lookup, defaults.server_port)?,
            backend: SearchBackend::parse(lookup("SEARCH_BACKEND").as_deref())?,
            opensearch_url: lookup("OPENSEARCH_URL").unwrap_or(defaults.opensearch_url),
            index_name: lookup("INDEX_NAME").unwrap_or(defaults.index_name),
            source_url: lookup("MOVIE_SOURCE_URL").unwrap_or(defaults.source_url),
            connection_mode: ConnectionMode::parse(
                lookup("OPENSEARCH_CONNECTION_MODE").as_deref(),
            ),
            retry_interval: Duration::from_secs(retry_interval),
            reindex: ReindexConfig {
                max_consecutive_page_failures: parse_or(
                    "REINDEX_MAX_PAGE_FAILURES",
                    &lookup,
                    DEFAULT_MAX_CONSECUTIVE_PAGE_FAILURES,
                )?,
                max_pages: parse_or("REINDEX_MAX_PAGES", &lookup, DEFAULT_MAX_PAGES)?,
            },
        })
    }
}

/// Parse `key` if it is set, otherwise return `default`.
fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T, IndexingError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| IndexingError::config(format!("Invalid {} '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}
