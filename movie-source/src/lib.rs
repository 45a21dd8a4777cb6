//! Client for the external movie catalog.
//!
//! This crate provides:
//! - [`MovieSource`] trait for abstracting paginated catalog access
//! - [`HttpMovieSource`] production client that fetches from the catalog over HTTP
//! - [`MockMovieSource`] mock client for testing with pre-configured pages
//!
//! ## Usage
//!
//! ```ignore
//! use movie_source::{HttpMovieSource, MovieSource, DEFAULT_SOURCE_URL};
//!
//! let source = HttpMovieSource::new(DEFAULT_SOURCE_URL);
//!
//! let page = source.fetch_page(Some("maze"), 1).await?;
//! println!("{} records, {:?} pages", page.records.len(), page.total_pages);
//! ```

mod mock;

pub use mock::MockMovieSource;

use async_trait::async_trait;
use movie_indexer_shared::MovieRecord;
use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use tracing::debug;

/// Default catalog search endpoint.
pub const DEFAULT_SOURCE_URL: &str = "https://jsonmock.hackerrank.com/api/moviesdata/search/";

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, SourceError>;

/// Outcome reported by the catalog for a single page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    /// The catalog answered with a success status.
    Ok,
    /// The catalog answered, but with a non-success status.
    Failed { status_code: u16 },
}

impl PageStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, PageStatus::Ok)
    }
}

/// One page of catalog results.
///
/// A failed page may still carry partial `records`; callers decide whether to
/// keep them.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub status: PageStatus,
    pub records: Vec<MovieRecord>,
    /// Total pages reported by the catalog, if it reported one.
    pub total_pages: Option<u32>,
}

impl FetchedPage {
    /// A successful page.
    pub fn ok(records: Vec<MovieRecord>, total_pages: u32) -> Self {
        Self {
            status: PageStatus::Ok,
            records,
            total_pages: Some(total_pages),
        }
    }

    /// A failed page with no usable payload.
    pub fn failed(status_code: u16) -> Self {
        Self {
            status: PageStatus::Failed { status_code },
            records: Vec::new(),
            total_pages: None,
        }
    }
}

/// Wire format of a catalog page.
#[derive(Debug, Deserialize)]
struct PagePayload {
    #[serde(default)]
    data: Vec<MovieRecord>,
    #[serde(default)]
    total_pages: Option<u32>,
}

/// Turn a raw catalog response into a [`FetchedPage`].
///
/// A success status with a malformed body is an error. A non-success status
/// keeps whatever payload could be decoded, or yields an empty page.
pub fn parse_page(status_code: u16, body: &[u8]) -> Result<FetchedPage> {
    let is_success = (200..300).contains(&status_code);

    let payload = match serde_json::from_slice::<PagePayload>(body) {
        Ok(payload) => payload,
        Err(e) if is_success => return Err(SourceError::Parse(e)),
        Err(_) => return Ok(FetchedPage::failed(status_code)),
    };

    Ok(FetchedPage {
        status: if is_success {
            PageStatus::Ok
        } else {
            PageStatus::Failed { status_code }
        },
        records: payload.data,
        total_pages: payload.total_pages,
    })
}

/// Trait for fetching movie pages from the catalog.
///
/// This trait abstracts the catalog client to enable dependency injection
/// and mocking for testing. Production code uses [`HttpMovieSource`], while
/// tests can use [`MockMovieSource`] or their own implementations.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Fetch one page of movies whose title contains `title`.
    ///
    /// `page` is 1-based. `None` asks for every title.
    ///
    /// Non-success statuses come back as `Ok` with [`PageStatus::Failed`];
    /// only transport and decoding failures are errors.
    async fn fetch_page(&self, title: Option<&str>, page: u32) -> Result<FetchedPage>;
}

/// Production catalog client.
///
/// # Example
///
/// ```ignore
/// use movie_source::{HttpMovieSource, MovieSource, DEFAULT_SOURCE_URL};
///
/// let client = HttpMovieSource::new(DEFAULT_SOURCE_URL);
/// let page = client.fetch_page(Some("waterworld"), 1).await?;
/// ```
pub struct HttpMovieSource {
    url: String,
    client: ReqwestClient,
}

impl HttpMovieSource {
    pub fn new(url: &str) -> Self {
        HttpMovieSource {
            url: url.to_string(),
            client: ReqwestClient::new(),
        }
    }
}

#[async_trait]
impl MovieSource for HttpMovieSource {
    async fn fetch_page(&self, title: Option<&str>, page: u32) -> Result<FetchedPage> {
        let page_param = page.to_string();
        let res = self
            .client
            .get(&self.url)
            .query(&[("Title", title.unwrap_or("")), ("page", page_param.as_str())])
            .send()
            .await?;

        let status_code = res.status().as_u16();
        let body = res.bytes().await?;

        debug!(page = page, status = status_code, bytes = body.len(), "Fetched catalog page");

        parse_page(status_code, &body)
    }
}
