//! Mock catalog client for testing and local development.
//!
//! The `MockMovieSource` serves pre-configured pages in order and records
//! every request, allowing tests to run without network access.
//!
//! # Example
//!
//! ```ignore
//! use movie_source::{FetchedPage, MockMovieSource, MovieSource};
//!
//! let source = MockMovieSource::with_pages(vec![
//!     FetchedPage::ok(first_ten, 2),
//!     FetchedPage::ok(next_ten, 2),
//! ]);
//!
//! let page = source.fetch_page(None, 1).await?;
//! assert_eq!(source.requests(), vec![(None, 1)]);
//! ```

use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::{FetchedPage, MovieSource, Result, SourceError};

/// Mock catalog client that returns pre-configured pages.
///
/// Page `n` (1-based) is served from the `n - 1`th configured page. When a
/// single page is configured with [`MockMovieSource::repeating`], every request
/// gets a copy of it, which mirrors a catalog that ignores the page parameter.
pub struct MockMovieSource {
    pages: RwLock<Vec<FetchedPage>>,
    repeat: bool,
    transport_failures: RwLock<HashSet<u32>>,
    requests: RwLock<Vec<(Option<String>, u32)>>,
}

impl MockMovieSource {
    /// Create a mock with no pages.
    pub fn new() -> Self {
        Self {
            pages: RwLock::new(Vec::new()),
            repeat: false,
            transport_failures: RwLock::new(HashSet::new()),
            requests: RwLock::new(Vec::new()),
        }
    }

    /// Create a mock serving `pages` in order.
    pub fn with_pages(pages: Vec<FetchedPage>) -> Self {
        let source = Self::new();
        *source.pages.write().unwrap() = pages;
        source
    }

    /// Create a mock that answers every page request with `page`.
    pub fn repeating(page: FetchedPage) -> Self {
        let mut source = Self::with_pages(vec![page]);
        source.repeat = true;
        source
    }

    /// Make the request for `page` fail at the transport level.
    pub fn fail_transport_on(&self, page: u32) {
        self.transport_failures.write().unwrap().insert(page);
    }

    /// Every `(title, page)` requested so far, in order.
    pub fn requests(&self) -> Vec<(Option<String>, u32)> {
        self.requests.read().unwrap().clone()
    }

    /// Number of requests made so far.
    pub fn request_count(&self) -> usize {
        self.requests.read().unwrap().len()
    }
}

impl Default for MockMovieSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MovieSource for MockMovieSource {
    async fn fetch_page(&self, title: Option<&str>, page: u32) -> Result<FetchedPage> {
        self.requests
            .write()
            .unwrap()
            .push((title.map(str::to_string), page));

        if self.transport_failures.read().unwrap().contains(&page) {
            return Err(SourceError::Transport(format!(
                "mock transport failure on page {}",
                page
            )));
        }

        let pages = self.pages.read().unwrap();
        if self.repeat {
            return Ok(pages
                .first()
                .cloned()
                .unwrap_or_else(|| FetchedPage::ok(Vec::new(), 1)));
        }

        let index = page.saturating_sub(1) as usize;
        Ok(pages
            .get(index)
            .cloned()
            .unwrap_or_else(|| FetchedPage::ok(Vec::new(), pages.len() as u32)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_indexer_shared::MovieRecord;

    fn page_of(titles: &[&str], total_pages: u32) -> FetchedPage {
        let records = titles
            .iter()
            .enumerate()
            .map(|(i, title)| MovieRecord::new(*title, 2000 + i as i64, format!("tt{:07}", i)))
            .collect();
        FetchedPage::ok(records, total_pages)
    }

    #[tokio::test]
    async fn test_mock_serves_pages_in_order() {
        let source = MockMovieSource::with_pages(vec![
            page_of(&["First"], 2),
            page_of(&["Second"], 2),
        ]);

        let first = source.fetch_page(None, 1).await.unwrap();
        let second = source.fetch_page(None, 2).await.unwrap();

        assert_eq!(first.records[0].title(), Some("First"));
        assert_eq!(second.records[0].title(), Some("Second"));
    }

    #[tokio::test]
    async fn test_mock_past_last_page_is_empty() {
        let source = MockMovieSource::with_pages(vec![page_of(&["Only"], 1)]);

        let page = source.fetch_page(None, 5).await.unwrap();

        assert!(page.records.is_empty());
        assert_eq!(page.total_pages, Some(1));
    }

    #[tokio::test]
    async fn test_mock_repeating() {
        let source = MockMovieSource::repeating(page_of(&["Again"], 2));

        for n in 1..=3 {
            let page = source.fetch_page(None, n).await.unwrap();
            assert_eq!(page.records[0].title(), Some("Again"));
        }
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let source = MockMovieSource::new();

        source.fetch_page(Some("maze"), 1).await.unwrap();
        source.fetch_page(None, 2).await.unwrap();

        assert_eq!(
            source.requests(),
            vec![(Some("maze".to_string()), 1), (None, 2)]
        );
        assert_eq!(source.request_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_transport_failure() {
        let source = MockMovieSource::with_pages(vec![page_of(&["A"], 2), page_of(&["B"], 2)]);
        source.fail_transport_on(2);

        assert!(source.fetch_page(None, 1).await.is_ok());

        match source.fetch_page(None, 2).await {
            Err(SourceError::Transport(msg)) => assert!(msg.contains("page 2")),
            other => panic!("Expected transport error, got {:?}", other),
        }
    }
}
