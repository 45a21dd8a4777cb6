//! Shared fixtures for the movie indexer integration tests.

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::subscriber::DefaultGuard;

use movie_indexer::{AppState, Dependencies, Settings};
use movie_indexer_repository::{
    InMemoryProvider, MovieHits, MovieSearchRequest, SearchIndexError, SearchIndexProvider,
};
use movie_indexer_shared::MovieRecord;
use movie_source::{FetchedPage, MockMovieSource};

pub const INDEX: &str = "movies";

/// The ten-record catalog page used across the suites.
pub fn mock_movies() -> Vec<MovieRecord> {
    vec![
        MovieRecord::new("The Making of 'Waterworld'", 1995, "tt2670548"),
        MovieRecord::new("Waterworld 4: History of the Islands", 1997, "tt0161077"),
        MovieRecord::new(
            "Fighting, Flying and Driving: The Stunts of Spiderman 3",
            2007,
            "tt1132238",
        ),
        MovieRecord::new("The Superman/Aquaman Hour of Adventure", 1967, "tt0231046"),
        MovieRecord::new("Aquaman: The Teen Drama", 2013, "tt4018616"),
        MovieRecord::new("The Antman", 2002, "tt0321249"),
        MovieRecord::new("The Maze Runner", 2014, "tt1790864"),
        MovieRecord::new("Maze Runner: The Scorch Trials", 2015, "tt4046784"),
        MovieRecord::new("Into the Grizzly Maze", 2015, "tt1694021"),
        MovieRecord::new("Hercules in the Maze of the Minotaur", 1994, "tt0110018"),
    ]
}

/// A source that answers every page with the fixture and reports two pages.
pub fn two_page_source() -> Arc<MockMovieSource> {
    Arc::new(MockMovieSource::repeating(FetchedPage::ok(mock_movies(), 2)))
}

/// A provider already holding the fixture under [`INDEX`].
pub fn seeded_provider() -> Arc<InMemoryProvider> {
    Arc::new(InMemoryProvider::with_index(INDEX, mock_movies()))
}

pub fn test_settings() -> Settings {
    Settings {
        index_name: INDEX.to_string(),
        ..Settings::default()
    }
}

pub fn app_state(
    source: Arc<dyn movie_source::MovieSource>,
    provider: Arc<dyn SearchIndexProvider>,
) -> AppState {
    Dependencies::from_parts(source, provider, &test_settings()).app_state()
}

pub fn titles(records: &[MovieRecord]) -> Vec<&str> {
    records.iter().filter_map(|r| r.title()).collect()
}

/// Which provider call [`FailingProvider`] should reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Delete,
    Create,
    Index,
    Refresh,
    Search,
}

/// Wraps an [`InMemoryProvider`] and rejects one kind of call.
pub struct FailingProvider {
    pub inner: InMemoryProvider,
    fail_on: FailOn,
}

impl FailingProvider {
    pub fn new(fail_on: FailOn) -> Self {
        Self {
            inner: InMemoryProvider::new(),
            fail_on,
        }
    }

    /// Start with `records` already stored under [`INDEX`].
    pub fn with_documents(fail_on: FailOn, records: Vec<MovieRecord>) -> Self {
        Self {
            inner: InMemoryProvider::with_index(INDEX, records),
            fail_on,
        }
    }

    fn check(&self, op: FailOn) -> Result<(), SearchIndexError> {
        if self.fail_on == op {
            Err(SearchIndexError::unknown(format!("injected {:?} failure", op)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SearchIndexProvider for FailingProvider {
    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError> {
        self.check(FailOn::Delete)?;
        self.inner.delete_index(index).await
    }

    async fn create_index(&self, index: &str) -> Result<(), SearchIndexError> {
        self.check(FailOn::Create)?;
        self.inner.create_index(index).await
    }

    async fn index_document(
        &self,
        index: &str,
        movie: &MovieRecord,
    ) -> Result<(), SearchIndexError> {
        self.check(FailOn::Index)?;
        self.inner.index_document(index, movie).await
    }

    async fn refresh_index(&self, index: &str) -> Result<(), SearchIndexError> {
        self.check(FailOn::Refresh)?;
        self.inner.refresh_index(index).await
    }

    async fn search(
        &self,
        index: &str,
        request: &MovieSearchRequest,
    ) -> Result<MovieHits, SearchIndexError> {
        self.check(FailOn::Search)?;
        self.inner.search(index, request).await
    }

    async fn health_check(&self) -> Result<bool, SearchIndexError> {
        Ok(true)
    }
}

/// Log output captured from the current thread.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route INFO and above on this thread into a buffer until the guard drops.
///
/// Only sound with the single-threaded `#[tokio::test]` runtime.
pub fn capture_logs() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
