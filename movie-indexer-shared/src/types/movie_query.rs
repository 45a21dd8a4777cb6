//! Search query types for the movie indexer.
//!
//! This module defines the query structure used to search the index and the
//! filter clauses derived from it.

use serde::{Deserialize, Serialize};

use crate::types::movie_record::MovieRecord;

/// Largest page size a query may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A single predicate on a movie record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterClause {
    /// `Title` contains the text, ignoring case.
    TitleContains(String),
    /// `Year` equals the value exactly.
    YearEquals(i32),
}

impl FilterClause {
    /// Check whether a record satisfies this clause.
    pub fn matches(&self, record: &MovieRecord) -> bool {
        match self {
            FilterClause::TitleContains(text) => record
                .title()
                .map(|title| title.to_lowercase().contains(&text.to_lowercase()))
                .unwrap_or(false),
            FilterClause::YearEquals(year) => record.year() == Some(i64::from(*year)),
        }
    }
}

/// Conjunction of filter clauses.
///
/// An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieFilter {
    pub clauses: Vec<FilterClause>,
}

impl MovieFilter {
    /// Build a filter from optional title and year criteria.
    ///
    /// Blank titles are treated as absent.
    ///
    /// # Example
    ///
    /// ```
    /// use movie_indexer_shared::{FilterClause, MovieFilter};
    ///
    /// let filter = MovieFilter::from_criteria(Some("maze"), Some(2015));
    /// assert_eq!(
    ///     filter.clauses,
    ///     vec![
    ///         FilterClause::TitleContains("maze".to_string()),
    ///         FilterClause::YearEquals(2015),
    ///     ]
    /// );
    /// ```
    pub fn from_criteria(title: Option<&str>, year: Option<i32>) -> Self {
        let title_clause = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| FilterClause::TitleContains(t.to_string()));
        let year_clause = year.map(FilterClause::YearEquals);

        Self {
            clauses: title_clause.into_iter().chain(year_clause).collect(),
        }
    }

    /// True when the filter has no clauses.
    pub fn is_match_all(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The title text, if the filter has a title clause.
    pub fn title(&self) -> Option<&str> {
        self.clauses.iter().find_map(|clause| match clause {
            FilterClause::TitleContains(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Check whether a record satisfies every clause.
    pub fn matches(&self, record: &MovieRecord) -> bool {
        self.clauses.iter().all(|clause| clause.matches(record))
    }
}

/// Search query parameters.
///
/// `page` is 1-based. `size` always lies in `1..=MAX_PAGE_SIZE`; the constructors
/// clamp out-of-range values instead of rejecting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieQuery {
    /// Case-insensitive substring to look for in `Title`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Exact release year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// 1-based page number.
    pub page: u32,

    /// Number of results per page.
    pub size: u32,
}

impl Default for MovieQuery {
    fn default() -> Self {
        Self {
            title: None,
            year: None,
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl MovieQuery {
    /// Create a query for the given page window, matching every movie.
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            title: None,
            year: None,
            page: page.max(1),
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Restrict results to titles containing `title`.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Restrict results to movies released in `year`.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Number of hits to skip: `(page - 1) * size`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.size)
    }

    /// The conjunctive filter described by this query.
    pub fn filter(&self) -> MovieFilter {
        MovieFilter::from_criteria(self.title.as_deref(), self.year)
    }
}
