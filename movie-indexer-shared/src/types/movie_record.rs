//! Movie record type for the search index.
//!
//! A movie record is stored exactly as the catalog provider delivered it. Only
//! `Title` and `Year` participate in querying; every other field is carried through
//! untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the movie title.
pub const TITLE_FIELD: &str = "Title";

/// Field holding the release year.
pub const YEAR_FIELD: &str = "Year";

/// Field holding the IMDb identifier.
pub const IMDB_ID_FIELD: &str = "imdbID";

/// Opaque movie document.
///
/// Serializes as the underlying JSON object, so a record fetched from the provider
/// is indexed and later returned from search byte-for-byte in the same shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct MovieRecord(Map<String, Value>);

impl MovieRecord {
    /// Create a record with the three well-known fields.
    ///
    /// # Example
    ///
    /// ```
    /// use movie_indexer_shared::MovieRecord;
    ///
    /// let movie = MovieRecord::new("The Maze Runner", 2014, "tt1790864");
    /// assert_eq!(movie.title(), Some("The Maze Runner"));
    /// assert_eq!(movie.year(), Some(2014));
    /// ```
    pub fn new(title: impl Into<String>, year: i64, imdb_id: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(TITLE_FIELD.to_string(), Value::String(title.into()));
        fields.insert(YEAR_FIELD.to_string(), Value::from(year));
        fields.insert(IMDB_ID_FIELD.to_string(), Value::String(imdb_id.into()));
        Self(fields)
    }

    /// The movie title, if present and a string.
    pub fn title(&self) -> Option<&str> {
        self.0.get(TITLE_FIELD).and_then(Value::as_str)
    }

    /// The release year.
    ///
    /// Numeric strings (`"2014"`) are read as integers as well, since some
    /// providers quote every value.
    pub fn year(&self) -> Option<i64> {
        match self.0.get(YEAR_FIELD)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// The IMDb identifier, if present.
    pub fn imdb_id(&self) -> Option<&str> {
        self.0.get(IMDB_ID_FIELD).and_then(Value::as_str)
    }

    /// Look up any field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_sets_known_fields() {
        let movie = MovieRecord::new("The Antman", 2002, "tt0321249");

        assert_eq!(movie.title(), Some("The Antman"));
        assert_eq!(movie.year(), Some(2002));
        assert_eq!(movie.imdb_id(), Some("tt0321249"));
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let raw = json!({
            "Title": "Waterworld 4: History of the Islands",
            "Year": 1997,
            "imdbID": "tt0161077",
            "Poster": "N/A"
        });

        let movie: MovieRecord = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(movie.get("Poster"), Some(&json!("N/A")));
        assert_eq!(serde_json::to_value(&movie).unwrap(), raw);
    }

    #[test]
    fn test_year_from_numeric_string() {
        let movie: MovieRecord =
            serde_json::from_value(json!({ "Title": "Quoted", "Year": "1995" })).unwrap();

        assert_eq!(movie.year(), Some(1995));
    }

    #[test]
    fn test_missing_fields() {
        let movie = MovieRecord::default();

        assert!(movie.title().is_none());
        assert!(movie.year().is_none());
        assert!(movie.imdb_id().is_none());
    }

    #[test]
    fn test_non_object_is_rejected() {
        let result: Result<MovieRecord, _> = serde_json::from_value(json!(["not", "a", "movie"]));
        assert!(result.is_err());
    }
}
