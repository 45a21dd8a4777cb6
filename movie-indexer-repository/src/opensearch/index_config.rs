//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the movie index.

use serde_json::{json, Value};

/// The default name of the movie index.
pub const DEFAULT_INDEX_NAME: &str = "movies";

/// Get the index settings and mappings for the movie index.
///
/// The configuration includes:
/// - **Title**: `text` for relevance scoring, with a `keyword` subfield used for
///   case-insensitive substring (wildcard) filtering
/// - **Year**: `integer` for exact term filtering
/// - **imdbID**: `keyword` for exact lookups
///
/// Any other field the provider sends is mapped dynamically.
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "Title": {
                    "type": "text",
                    "fields": {
                        "keyword": {
                            "type": "keyword",
                            "ignore_above": 512
                        }
                    }
                },
                "Year": {
                    "type": "integer"
                },
                "imdbID": {
                    "type": "keyword"
                }
            }
        }
    })
}
