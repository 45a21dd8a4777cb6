//! OpenSearch query builders.
//!
//! This module turns a [`MovieSearchRequest`] into an OpenSearch search body.

use serde_json::{json, Value};

use movie_indexer_shared::{FilterClause, MovieFilter, TITLE_FIELD, YEAR_FIELD};

use crate::types::MovieSearchRequest;

/// Build the full search body for a request, including the result window.
pub fn build_search_body(request: &MovieSearchRequest) -> Value {
    json!({
        "from": request.offset,
        "size": request.size,
        "query": build_filter_query(&request.filter)
    })
}

/// Build the query part for a filter.
///
/// - No clauses: `match_all`
/// - Every clause becomes a non-scoring `filter` entry, so the clauses are ANDed
/// - When a title is present, a scoring `match` on the analyzed `Title` field orders
///   hits by relevance without affecting which documents match
pub fn build_filter_query(filter: &MovieFilter) -> Value {
    if filter.is_match_all() {
        return json!({ "match_all": {} });
    }

    let filters: Vec<Value> = filter.clauses.iter().map(build_clause).collect();

    match filter.title() {
        Some(title) => json!({
            "bool": {
                "filter": filters,
                "should": [
                    { "match": { TITLE_FIELD: { "query": title } } }
                ]
            }
        }),
        None => json!({
            "bool": {
                "filter": filters
            }
        }),
    }
}

/// Build the query for a single clause.
fn build_clause(clause: &FilterClause) -> Value {
    match clause {
        FilterClause::TitleContains(text) => json!({
            "wildcard": {
                format!("{}.keyword", TITLE_FIELD): {
                    "value": format!("*{}*", escape_wildcard(text)),
                    "case_insensitive": true
                }
            }
        }),
        FilterClause::YearEquals(year) => json!({
            "term": { YEAR_FIELD: year }
        }),
    }
}

/// Escape the wildcard metacharacters `*`, `?` and `\` so user text matches literally.
pub fn escape_wildcard(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '?' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
