use actix_web::web;
use serde::Serialize;
use serde_json::Value;

use crate::errors::ServiceError;
use crate::services::search::{SearchTarget, VectorQuery};

pub const MISSING_SEARCH_PARAMS: &str =
    "Please provide search_service_endpoint, index_name, and query in the query string.";
pub const INVALID_NEIGHBOR_COUNT: &str = "k_nearest_neighbors must be a positive integer.";

/// Decoded query string pairs. A repeated key keeps its first value.
#[derive(Debug, Default)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    /// An undecodable query string yields no pairs.
    pub fn parse(query: &str) -> Self {
        let pairs = web::Query::<Vec<(String, String)>>::from_query(query)
            .map(|q| q.into_inner())
            .unwrap_or_else(|e| {
                tracing::debug!(error = %e, "Ignoring undecodable query string");
                Vec::new()
            });
        Self(pairs)
    }

    pub fn first(&self, key: &str) -> Option<String> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }
}

/// Query parameters shared by both search routes.
#[derive(Debug, Default)]
pub struct SearchParams {
    pub search_service_endpoint: Option<String>,
    pub index_name: Option<String>,
    pub query: Option<String>,
    pub k_nearest_neighbors: Option<String>,
    pub search_column: Option<String>,
    pub use_hybrid_query: Option<String>,
}

/// Search parameters after validation. Required fields are non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchInput {
    pub endpoint: String,
    pub index_name: String,
    pub query: String,
    pub k: Option<u32>,
    pub fields: Option<String>,
    pub hybrid: bool,
}

impl SearchParams {
    pub fn from_query(query: &str) -> Self {
        let pairs = QueryPairs::parse(query);
        Self {
            search_service_endpoint: pairs.first("search_service_endpoint"),
            index_name: pairs.first("index_name"),
            query: pairs.first("query"),
            k_nearest_neighbors: pairs.first("k_nearest_neighbors"),
            search_column: pairs.first("search_column"),
            use_hybrid_query: pairs.first("use_hybrid_query"),
        }
    }

    /// Checks every required parameter before anything is sent upstream.
    pub fn validate(self) -> Result<SearchInput, ServiceError> {
        let (endpoint, index_name, query) = match (
            non_empty(self.search_service_endpoint),
            non_empty(self.index_name),
            non_empty(self.query),
        ) {
            (Some(endpoint), Some(index_name), Some(query)) => (endpoint, index_name, query),
            _ => return Err(ServiceError::bad_request(MISSING_SEARCH_PARAMS)),
        };

        let k = match non_empty(self.k_nearest_neighbors) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(k) if k > 0 => Some(k),
                _ => return Err(ServiceError::bad_request(INVALID_NEIGHBOR_COUNT)),
            },
            None => None,
        };

        Ok(SearchInput {
            endpoint,
            index_name,
            query,
            k,
            fields: non_empty(self.search_column),
            hybrid: self.use_hybrid_query.as_deref().map_or(false, is_truthy),
        })
    }
}

impl SearchInput {
    pub fn target(&self) -> SearchTarget {
        SearchTarget {
            endpoint: self.endpoint.clone(),
            index_name: self.index_name.clone(),
        }
    }

    pub fn vector_query(&self, vector: Vec<f32>) -> VectorQuery {
        VectorQuery::new(vector, self.k, self.fields.clone())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticAnswerSummary {
    pub text: Option<String>,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticResultSummary {
    pub title: Option<Value>,
    pub reranker_score: Option<f64>,
    pub url: Option<Value>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticSearchResponse {
    pub semantic_answers: Vec<SemanticAnswerSummary>,
    pub results: Vec<SemanticResultSummary>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(endpoint: &str, index: &str, query: &str) -> SearchParams {
        SearchParams {
            search_service_endpoint: Some(endpoint.to_string()),
            index_name: Some(index.to_string()),
            query: Some(query.to_string()),
            ..Default::default()
        }
    }

    fn message(err: ServiceError) -> String {
        match err {
            ServiceError::BadRequest(msg) => msg,
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn test_repeated_key_keeps_first_value() {
        let pairs = QueryPairs::parse("name=Ada&name=Bob&other=x%20y");
        assert_eq!(pairs.first("name").as_deref(), Some("Ada"));
        assert_eq!(pairs.first("other").as_deref(), Some("x y"));
        assert_eq!(pairs.first("missing"), None);
    }

    #[test]
    fn test_search_params_from_repeated_query() {
        let input = SearchParams::from_query(
            "search_service_endpoint=https%3A%2F%2Fa.search.windows.net&index_name=idx&index_name=other&query=cats&query=dogs",
        )
        .validate()
        .unwrap();

        assert_eq!(input.endpoint, "https://a.search.windows.net");
        assert_eq!(input.index_name, "idx");
        assert_eq!(input.query, "cats");
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let err = params("", "idx", "cats").validate().unwrap_err();
        assert_eq!(message(err), MISSING_SEARCH_PARAMS);
    }

    #[test]
    fn test_absent_query_rejected() {
        let mut p = params("https://example.search.windows.net", "idx", "");
        p.query = None;
        let err = p.validate().unwrap_err();
        assert_eq!(message(err), MISSING_SEARCH_PARAMS);
    }

    #[test]
    fn test_optional_params_default() {
        let input = params("https://example.search.windows.net", "idx", "cats")
            .validate()
            .unwrap();

        assert_eq!(input.k, None);
        assert_eq!(input.fields, None);
        assert!(!input.hybrid);
    }

    #[test]
    fn test_neighbor_count_parsed() {
        let mut p = params("https://example.search.windows.net", "idx", "cats");
        p.k_nearest_neighbors = Some(" 5 ".to_string());
        p.search_column = Some("contentVector".to_string());
        let input = p.validate().unwrap();

        assert_eq!(input.k, Some(5));
        assert_eq!(input.fields.as_deref(), Some("contentVector"));
    }

    #[test]
    fn test_invalid_neighbor_count_rejected() {
        for raw in ["abc", "0", "-3", "2.5"] {
            let mut p = params("https://example.search.windows.net", "idx", "cats");
            p.k_nearest_neighbors = Some(raw.to_string());
            let err = p.validate().unwrap_err();
            assert_eq!(message(err), INVALID_NEIGHBOR_COUNT, "input {:?}", raw);
        }
    }

    #[test]
    fn test_hybrid_flag_parsing() {
        for (raw, expected) in [
            ("true", true),
            ("True", true),
            ("1", true),
            ("yes", true),
            ("on", true),
            ("false", false),
            ("0", false),
            ("", false),
            ("maybe", false),
        ] {
            let mut p = params("https://example.search.windows.net", "idx", "cats");
            p.use_hybrid_query = Some(raw.to_string());
            assert_eq!(p.validate().unwrap().hybrid, expected, "input {:?}", raw);
        }
    }
}
