//! Request and response shapes for the managed search index, and the
//! client trait the handlers depend on.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const SEMANTIC_CONFIGURATION: &str = "my-semantic-config";
pub const SEMANTIC_TOP: u32 = 3;

/// Search service endpoint and index a request is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTarget {
    pub endpoint: String,
    pub index_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorQueryKind {
    Vector,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorQuery {
    pub kind: VectorQueryKind,
    pub vector: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

impl VectorQuery {
    pub fn new(vector: Vec<f32>, k: Option<u32>, fields: Option<String>) -> Self {
        Self {
            kind: VectorQueryKind::Vector,
            vector,
            k,
            fields,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Semantic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    Extractive,
}

/// Body of `POST /indexes/{index}/docs/search`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub vector_queries: Vec<VectorQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_type: Option<QueryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_configuration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captions: Option<ExtractionMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<ExtractionMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,
}

impl SearchRequest {
    /// Pure vector search, or hybrid when `search_text` is set.
    pub fn vector(vector_query: VectorQuery, search_text: Option<String>) -> Self {
        Self {
            search: search_text,
            vector_queries: vec![vector_query],
            ..Default::default()
        }
    }

    /// Hybrid search with semantic reranking, extractive captions and answers.
    pub fn semantic(vector_query: VectorQuery, search_text: String) -> Self {
        Self {
            search: Some(search_text),
            vector_queries: vec![vector_query],
            query_type: Some(QueryType::Semantic),
            semantic_configuration: Some(SEMANTIC_CONFIGURATION.to_string()),
            captions: Some(ExtractionMode::Extractive),
            answers: Some(ExtractionMode::Extractive),
            top: Some(SEMANTIC_TOP),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SemanticAnswer {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub highlights: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Caption {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub highlights: Option<String>,
}

pub type SearchRow = Map<String, Value>;

const SEARCH_KEY_PREFIX: &str = "@search.";

/// Renames the service's `@search.*` annotations to snake case
/// (`@search.rerankerScore` becomes `@search.reranker_score`). Document
/// fields are left untouched.
pub fn normalize_row_keys(row: SearchRow) -> SearchRow {
    row.into_iter()
        .map(|(key, value)| match key.strip_prefix(SEARCH_KEY_PREFIX) {
            Some(annotation) => (format!("{}{}", SEARCH_KEY_PREFIX, snake_case(annotation)), value),
            None => (key, value),
        })
        .collect()
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub value: Vec<SearchRow>,
    #[serde(rename = "@search.answers", default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<SemanticAnswer>>,
    /// Body to post for the next page, when the service split the results.
    #[serde(
        rename = "@search.nextPageParameters",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_page_parameters: Option<Value>,
}

/// Queries a search index. Implementations return every result row the
/// service produces for the request, across pages, with annotation keys
/// normalized by [`normalize_row_keys`].
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, target: &SearchTarget, request: &SearchRequest) -> Result<SearchResults>;
}
