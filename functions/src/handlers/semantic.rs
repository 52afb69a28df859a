use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::Value;

use crate::errors::ServiceError;
use crate::models::{SearchParams, SemanticAnswerSummary, SemanticResultSummary, SemanticSearchResponse};
use crate::services::search::{Caption, SearchRow, SemanticAnswer};
use crate::services::{generate_embedding, SearchRequest, SearchResults};
use crate::state::AppState;

const TITLE_FIELD: &str = "title";
const URL_FIELD: &str = "url";
const RERANKER_SCORE_FIELD: &str = "@search.reranker_score";
const CAPTIONS_FIELD: &str = "@search.captions";

/// Hybrid search with semantic reranking. Responds with the extractive answers
/// and the top rows reduced to title, reranker score, url and caption.
pub async fn vector_similarity_search_semantic_reranking(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServiceError> {
    let input = SearchParams::from_query(req.query_string()).validate()?;
    tracing::info!(index = %input.index_name, k = ?input.k, "Semantic search request");

    let embedding =
        generate_embedding(state.embedder.as_ref(), &input.query, &state.embedding_model).await?;

    let request = SearchRequest::semantic(input.vector_query(embedding), input.query.clone());

    let results = state
        .searcher
        .search(&input.target(), &request)
        .await
        .map_err(|e| {
            tracing::error!(index = %input.index_name, error = %e, "Semantic search failed");
            ServiceError::Search(e.to_string())
        })?;

    let response = summarize(results);
    tracing::info!(
        answers = response.semantic_answers.len(),
        rows = response.results.len(),
        "Semantic search completed"
    );
    Ok(HttpResponse::Ok().json(response))
}

/// Reshape raw search output, keeping the service's ordering. Fields the
/// service left out come through as null.
pub fn summarize(results: SearchResults) -> SemanticSearchResponse {
    let semantic_answers = results
        .answers
        .unwrap_or_default()
        .into_iter()
        .map(summarize_answer)
        .collect();

    let results = results.value.iter().map(summarize_row).collect();

    SemanticSearchResponse {
        semantic_answers,
        results,
    }
}

fn summarize_answer(answer: SemanticAnswer) -> SemanticAnswerSummary {
    SemanticAnswerSummary {
        text: prefer_highlights(answer.highlights, answer.text),
        score: answer.score,
    }
}

fn summarize_row(row: &SearchRow) -> SemanticResultSummary {
    SemanticResultSummary {
        title: present(row.get(TITLE_FIELD)),
        reranker_score: row.get(RERANKER_SCORE_FIELD).and_then(Value::as_f64),
        url: present(row.get(URL_FIELD)),
        caption: first_caption(row)
            .and_then(|caption| prefer_highlights(caption.highlights, caption.text)),
    }
}

fn first_caption(row: &SearchRow) -> Option<Caption> {
    let first = row.get(CAPTIONS_FIELD)?.as_array()?.first()?.clone();
    serde_json::from_value(first).ok()
}

fn prefer_highlights(highlights: Option<String>, text: Option<String>) -> Option<String> {
    highlights.filter(|h| !h.is_empty()).or(text)
}

fn present(value: Option<&Value>) -> Option<Value> {
    value.filter(|v| !v.is_null()).cloned()
}
