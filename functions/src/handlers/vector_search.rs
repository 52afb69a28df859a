use actix_web::{web, HttpRequest, HttpResponse};

use crate::errors::ServiceError;
use crate::models::SearchParams;
use crate::services::{generate_embedding, SearchRequest};
use crate::state::AppState;

/// Vector similarity search, optionally hybrid with lexical matching.
/// Responds with the raw result rows as a JSON array.
pub async fn vector_similarity_search(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServiceError> {
    let input = SearchParams::from_query(req.query_string()).validate()?;
    tracing::info!(
        index = %input.index_name,
        hybrid = input.hybrid,
        k = ?input.k,
        "Vector similarity search request"
    );

    let embedding =
        generate_embedding(state.embedder.as_ref(), &input.query, &state.embedding_model).await?;

    let search_text = input.hybrid.then(|| input.query.clone());
    let request = SearchRequest::vector(input.vector_query(embedding), search_text);

    let results = state
        .searcher
        .search(&input.target(), &request)
        .await
        .map_err(|e| {
            tracing::error!(index = %input.index_name, error = %e, "Vector search failed");
            ServiceError::Search(e.to_string())
        })?;

    tracing::info!(rows = results.value.len(), "Vector search completed");
    Ok(HttpResponse::Ok().json(results.value))
}
