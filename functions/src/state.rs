use std::sync::Arc;

use reqwest::Client;
use searchfn_config::AppConfig;

use crate::services::{AzureSearchClient, EmbeddingClient, OpenAiEmbeddingClient, SearchClient};

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    pub embedding_model: String,
    pub embedder: Arc<dyn EmbeddingClient>,
    pub searcher: Arc<dyn SearchClient>,
}

impl AppState {
    pub fn new(
        embedding_model: impl Into<String>,
        embedder: Arc<dyn EmbeddingClient>,
        searcher: Arc<dyn SearchClient>,
    ) -> Self {
        Self {
            embedding_model: embedding_model.into(),
            embedder,
            searcher,
        }
    }

    /// Production collaborators sharing one connection pool.
    pub fn from_config(config: &AppConfig) -> Self {
        let http = Client::new();
        Self::new(
            config.embedding_model.clone(),
            Arc::new(OpenAiEmbeddingClient::new(
                http.clone(),
                config.openai_api_key.clone(),
                config.openai_api_base.clone(),
            )),
            Arc::new(AzureSearchClient::new(
                http,
                config.search_api_key.clone(),
                config.search_api_version.clone(),
            )),
        )
    }
}
