#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use search_functions::services::{EmbeddingClient, SearchClient, SearchRequest, SearchResults, SearchTarget};
use search_functions::AppState;

pub const MODEL: &str = "text-embedding-3-small";

/// Embedding fake returning a fixed vector and recording each call.
pub struct RecordingEmbedder {
    vector: Vec<f32>,
    fail: bool,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl RecordingEmbedder {
    pub fn returning(vector: Vec<f32>) -> Arc<Self> {
        Arc::new(Self { vector, fail: false, calls: Mutex::new(Vec::new()) })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { vector: Vec::new(), fail: true, calls: Mutex::new(Vec::new()) })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl EmbeddingClient for RecordingEmbedder {
    async fn embed(&self, text: &str, model: &str) -> Result<Vec<f32>> {
        self.calls.lock().unwrap().push((text.to_string(), model.to_string()));
        if self.fail {
            return Err(anyhow!("OpenAI API error (401 Unauthorized): invalid api key"));
        }
        Ok(self.vector.clone())
    }
}

/// Search fake returning canned results and recording each request.
pub struct RecordingSearcher {
    results: Option<SearchResults>,
    pub calls: Mutex<Vec<(SearchTarget, SearchRequest)>>,
}

impl RecordingSearcher {
    pub fn returning(results: SearchResults) -> Arc<Self> {
        Arc::new(Self { results: Some(results), calls: Mutex::new(Vec::new()) })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { results: None, calls: Mutex::new(Vec::new()) })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> (SearchTarget, SearchRequest) {
        self.calls.lock().unwrap().last().cloned().expect("search was not called")
    }
}

#[async_trait]
impl SearchClient for RecordingSearcher {
    async fn search(&self, target: &SearchTarget, request: &SearchRequest) -> Result<SearchResults> {
        self.calls.lock().unwrap().push((target.clone(), request.clone()));
        self.results
            .clone()
            .ok_or_else(|| anyhow!("Search service error (404 Not Found): index not found"))
    }
}

pub fn state(embedder: Arc<RecordingEmbedder>, searcher: Arc<RecordingSearcher>) -> AppState {
    AppState::new(MODEL, embedder, searcher)
}
