//! HTTP functions that front an embeddings API and a managed search index:
//! a greeting echo, vector similarity search, and semantic reranking search.

pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

pub use errors::ServiceError;
pub use state::AppState;

pub const SERVICE_NAME: &str = "search-functions";
