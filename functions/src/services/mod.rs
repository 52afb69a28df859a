pub mod azure;
pub mod embedding;
pub mod openai;
pub mod search;

pub use azure::AzureSearchClient;
pub use embedding::{generate_embedding, EmbeddingClient};
pub use openai::OpenAiEmbeddingClient;
pub use search::{SearchClient, SearchRequest, SearchResults, SearchTarget, VectorQuery};
