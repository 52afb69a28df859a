use anyhow::Result;
use async_trait::async_trait;

use crate::errors::ServiceError;

pub const EMPTY_TEXT_MESSAGE: &str = "Please provide text in the query string.";

/// Turns text into an embedding vector via an external model.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    async fn embed(&self, text: &str, model: &str) -> Result<Vec<f32>>;
}

/// Embed `text` with `model`. Empty text is rejected without calling the client.
pub async fn generate_embedding(
    client: &dyn EmbeddingClient,
    text: &str,
    model: &str,
) -> Result<Vec<f32>, ServiceError> {
    if text.is_empty() {
        return Err(ServiceError::bad_request(EMPTY_TEXT_MESSAGE));
    }

    client.embed(text, model).await.map_err(|e| {
        tracing::error!(model, error = %e, "Failed to generate embedding");
        ServiceError::Embedding(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingClient {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl EmbeddingClient for CountingClient {
        async fn embed(&self, _text: &str, _model: &str) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(anyhow!("401 Unauthorized"))
            } else {
                Ok(vec![0.5, -0.25])
            }
        }
    }

    fn client(fail: bool) -> CountingClient {
        CountingClient {
            calls: AtomicUsize::new(0),
            fail,
        }
    }

    #[tokio::test]
    async fn test_empty_text_skips_client() {
        let client = client(false);
        let err = generate_embedding(&client, "", "model").await.unwrap_err();

        assert!(matches!(err, ServiceError::BadRequest(ref m) if m == EMPTY_TEXT_MESSAGE));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_returns_vector() {
        let client = client(false);
        let vector = generate_embedding(&client, "cats", "model").await.unwrap();

        assert_eq!(vector, vec![0.5, -0.25]);
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_client_failure_maps_to_embedding_error() {
        let client = client(true);
        let err = generate_embedding(&client, "cats", "model").await.unwrap_err();

        assert!(matches!(err, ServiceError::Embedding(ref m) if m.contains("401")));
    }
}
