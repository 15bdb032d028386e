//! Embedding gateway: remote provider client behind a capability trait.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::EmbeddingError;
use crate::models::EmbeddingConfig;

/// Input type hint passed to the provider.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingKind {
    /// For indexing document chunks.
    Document,
    /// For search queries.
    Query,
}

/// Converts text into fixed-dimension vectors.
///
/// Implementations are process-wide clients constructed once at startup and
/// injected where needed; tests substitute deterministic fakes. Failures are
/// propagated to the caller, never retried.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str, kind: EmbeddingKind) -> Result<Vec<f32>, EmbeddingError>;

    /// Embed several texts. Optional optimization; the default loops
    /// [`embed`](Self::embed) and correctness never depends on batching.
    async fn embed_batch(
        &self,
        texts: &[String],
        kind: EmbeddingKind,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text, kind).await?);
        }
        Ok(embeddings)
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    input: Vec<&'a str>,
    model: &'a str,
    input_type: EmbeddingKind,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Debug, Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

/// Client for a Voyage-style embeddings API.
#[derive(Debug, Clone)]
pub struct VoyageEmbeddings {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl VoyageEmbeddings {
    /// Create a client for the configured provider.
    pub fn new(config: &EmbeddingConfig, api_key: String) -> Result<Self, EmbeddingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmbeddingError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// Base URL of the embedding provider.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl EmbeddingProvider for VoyageEmbeddings {
    async fn embed(&self, text: &str, kind: EmbeddingKind) -> Result<Vec<f32>, EmbeddingError> {
        let url = format!("{}/v1/embeddings", self.base_url);
        let request = EmbedRequest {
            input: vec![text],
            model: &self.model,
            input_type: kind,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Provider { status, body });
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbeddingError::InvalidResponse("empty embedding data".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> VoyageEmbeddings {
        let config = EmbeddingConfig {
            base_url: server.base_url(),
            ..Default::default()
        };
        VoyageEmbeddings::new(&config, "test-key".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_embed_parses_vector() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/embeddings")
                    .header("authorization", "Bearer test-key")
                    .json_body_partial(r#"{"input": ["hello"], "input_type": "query"}"#);
                then.status(200)
                    .json_body(json!({"data": [{"embedding": [0.25, -0.5, 1.0]}]}));
            })
            .await;

        let embedding = client_for(&server)
            .embed("hello", EmbeddingKind::Query)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(embedding, vec![0.25, -0.5, 1.0]);
    }

    #[tokio::test]
    async fn test_provider_failure_is_surfaced() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/embeddings");
                then.status(429).body("quota exceeded");
            })
            .await;

        let err = client_for(&server)
            .embed("hello", EmbeddingKind::Document)
            .await
            .unwrap_err();

        match err {
            EmbeddingError::Provider { status, body } => {
                assert_eq!(status, 429);
                assert!(body.contains("quota"));
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_data_is_invalid() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/embeddings");
                then.status(200).json_body(json!({"data": []}));
            })
            .await;

        let err = client_for(&server)
            .embed("hello", EmbeddingKind::Document)
            .await
            .unwrap_err();
        assert!(matches!(err, EmbeddingError::InvalidResponse(_)));
    }
}
