//! Chat completion gateway: OpenAI-compatible client behind a capability trait.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CompletionError;
use crate::models::CompletionConfig;

/// Produces an answer for a fully composed prompt.
///
/// The prompt already embeds retrieved context and conversation history, so
/// the remote call is a stateless single-turn completion. Failures are
/// propagated to the caller, never retried.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<PromptMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct PromptMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletions {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl ChatCompletions {
    /// Create a client for the configured provider.
    pub fn new(config: &CompletionConfig, api_key: String) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompletionError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl CompletionProvider for ChatCompletions {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = CompletionRequest {
            model: &self.model,
            messages: vec![PromptMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
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
            return Err(CompletionError::Provider { status, body });
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        // A missing content field persists as an empty assistant answer.
        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> ChatCompletions {
        let config = CompletionConfig {
            base_url: server.base_url(),
            ..Default::default()
        };
        ChatCompletions::new(&config, "test-key".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .header("authorization", "Bearer test-key")
                    .json_body_partial(r#"{"model": "deepseek-chat", "stream": false}"#);
                then.status(200).json_body(json!({
                    "choices": [{"message": {"role": "assistant", "content": "The answer."}}]
                }));
            })
            .await;

        let answer = client_for(&server).complete("prompt").await.unwrap();

        mock.assert_async().await;
        assert_eq!(answer, "The answer.");
    }

    #[tokio::test]
    async fn test_missing_content_becomes_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200)
                    .json_body(json!({"choices": [{"message": {"role": "assistant"}}]}));
            })
            .await;

        let answer = client_for(&server).complete("prompt").await.unwrap();
        assert_eq!(answer, "");
    }

    #[tokio::test]
    async fn test_provider_failure_is_surfaced() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(401).body("invalid api key");
            })
            .await;

        let err = client_for(&server).complete("prompt").await.unwrap_err();
        match err {
            CompletionError::Provider { status, .. } => assert_eq!(status, 401),
            other => panic!("expected provider error, got {other:?}"),
        }
    }
}
