//! LLM Client — the single point of entry for all Gemini API calls.
//!
//! One POST per call: no retries, no streaming. The raw response body is
//! returned untouched; `resume::normalize` owns the envelope shape.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ApiKey;
use crate::resume::prompts::PromptPayload;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("status {status}: {body}")]
    Api { status: u16, body: String },
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn single_text(text: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text }],
            }],
        }
    }
}

/// A generative-text backend. Carried in `AppState` as `Arc<dyn GenerativeModel>`.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate_content(
        &self,
        api_key: &ApiKey,
        prompt: &PromptPayload,
    ) -> Result<Value, LlmError>;
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_content(
        &self,
        api_key: &ApiKey,
        prompt: &PromptPayload,
    ) -> Result<Value, LlmError> {
        let request_body = GenerateContentRequest::single_text(prompt.as_str());

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key.expose())])
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini API returned {}: {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Value = response.json().await?;
        debug!("Gemini call succeeded (prompt_chars={})", prompt.as_str().len());

        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    use crate::extraction::ExtractedText;
    use crate::resume::prompts::build_prompt;

    fn key() -> ApiKey {
        ApiKey::new("test-key").unwrap()
    }

    fn prompt() -> PromptPayload {
        build_prompt(&ExtractedText::from_trusted("Jane Doe"))
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GenerateContentRequest::single_text("hello")).unwrap();
        assert_eq!(body, json!({"contents": [{"parts": [{"text": "hello"}]}]}));
    }

    #[tokio::test]
    async fn test_sends_key_as_query_param_and_returns_raw_body() {
        let mut server = mockito::Server::new_async().await;
        let envelope = json!({"candidates": [{"content": {"parts": [{"text": "{}"}]}}]});
        let mock = server
            .mock("POST", "/generate")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{"parts": [{"text": prompt().as_str()}]}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope.to_string())
            .create_async()
            .await;

        let client = GeminiClient::new(format!("{}/generate", server.url()));
        let response = client.generate_content(&key(), &prompt()).await.unwrap();

        assert_eq!(response, envelope);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_carries_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/generate")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let client = GeminiClient::new(format!("{}/generate", server.url()));
        let err = client.generate_content(&key(), &prompt()).await.unwrap_err();

        match err {
            LlmError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
