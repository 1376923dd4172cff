//! Ollama chat client.
//!
//! Implements the application's model port against Ollama's `/api/chat`
//! endpoint. Requests are single-turn, non-streaming chats; the reply text
//! is returned verbatim for the application layer to parse.

use async_trait::async_trait;
use cv_screen_application::{ApplicationError, LlmPort};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{Error, Result};

/// Ollama client configuration.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server
    pub endpoint: String,
    /// Model name passed on every request
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:11434".to_string(),
            model: "llama3:latest".to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// HTTP client for an Ollama server.
#[derive(Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    chat_url: String,
    model: String,
}

impl OllamaClient {
    /// Create a new client from configuration.
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to create HTTP client: {e}")))?;

        let chat_url = format!("{}/api/chat", config.endpoint.trim_end_matches('/'));

        Ok(Self {
            http,
            chat_url,
            model: config.model,
        })
    }

    /// Send a single-turn chat, returning the assistant reply text.
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_chars = prompt.len()))]
    pub async fn chat(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let response = self
            .http
            .post(&self.chat_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(format!("Model request timed out: {e}"))
                } else {
                    Error::Llm(format!("Model request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Llm(format!(
                "Model endpoint returned {status}: {body}"
            )));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Llm(format!("Malformed model response: {e}")))?;

        debug!(reply_chars = reply.message.content.len(), "Model replied");
        Ok(reply.message.content)
    }
}

#[async_trait]
impl LlmPort for OllamaClient {
    async fn complete(&self, prompt: &str) -> std::result::Result<String, ApplicationError> {
        self.chat(prompt).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(endpoint: String) -> OllamaConfig {
        OllamaConfig {
            endpoint,
            model: "llama3:latest".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_chat_returns_reply_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama3:latest",
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": {"role": "assistant", "content": "{\"match_score\": 0.8}"}
            })))
            .mount(&server)
            .await;

        let client = OllamaClient::new(config(server.uri())).unwrap();
        let reply = client.chat("score this CV").await.unwrap();
        assert_eq!(reply, "{\"match_score\": 0.8}");
    }

    #[tokio::test]
    async fn test_chat_surfaces_server_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
            .mount(&server)
            .await;

        let client = OllamaClient::new(config(server.uri())).unwrap();
        let err = client.chat("score this CV").await.unwrap_err();
        assert!(matches!(err, Error::Llm(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_chat_rejects_malformed_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = OllamaClient::new(config(server.uri())).unwrap();
        assert!(client.chat("prompt").await.is_err());
    }

    #[test]
    fn test_chat_url_normalization() {
        let client = OllamaClient::new(config("http://localhost:11434/".to_string())).unwrap();
        assert_eq!(client.chat_url, "http://localhost:11434/api/chat");
    }
}
