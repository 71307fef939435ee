//! OpenAI chat completion client.
//!
//! Sends the whole conversation to `POST {base}/chat/completions` and returns
//! the first choice's text. No streaming, no structured-output mode: schema
//! handling is done by [`crate::extraction`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{check_status, http_client};
use crate::config::{ResearchConfig, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::error::{ProviderError, ProviderResult, ResearchError};
use crate::security::SecretString;
use crate::traits::model::{ChatMessage, LanguageModel};

/// Production API root.
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// OpenAI chat client.
///
/// ```rust,ignore
/// let model = OpenAiChat::new("sk-...")?.with_model("gpt-4o-mini");
/// let text = model.complete(&[ChatMessage::user("Hello")]).await?;
/// ```
#[derive(Clone)]
pub struct OpenAiChat {
    client: Client,
    api_key: SecretString,
    model: String,
    temperature: f32,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiChat {
    pub fn new(api_key: impl Into<SecretString>) -> ProviderResult<Self> {
        Ok(Self {
            client: http_client(REQUEST_TIMEOUT)?,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            base_url: OPENAI_API_URL.to_string(),
        })
    }

    /// Build from config: key, model, temperature and base URL override.
    pub fn from_config(config: &ResearchConfig) -> Result<Self, ResearchError> {
        if config.openai_api_key.is_empty() {
            return Err(ResearchError::MissingCredential("OPENAI_API_KEY"));
        }

        let mut chat = Self::new(config.openai_api_key.clone())?
            .with_model(&config.model)
            .with_temperature(config.temperature);
        if let Some(url) = &config.openai_base_url {
            chat = chat.with_base_url(url);
        }
        Ok(chat)
    }

    /// Set the chat model (default: gpt-4o).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set a custom base URL (Azure, proxies, test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LanguageModel for OpenAiChat {
    async fn complete(&self, messages: &[ChatMessage]) -> ProviderResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        };

        debug!(model = %self.model, messages = messages.len(), "Sending chat completion");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose())
            .json(&request)
            .send()
            .await?;

        let chat: ChatResponse = check_status(response).await?.json().await?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(ProviderError::EmptyResponse("openai"))
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn chat(server: &MockServer) -> OpenAiChat {
        OpenAiChat::new("sk-test").unwrap().with_base_url(server.base_url())
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer sk-test")
                .json_body(json!({
                    "model": "gpt-4o",
                    "messages": [
                        { "role": "system", "content": "be terse" },
                        { "role": "user", "content": "hi" }
                    ],
                    "temperature": 0.5
                }));
            then.status(200).json_body(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "hello" } },
                    { "message": { "role": "assistant", "content": "ignored" } }
                ]
            }));
        });

        let text = chat(&server)
            .with_temperature(0.5)
            .complete(&[ChatMessage::system("be terse"), ChatMessage::user("hi")])
            .await
            .unwrap();

        mock.assert();
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn test_no_choices_is_empty_response() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({ "choices": [] }));
        });

        let err = chat(&server)
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::EmptyResponse("openai")));
    }

    #[tokio::test]
    async fn test_server_error_keeps_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(500).body("upstream down");
        });

        let err = chat(&server)
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_non_json_body_is_parse_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).body("<html>gateway</html>");
        });

        let err = chat(&server)
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[test]
    fn test_from_config_applies_model_settings() {
        let config = ResearchConfig::new("fc-1", "sk-1")
            .with_model("gpt-4o-mini")
            .with_temperature(0.3);
        let chat = OpenAiChat::from_config(&config).unwrap();
        assert_eq!(chat.model(), "gpt-4o-mini");
        assert_eq!(chat.temperature, 0.3);
    }
}
