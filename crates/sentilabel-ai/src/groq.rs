//! Groq chat-completions client (OpenAI-compatible API).

use std::fmt;

use async_trait::async_trait;
use sentilabel_core::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::oracle::{Oracle, OracleError};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Connection and sampling settings for [`GroqClient`].
#[derive(Clone)]
pub struct GroqConfig {
    pub api_key: String,
    /// Like `https://api.groq.com/openai/v1` (no trailing slash needed).
    pub base_url: String,
    pub model: String,
    /// Output variability, 0.0 to 2.0. Lower is more deterministic.
    pub temperature: f32,
}

impl GroqConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::InvalidConfiguration(
                "API key is empty".into(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidConfiguration(
                "model identifier is empty".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidConfiguration(format!(
                "temperature {} is outside 0.0..=2.0",
                self.temperature
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for GroqConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// HTTP oracle backed by Groq's `/chat/completions` endpoint.
pub struct GroqClient {
    client: reqwest::Client,
    config: GroqConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl GroqClient {
    pub fn new(mut config: GroqConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        info!(
            base_url = %config.base_url,
            model = %config.model,
            temperature = config.temperature,
            "configured Groq oracle"
        );
        Ok(Self {
            client: reqwest::Client::new(),
            config,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl Oracle for GroqClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, OracleError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.config.temperature,
        };

        debug!(url = %url, payload_bytes = user.len(), "sending chat completion");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(OracleError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let response: ChatResponse = resp.json().await?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(OracleError::EmptyReply)
    }
}
