use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::structure::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, LLMConfig};

use super::message::{ChatMessage, Conversation};

pub const CONNECTION_SENTINEL: &str =
    "Couldn't reach the language model. Double check the local LLM server is running and try again.";
pub const UNEXPECTED_SENTINEL: &str =
    "Something went wrong while talking to the language model, and it's not clear what. Please let the bot's operator know.";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("could not connect to the llm endpoint: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("llm endpoint returned status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed llm response: {0}")]
    Malformed(#[source] reqwest::Error),
    #[error("llm response contained no choices")]
    NoChoices,
}

impl ModelError {
    /// Text that is safe to relay to the channel in place of a reply.
    pub fn sentinel(&self) -> String {
        match self {
            ModelError::Transport(_) => CONNECTION_SENTINEL.to_string(),
            ModelError::Status { status, .. } => {
                format!("Error: LLM returned status {}", status.as_u16())
            }
            ModelError::Malformed(_) | ModelError::NoChoices => UNEXPECTED_SENTINEL.to_string(),
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

pub struct ClientSettings {
    pub endpoint: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl From<&LLMConfig> for ClientSettings {
    fn from(config: &LLMConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            temperature: config.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: config.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        }
    }
}

/// Client for an OpenAI-compatible chat completion endpoint, usually a local
/// model server. One attempt per query, default transport timeouts.
pub struct ModelClient {
    http: reqwest::Client,
    pub settings: ClientSettings,
}

impl ModelClient {
    pub fn new(settings: impl Into<ClientSettings>) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings: settings.into(),
        }
    }

    /// Never fails: errors are logged and turned into their sentinel text.
    pub async fn query(&self, conversation: &Conversation) -> String {
        match self.complete(conversation).await {
            Ok(content) => content,
            Err(why) => {
                log::error!("{why}");
                why.sentinel()
            }
        }
    }

    pub async fn complete(&self, conversation: &Conversation) -> Result<String, ModelError> {
        let request = CompletionRequest {
            messages: conversation.messages(),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            stream: false,
        };

        let response = self
            .http
            .post(&self.settings.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(ModelError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status { status, body });
        }

        let response: CompletionResponse = response.json().await.map_err(ModelError::Malformed)?;
        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or(ModelError::NoChoices)?
            .message
            .content;

        log::info!("LLM response received: {} characters", content.chars().count());

        Ok(content)
    }
}
