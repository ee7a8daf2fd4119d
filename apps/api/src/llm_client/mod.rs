/// LLM Client — the single point of entry for all completion-provider calls.
///
/// No other module may call the OpenAI API directly. The API key and model
/// are supplied per call because both belong to the user's session, not to
/// the process.
///
/// Calls are never retried: each one succeeds or fails within its request.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Provider returned no models")]
    NoModels,
}

/// Model identifiers available to a key, in the order the provider lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelCatalog {
    models: Vec<String>,
}

impl ModelCatalog {
    pub fn new(models: Vec<String>) -> Self {
        Self { models }
    }

    pub fn contains(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(String::as_str)
    }
}

/// The completion provider seam. Swap implementations without touching handlers.
///
/// Carried in `AppState` as `Arc<dyn CompletionProvider>`.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends `prompt` with the shared system prompt and returns the generated text.
    async fn complete(&self, prompt: &str, api_key: &str, model: &str) -> Result<String, LlmError>;

    /// Lists the models `api_key` may use. An empty list is an error.
    async fn list_models(&self, api_key: &str) -> Result<ModelCatalog, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_completion_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if it has any non-blank content.
    fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Wraps the OpenAI REST API (`/models` and `/chat/completions`).
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    max_tokens: u32,
}

impl OpenAiClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        max_tokens: u32,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into(),
            max_tokens,
        })
    }

    /// Turns a non-success response into `LlmError::Api`, preferring the
    /// provider's own error message over the raw body.
    async fn api_error(response: reqwest::Response) -> LlmError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        warn!("OpenAI API returned {status}");
        LlmError::Api {
            status: status.as_u16(),
            message: provider_message(body),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, prompt: &str, api_key: &str, model: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model,
            max_completion_tokens: self.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompts::HISTORIAN_SYSTEM,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let chat: ChatResponse = response.json().await?;

        if let Some(usage) = &chat.usage {
            debug!(
                "Completion succeeded: model={model}, prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        chat.text()
            .map(|t| t.trim().to_string())
            .ok_or(LlmError::EmptyContent)
    }

    async fn list_models(&self, api_key: &str) -> Result<ModelCatalog, LlmError> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let list: ModelList = response.json().await?;
        let catalog = ModelCatalog::new(list.data.into_iter().map(|m| m.id).collect());
        if catalog.is_empty() {
            return Err(LlmError::NoModels);
        }

        debug!("Fetched {} models", catalog.models.len());
        Ok(catalog)
    }
}

/// Extracts `error.message` from an OpenAI error body, or returns the body as-is.
fn provider_message(body: String) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}
