//! OpenAI Chat Completions client implementing `LlmClient` (ChatOpenAI).
//!
//! Talks to any OpenAI-compatible endpoint. The default base URL is Google's
//! OpenAI-compatible Gemini endpoint, so a `GEMINI_API_KEY` is enough to run.
//! When the request carries a [`ResponseSchema`](crate::ResponseSchema), it is sent as
//! `response_format: {"type": "json_schema", ...}` so the provider emits schema-valid JSON.
//!
//! **Interaction**: Implements `LlmClient`; used by `AnalysisService` like `MockLlm`.
//! Depends on `async_openai`.

use std::time::Duration;

use async_trait::async_trait;
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use tracing::{debug, trace};

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs, ResponseFormat,
        ResponseFormatJsonSchema,
    },
    Client,
};

use crate::llm::{CompletionRequest, LlmClient, LlmError, LlmResponse, LlmUsage};
use crate::message::Message;

/// Google's OpenAI-compatible endpoint for Gemini models.
pub const GEMINI_OPENAI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Backoff that gives up after the first failed attempt. async-openai otherwise retries 5xx
/// and rate-limit responses for up to 15 minutes; provider failures must surface at once.
fn no_retry_backoff() -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

/// Connection settings for [`ChatOpenAI`].
#[derive(Clone, Debug)]
pub struct ChatOpenAIConfig {
    pub api_key: String,
    /// API base, without the trailing `/chat/completions`.
    pub base_url: String,
    pub model: String,
    /// HTTP timeout for the single provider attempt. `None` keeps the HTTP client default
    /// (no timeout).
    pub timeout: Option<Duration>,
}

impl ChatOpenAIConfig {
    /// Config for the Gemini endpoint with the given key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: GEMINI_OPENAI_BASE_URL.to_string(),
            model: model.into(),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// OpenAI-compatible Chat Completions client.
///
/// Built once at startup and shared read-only across requests.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for ChatOpenAI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatOpenAI")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ChatOpenAI {
    /// Builds the client. Fails when the key is blank or the HTTP client cannot be built;
    /// the caller then runs without a provider.
    pub fn from_config(config: ChatOpenAIConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::MissingCredential(
                "API key is empty".to_string(),
            ));
        }
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key)
            .with_api_base(base_url.clone());

        let mut http = reqwest::Client::builder();
        if let Some(t) = config.timeout {
            http = http.timeout(t);
        }
        let http = http.build().map_err(|e| LlmError::Build(e.to_string()))?;

        Ok(Self {
            client: Client::with_config(openai_config)
                .with_http_client(http)
                .with_backoff(no_retry_backoff()),
            model: config.model,
            base_url,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn messages_to_request(messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System(s) => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(s.as_str()),
                ),
                Message::User(s) => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                ),
            })
            .collect()
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, request: &CompletionRequest) -> Result<LlmResponse, LlmError> {
        let trace_id = uuid::Uuid::new_v4().to_string();
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(Self::messages_to_request(&request.messages));

        if let Some(t) = request.temperature {
            args.temperature(t);
        }

        if let Some(ref schema) = request.response_schema {
            args.response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    description: schema.description.clone(),
                    name: schema.name.clone(),
                    schema: Some(schema.schema.clone()),
                    strict: Some(schema.strict),
                },
            });
        }

        let body = args
            .build()
            .map_err(|e| LlmError::Request(e.to_string()))?;

        let url = self.chat_completions_url();
        debug!(
            trace_id = %trace_id,
            url = %url,
            model = %self.model,
            message_count = request.messages.len(),
            temperature = ?request.temperature,
            schema = request.response_schema.as_ref().map(|s| s.name.as_str()),
            "chat completion create"
        );
        if let Ok(js) = serde_json::to_string_pretty(&body) {
            trace!(trace_id = %trace_id, request = %js, "chat completion request body");
        }

        let response = self
            .client
            .chat()
            .create(body)
            .await
            .map_err(|e| LlmError::Api(e.to_string()))?;

        if let Ok(js) = serde_json::to_string_pretty(&response) {
            trace!(trace_id = %trace_id, response = %js, "chat completion response body");
        }

        let usage = response.usage.as_ref().map(|u| LlmUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse)?;
        let content = choice.message.content.unwrap_or_default();

        debug!(
            trace_id = %trace_id,
            content_len = content.len(),
            usage = ?usage,
            "chat completion done"
        );

        Ok(LlmResponse { content, usage })
    }
}
