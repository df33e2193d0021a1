//! LLM client abstraction for the analysis call.
//!
//! [`AnalysisService`](crate::AnalysisService) depends on a callable that takes messages plus an
//! optional response schema and returns the assistant text; this module defines the trait,
//! the OpenAI-compatible implementation and a mock.

mod mock;
mod openai;

pub use mock::{MockLlm, SAMPLE_ANALYSIS_JSON};
pub use openai::{ChatOpenAI, ChatOpenAIConfig, GEMINI_OPENAI_BASE_URL};

use async_trait::async_trait;
use thiserror::Error;

use crate::message::Message;
use crate::schema::ResponseSchema;

/// Provider-side failure. Converted into [`AnalysisError::Upstream`](crate::AnalysisError::Upstream)
/// by the service.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No credential configured; the client cannot be built.
    #[error("missing provider credential: {0}")]
    MissingCredential(String),

    /// HTTP client or provider config could not be built.
    #[error("provider client build failed: {0}")]
    Build(String),

    /// The request could not be assembled.
    #[error("provider request build failed: {0}")]
    Request(String),

    /// The provider call failed: auth, quota, timeout, network or an error body.
    #[error("provider API error: {0}")]
    Api(String),

    /// The provider answered without any choice.
    #[error("provider returned no choices")]
    EmptyResponse,
}

/// Token usage for one call, when the provider reports it.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LlmUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Assistant text (expected to be JSON when a schema was given) and optional usage.
#[derive(Clone, Debug, Default)]
pub struct LlmResponse {
    pub content: String,
    pub usage: Option<LlmUsage>,
}

/// One completion call: messages, optional structured-output constraint, sampling temperature.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    /// When set, the provider is asked to emit JSON matching this schema.
    pub response_schema: Option<ResponseSchema>,
    /// Lower is more deterministic. `None` keeps the provider default.
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    pub fn with_response_schema(mut self, schema: ResponseSchema) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// LLM client: one request/response round trip, no retries.
///
/// Implementations must be safe to share across concurrent requests; the service holds one
/// instance behind an `Arc` for the whole process lifetime.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn invoke(&self, request: &CompletionRequest) -> Result<LlmResponse, LlmError>;
}
