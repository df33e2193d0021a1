//! # Advisor
//!
//! Turns a free-text business process description into a structured list of
//! automation opportunities by asking an LLM for schema-constrained JSON.
//!
//! ## Flow
//!
//! 1. [`AnalysisRequest`] is validated into a [`ValidatedRequest`] (description required,
//!    domain defaulted to [`DEFAULT_DOMAIN`] or required, see [`DomainPolicy`]).
//! 2. [`prompt::build_user_prompt`] embeds the domain and description verbatim.
//! 3. The prompt and the static [`ResponseSchema`] derived from [`AnalysisResult`] go to the
//!    provider through [`LlmClient`] in one call.
//! 4. The provider text is decoded back into [`AnalysisResult`]; anything that does not match
//!    the schema is an [`AnalysisError::UpstreamFormat`].
//!
//! ## Main modules
//!
//! - [`model`]: [`AnalysisRequest`], [`AnalysisResult`], [`OptimizationOpportunity`].
//! - [`schema`]: [`ResponseSchema`], [`analysis_result_schema`].
//! - [`llm`]: [`LlmClient`] trait, [`ChatOpenAI`] (OpenAI-compatible, Gemini by default), [`MockLlm`].
//! - [`service`]: [`AnalysisService`], the per-request state machine.
//! - [`error`]: [`AnalysisError`].
//!
//! Key types are re-exported at crate root: `use advisor::{AnalysisService, AnalysisRequest};`.

pub mod error;
pub mod llm;
pub mod message;
pub mod model;
pub mod prompt;
pub mod schema;
pub mod service;

pub use error::AnalysisError;
pub use llm::{
    ChatOpenAI, ChatOpenAIConfig, CompletionRequest, LlmClient, LlmError, LlmResponse, LlmUsage,
    MockLlm, GEMINI_OPENAI_BASE_URL, SAMPLE_ANALYSIS_JSON,
};
pub use message::Message;
pub use model::{
    AnalysisRequest, AnalysisResult, DomainPolicy, OptimizationOpportunity, ValidatedRequest,
};
pub use prompt::{build_user_prompt, DEFAULT_DOMAIN, SYSTEM_PROMPT};
pub use schema::{analysis_result_schema, ResponseSchema};
pub use service::{parse_analysis_result, AnalysisOptions, AnalysisService, Stage};
