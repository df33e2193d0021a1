//! Analysis error taxonomy.
//!
//! Every failure of [`AnalysisService::analyze`](crate::AnalysisService::analyze) is one of
//! these variants; the HTTP layer maps each to a status code and an `{"error": ...}` body.

use thiserror::Error;

use crate::llm::LlmError;

/// Terminal failure of one analysis request.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A required input field is missing or empty. Reported as 400.
    #[error("{0}")]
    Validation(String),

    /// The provider client was never initialized (missing credential or construction failure).
    /// Reported as 503; the provider is not contacted.
    #[error("AI client could not be initialized; check the GEMINI_API_KEY credential")]
    ServiceUnavailable,

    /// The provider call failed (auth, quota, timeout, network, empty answer). Reported as 500.
    #[error("error while processing the AI request: {0}")]
    Upstream(String),

    /// The provider answered with text that does not decode into the response schema.
    /// Reported as 500.
    #[error("AI returned an invalid JSON format ({0}); try again or rephrase the description")]
    UpstreamFormat(String),
}

impl AnalysisError {
    /// Short machine-readable label, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Validation(_) => "validation",
            AnalysisError::ServiceUnavailable => "service_unavailable",
            AnalysisError::Upstream(_) => "upstream",
            AnalysisError::UpstreamFormat(_) => "upstream_format",
        }
    }
}

impl From<LlmError> for AnalysisError {
    fn from(e: LlmError) -> Self {
        AnalysisError::Upstream(e.to_string())
    }
}
