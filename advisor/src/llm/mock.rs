//! Mock LLM for tests and local runs without a provider.
//!
//! Returns a fixed text or a fixed error, counts calls and remembers the last request so
//! tests can assert that the provider was (or was not) contacted and what it was sent.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::{CompletionRequest, LlmClient, LlmError, LlmResponse};

enum Outcome {
    Content(String),
    Error(String),
}

/// Mock LLM: fixed content or fixed [`LlmError::Api`].
pub struct MockLlm {
    outcome: Outcome,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

/// A schema-valid answer with two opportunities.
pub const SAMPLE_ANALYSIS_JSON: &str = r#"{
  "general_analysis": "The **Contabilitate** process has **2** automatable steps.",
  "optimization_opportunities": [
    {
      "original_step": "Introducere manuală a facturilor în Excel",
      "inefficiency_type": "**Repetitive**",
      "estimated_impact": "**Saves 5 hours/week**",
      "recommended_solution": "**OCR + RPA automation**",
      "suggested_tool": "**UiPath**",
      "relevant_prompt_or_code": "N/A"
    },
    {
      "original_step": "Verificarea manuală a totalurilor",
      "inefficiency_type": "**Error-prone**",
      "estimated_impact": "**80% fewer errors**",
      "recommended_solution": "**Spreadsheet validation script**",
      "suggested_tool": "**Google Apps Script**",
      "relevant_prompt_or_code": "function checkTotals() { /* ... */ }"
    }
  ],
  "next_steps": "**Start with the invoice import**, it pays back fastest."
}"#;

impl MockLlm {
    /// Returns `content` on every call.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Content(content.into()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Returns [`SAMPLE_ANALYSIS_JSON`] on every call.
    pub fn with_sample_analysis() -> Self {
        Self::with_content(SAMPLE_ANALYSIS_JSON)
    }

    /// Fails every call with [`LlmError::Api`] carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Error(message.into()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Number of `invoke` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The request passed to the most recent `invoke`.
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().ok().and_then(|g| g.clone())
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, request: &CompletionRequest) -> Result<LlmResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }
        match &self.outcome {
            Outcome::Content(c) => Ok(LlmResponse {
                content: c.clone(),
                usage: None,
            }),
            Outcome::Error(e) => Err(LlmError::Api(e.clone())),
        }
    }
}
