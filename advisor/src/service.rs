//! Analysis service: validate, build the constrained request, call the provider, validate the answer.
//!
//! Per-request stages, logged as the `stage` field:
//! `received → validated → dispatched → {completed | upstream_failed | validation_failed | service_unavailable}`.
//! No retries; a failed request is reported once and the caller decides whether to retry.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::error::AnalysisError;
use crate::llm::{CompletionRequest, LlmClient};
use crate::message::Message;
use crate::model::{AnalysisRequest, AnalysisResult, DomainPolicy, ValidatedRequest};
use crate::prompt::{build_user_prompt, SYSTEM_PROMPT};
use crate::schema::ResponseSchema;

/// Default sampling temperature: low, to favor deterministic structured output.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Per-request stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Received,
    Validated,
    Dispatched,
    Completed,
    UpstreamFailed,
    ValidationFailed,
    ServiceUnavailable,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Received => "received",
            Stage::Validated => "validated",
            Stage::Dispatched => "dispatched",
            Stage::Completed => "completed",
            Stage::UpstreamFailed => "upstream_failed",
            Stage::ValidationFailed => "validation_failed",
            Stage::ServiceUnavailable => "service_unavailable",
        }
    }

    /// Terminal stage reached by a failed request.
    pub fn for_error(err: &AnalysisError) -> Self {
        match err {
            AnalysisError::Validation(_) => Stage::ValidationFailed,
            AnalysisError::ServiceUnavailable => Stage::ServiceUnavailable,
            AnalysisError::Upstream(_) | AnalysisError::UpstreamFormat(_) => Stage::UpstreamFailed,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request policy knobs.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisOptions {
    pub domain_policy: DomainPolicy,
    pub temperature: f32,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            domain_policy: DomainPolicy::Defaulted,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Holds the provider client (if it could be built) for the whole process lifetime.
///
/// `client == None` is the degraded state: every valid request fails with
/// [`AnalysisError::ServiceUnavailable`] without any network call.
pub struct AnalysisService {
    client: Option<Arc<dyn LlmClient>>,
    options: AnalysisOptions,
}

impl AnalysisService {
    pub fn new(client: Option<Arc<dyn LlmClient>>, options: AnalysisOptions) -> Self {
        if client.is_none() {
            warn!("analysis service started without a provider client; requests will get 503");
        }
        Self { client, options }
    }

    /// Service with a provider client and default options.
    pub fn with_client(client: Arc<dyn LlmClient>) -> Self {
        Self::new(Some(client), AnalysisOptions::default())
    }

    /// Service without a provider client.
    pub fn degraded(options: AnalysisOptions) -> Self {
        Self::new(None, options)
    }

    /// True when a provider client is available.
    pub fn is_ready(&self) -> bool {
        self.client.is_some()
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// System + user messages, strict response schema and temperature for one request.
    pub fn build_completion_request(&self, request: &ValidatedRequest) -> CompletionRequest {
        CompletionRequest::new(vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(build_user_prompt(&request.domain, &request.description)),
        ])
        .with_response_schema(ResponseSchema::analysis_result())
        .with_temperature(self.options.temperature)
    }

    /// Runs one analysis. Validation comes first, so invalid input never reaches the provider
    /// and is reported as 400 even in degraded state.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        debug!(request_id = %request_id, stage = %Stage::Received, "analysis request");

        let result = self.run(&request_id, request).await;
        match &result {
            Ok(r) => info!(
                request_id = %request_id,
                stage = %Stage::Completed,
                opportunities = r.optimization_opportunities.len(),
                "analysis completed"
            ),
            Err(e @ AnalysisError::Validation(_)) => warn!(
                request_id = %request_id,
                stage = %Stage::for_error(e),
                error = %e,
                "analysis rejected"
            ),
            Err(e) => error!(
                request_id = %request_id,
                stage = %Stage::for_error(e),
                kind = e.kind(),
                error = %e,
                "analysis failed"
            ),
        }
        result
    }

    async fn run(
        &self,
        request_id: &str,
        request: AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        let validated = request.validate(self.options.domain_policy)?;
        debug!(
            request_id = %request_id,
            stage = %Stage::Validated,
            domain = %validated.domain,
            description_len = validated.description.len(),
            "request validated"
        );

        let client = self
            .client
            .as_ref()
            .ok_or(AnalysisError::ServiceUnavailable)?;

        let completion = self.build_completion_request(&validated);
        debug!(request_id = %request_id, stage = %Stage::Dispatched, "calling provider");
        let response = client.invoke(&completion).await?;

        parse_analysis_result(&response.content).map_err(|e| {
            error!(
                request_id = %request_id,
                raw = %response.content,
                "provider returned text that does not match the response schema"
            );
            e
        })
    }
}

/// Removes a surrounding markdown code fence (```` ```json ... ``` ````) if present.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening fence line.
    match body.split_once('\n') {
        Some((info, inner)) if !info.trim_start().starts_with(['{', '[']) => inner.trim(),
        _ => body.trim(),
    }
}

/// Decodes provider text into [`AnalysisResult`]. Anything that is not exactly the schema
/// (invalid JSON, missing or unknown fields) is [`AnalysisError::UpstreamFormat`].
pub fn parse_analysis_result(text: &str) -> Result<AnalysisResult, AnalysisError> {
    serde_json::from_str(strip_code_fence(text))
        .map_err(|e| AnalysisError::UpstreamFormat(e.to_string()))
}
