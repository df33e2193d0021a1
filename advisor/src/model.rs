//! Request and result types.
//!
//! [`AnalysisResult`] and [`OptimizationOpportunity`] double as the structured-output schema
//! (see [`crate::schema`]); field doc comments become schema descriptions the model reads.
//! Both reject unknown fields so local decoding enforces the same contract as the provider.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::prompt::DEFAULT_DOMAIN;

/// Body of `POST /api/analyze`.
///
/// Both fields are optional on the wire so that a missing field is reported as a validation
/// error with a readable message instead of a decode failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Domain label (e.g. "Accounting"). Wire name `domeniu`; `domain` is accepted too.
    #[serde(default, rename = "domeniu", alias = "domain")]
    pub domain: Option<String>,
    /// Free-text process description. Required, non-empty.
    #[serde(default)]
    pub description: Option<String>,
}

/// Whether a missing domain is defaulted or rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DomainPolicy {
    /// Missing or blank domain becomes [`DEFAULT_DOMAIN`].
    #[default]
    Defaulted,
    /// Missing or blank domain is a validation error.
    Required,
}

/// Request after validation: both fields present. Values are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub domain: String,
    pub description: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl AnalysisRequest {
    pub fn new(domain: Option<&str>, description: Option<&str>) -> Self {
        Self {
            domain: domain.map(str::to_string),
            description: description.map(str::to_string),
        }
    }

    /// Checks required fields. Description is always required; domain per `policy`.
    /// Whitespace-only values count as missing.
    pub fn validate(self, policy: DomainPolicy) -> Result<ValidatedRequest, AnalysisError> {
        let description = non_blank(self.description).ok_or_else(|| {
            AnalysisError::Validation("The process description is empty.".to_string())
        })?;
        let domain = match (non_blank(self.domain), policy) {
            (Some(d), _) => d,
            (None, DomainPolicy::Defaulted) => DEFAULT_DOMAIN.to_string(),
            (None, DomainPolicy::Required) => {
                return Err(AnalysisError::Validation(
                    "The domain (domeniu) is required.".to_string(),
                ))
            }
        };
        Ok(ValidatedRequest {
            domain,
            description,
        })
    }
}

/// One inefficient process step paired with an automation remedy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct OptimizationOpportunity {
    /// The exact description of the original step, taken from the user's text.
    pub original_step: String,
    /// Kind of inefficiency, e.g. Repetitive, Error-prone, Bottleneck, Waiting time. Use **bold**.
    pub inefficiency_type: String,
    /// Estimated impact, e.g. Saves 3 hours/week, 80% fewer errors. Use **bold**.
    pub estimated_impact: String,
    /// Recommended solution, e.g. RPA automation, Low-code workflow, API integration. Use **bold**.
    pub recommended_solution: String,
    /// Suggested tool, e.g. UiPath, Zapier, Google Apps Script, Python. Use **bold**.
    pub suggested_tool: String,
    /// A detailed prompt or a code snippet relevant to the solution. Use 'N/A' when not needed.
    pub relevant_prompt_or_code: String,
}

/// Structured recommendation returned to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AnalysisResult {
    /// A general summary of the process, including the selected domain and the number of
    /// problems identified. Use **bold**.
    pub general_analysis: String,
    /// A list of at least 2-3 steps that can be automated.
    pub optimization_opportunities: Vec<OptimizationOpportunity>,
    /// A short paragraph encouraging the user to move on to implementation. Use **bold**.
    pub next_steps: String,
}
