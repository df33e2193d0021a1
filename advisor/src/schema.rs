//! Structured-output schema sent with every completion request.
//!
//! Generated once from [`AnalysisResult`] with `schemars`: subschemas are inlined (no `$ref`
//! or `definitions`) and the `$schema` meta key is dropped, since OpenAI-compatible
//! `json_schema` response formats accept only a plain object schema.

use once_cell::sync::Lazy;
use schemars::gen::SchemaSettings;
use serde_json::Value;

use crate::model::AnalysisResult;

/// Name under which the schema is declared to the provider.
pub const ANALYSIS_SCHEMA_NAME: &str = "analysis_result";

static ANALYSIS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    let settings = SchemaSettings::draft07().with(|s| {
        s.inline_subschemas = true;
        s.meta_schema = None;
    });
    let root = settings
        .into_generator()
        .into_root_schema_for::<AnalysisResult>();
    serde_json::to_value(root).unwrap_or_default()
});

/// JSON schema of [`AnalysisResult`] (all fields required, `additionalProperties: false`).
pub fn analysis_result_schema() -> &'static Value {
    &ANALYSIS_SCHEMA
}

/// Response-format constraint attached to a completion request.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseSchema {
    pub name: String,
    pub description: Option<String>,
    pub schema: Value,
    /// Ask the provider to follow the schema exactly.
    pub strict: bool,
}

impl ResponseSchema {
    /// The schema for [`AnalysisResult`], strict.
    pub fn analysis_result() -> Self {
        Self {
            name: ANALYSIS_SCHEMA_NAME.to_string(),
            description: Some(
                "Automation opportunities identified in a business process".to_string(),
            ),
            schema: analysis_result_schema().clone(),
            strict: true,
        }
    }
}
