//! Builds the provider client and the analysis service from [`ServiceSettings`].
//!
//! A missing credential or a client construction failure is not fatal: the server starts
//! degraded and answers 503 to valid analysis requests.

use std::sync::Arc;

use advisor::{
    AnalysisOptions, AnalysisService, ChatOpenAI, ChatOpenAIConfig, DomainPolicy, LlmClient,
};
use config::ServiceSettings;
use tracing::{info, warn};

/// The provider client, or `None` (degraded) when it cannot be built.
pub fn build_client(settings: &ServiceSettings) -> Option<Arc<dyn LlmClient>> {
    let Some(api_key) = settings.api_key.clone() else {
        warn!("GEMINI_API_KEY is not set; AI client not initialized, analysis requests will get 503");
        return None;
    };

    let mut cfg = ChatOpenAIConfig::new(api_key, settings.model.clone());
    if let Some(base_url) = &settings.base_url {
        cfg = cfg.with_base_url(base_url.clone());
    }
    if let Some(timeout) = settings.provider_timeout {
        cfg = cfg.with_timeout(timeout);
    }

    match ChatOpenAI::from_config(cfg) {
        Ok(client) => {
            info!(model = %client.model(), "AI client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!(error = %e, "AI client initialization failed; analysis requests will get 503");
            None
        }
    }
}

pub fn analysis_options(settings: &ServiceSettings) -> AnalysisOptions {
    AnalysisOptions {
        domain_policy: if settings.require_domain {
            DomainPolicy::Required
        } else {
            DomainPolicy::Defaulted
        },
        temperature: settings.temperature,
    }
}

/// The service for these settings, degraded when no client could be built.
pub fn build_service(settings: &ServiceSettings) -> AnalysisService {
    AnalysisService::new(build_client(settings), analysis_options(settings))
}
