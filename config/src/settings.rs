//! Typed service settings parsed from environment variables.
//!
//! | variable | default |
//! |---|---|
//! | `GEMINI_API_KEY` (fallback `OPENAI_API_KEY`) | unset: server starts degraded |
//! | `ADVISOR_BASE_URL` | provider default (Gemini OpenAI-compatible endpoint) |
//! | `ADVISOR_MODEL` | `gemini-2.5-flash` |
//! | `ADVISOR_TEMPERATURE` | `0.2`, range 0–2 |
//! | `ADVISOR_PROVIDER_TIMEOUT_SECS` | unset: no timeout |
//! | `ADVISOR_REQUIRE_DOMAIN` | `false` |
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `5000` |
//!
//! Blank values count as unset.

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the server binary needs to start.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceSettings {
    /// Provider credential. `None` means the provider client is not built.
    pub api_key: Option<String>,
    /// Provider API base; `None` keeps the client's default endpoint.
    pub base_url: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub provider_timeout: Option<Duration>,
    /// Reject requests without a domain instead of defaulting it.
    pub require_domain: bool,
    pub host: String,
    pub port: u16,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            provider_timeout: None,
            require_domain: false,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value, "expected true/false")),
    }
}

impl ServiceSettings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup` (key → value). Used by [`Self::from_env`] and tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let default = Self::default();

        let temperature = match get("ADVISOR_TEMPERATURE") {
            Some(v) => {
                let t: f32 = v
                    .trim()
                    .parse()
                    .map_err(|_| invalid("ADVISOR_TEMPERATURE", &v, "not a number"))?;
                if !(0.0..=2.0).contains(&t) {
                    return Err(invalid("ADVISOR_TEMPERATURE", &v, "must be between 0 and 2"));
                }
                t
            }
            None => default.temperature,
        };

        let provider_timeout = match get("ADVISOR_PROVIDER_TIMEOUT_SECS") {
            Some(v) => {
                let secs: u64 = v.trim().parse().map_err(|_| {
                    invalid("ADVISOR_PROVIDER_TIMEOUT_SECS", &v, "not a whole number of seconds")
                })?;
                if secs == 0 {
                    return Err(invalid("ADVISOR_PROVIDER_TIMEOUT_SECS", &v, "must be positive"));
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let require_domain = match get("ADVISOR_REQUIRE_DOMAIN") {
            Some(v) => parse_bool("ADVISOR_REQUIRE_DOMAIN", &v)?,
            None => default.require_domain,
        };

        let port = match get("PORT") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| invalid("PORT", &v, "not a port number"))?,
            None => default.port,
        };

        Ok(Self {
            api_key: get("GEMINI_API_KEY").or_else(|| get("OPENAI_API_KEY")),
            base_url: get("ADVISOR_BASE_URL"),
            model: get("ADVISOR_MODEL").unwrap_or(default.model),
            temperature,
            provider_timeout,
            require_domain,
            host: get("HOST").unwrap_or(default.host),
            port,
        })
    }

    /// `host:port` to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
