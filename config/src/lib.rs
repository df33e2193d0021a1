//! Configuration for the process advisor.
//!
//! Two steps:
//! 1. [`load_and_apply`] fills the process environment from project `.env` and
//!    `$XDG_CONFIG_HOME/<app>/config.toml` (`[env]` table), with priority
//!    **existing env > .env > XDG**.
//! 2. [`ServiceSettings::from_env`] parses the typed settings (credential, model, port, ...).

mod env_file;
mod settings;
#[cfg(feature = "tracing-init")]
mod tracing_init;
mod xdg_toml;

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

pub use settings::{
    ServiceSettings, SettingsError, DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_PORT, DEFAULT_TEMPERATURE,
};
#[cfg(feature = "tracing-init")]
pub use tracing_init::{init_tracing, DEFAULT_LOG_DIRECTIVES};

/// Application name used for the XDG config directory.
pub const APP_NAME: &str = "process-advisor";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    Dotenv(#[from] dotenv::Error),
}

/// Picks, for every key found in `.env` or XDG, the value to set: `.env` wins over XDG, and keys
/// for which `is_set` is true are skipped (existing env wins). Sorted by key.
fn merge_layers(
    xdg: &HashMap<String, String>,
    dotenv: &HashMap<String, String>,
    is_set: impl Fn(&str) -> bool,
) -> Vec<(String, String)> {
    let mut merged: HashMap<&str, &str> = xdg.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    merged.extend(dotenv.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    let mut out: Vec<(String, String)> = merged
        .into_iter()
        .filter(|(k, _)| !is_set(k))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    out.sort();
    out
}

/// Resolves each layer independently: a layer that fails to load contributes nothing and its
/// error is returned next to the values picked from the layers that did load.
fn resolve_layers(
    xdg: Result<HashMap<String, String>, LoadError>,
    dotenv: Result<HashMap<String, String>, LoadError>,
    is_set: impl Fn(&str) -> bool,
) -> (Vec<(String, String)>, Vec<LoadError>) {
    let mut errors = Vec::new();
    let mut layer = |r: Result<HashMap<String, String>, LoadError>| {
        r.unwrap_or_else(|e| {
            errors.push(e);
            HashMap::new()
        })
    };
    let xdg = layer(xdg);
    let dotenv = layer(dotenv);
    (merge_layers(&xdg, &dotenv, is_set), errors)
}

/// Loads XDG `config.toml` and optional project `.env`, then sets environment variables only for
/// keys that are **not** already set.
///
/// * `app_name`: XDG directory name, e.g. [`APP_NAME`].
/// * `override_dir`: if `Some`, look for `.env` there instead of the current directory.
///
/// Returns the errors of the layers that could not be read (empty when both loaded). A broken
/// layer never prevents the other one from being applied.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Vec<LoadError> {
    let (pairs, errors) = resolve_layers(
        xdg_toml::load_env_map(app_name),
        env_file::load_env_map(override_dir).map_err(LoadError::from),
        |k| std::env::var_os(k).is_some(),
    );
    for (key, value) in pairs {
        std::env::set_var(key, value);
    }
    errors
}
