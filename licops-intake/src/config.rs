//! Configuration resolution for licops-intake
//!
//! Model credentials and the deals path resolve with CLI → ENV → TOML
//! priority via `licops_common::config`. The model-backed extractor is only
//! constructed when an API key is present; otherwise the service runs in
//! fallback-only mode.

use crate::extractors::model_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use licops_common::config::{resolve_setting, TomlConfig};
use std::path::PathBuf;

/// Compiled default for the deals CSV, relative to the working directory
pub const DEFAULT_DEALS_PATH: &str = "licops-intake/data/past_deals.csv";

/// Resolved settings for the model-backed extractor
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

/// Resolve model settings; `None` when no API key is configured anywhere
pub fn resolve_model_settings(
    cli_api_key: Option<&str>,
    cli_base_url: Option<&str>,
    toml_config: &TomlConfig,
) -> Option<ModelSettings> {
    let api_key = resolve_setting(
        "model API key",
        cli_api_key,
        "LICOPS_MODEL_API_KEY",
        toml_config.model_api_key.as_deref(),
    )?;

    let base_url = resolve_setting(
        "model base URL",
        cli_base_url,
        "LICOPS_MODEL_BASE_URL",
        toml_config.model_base_url.as_deref(),
    )
    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    Some(ModelSettings {
        api_key,
        base_url,
        model: DEFAULT_MODEL.to_string(),
    })
}

/// Resolve the historical deals CSV path
pub fn resolve_deals_path(cli_path: Option<&str>, toml_config: &TomlConfig) -> PathBuf {
    resolve_setting(
        "deals path",
        cli_path,
        "LICOPS_DEALS_PATH",
        toml_config.deals_path.as_deref().and_then(|p| p.to_str()),
    )
    .map(PathBuf::from)
    .unwrap_or_else(|| PathBuf::from(DEFAULT_DEALS_PATH))
}
