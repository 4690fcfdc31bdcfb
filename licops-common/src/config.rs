//! Configuration loading and resolution
//!
//! Settings resolve with CLI → environment variable → TOML config file
//! priority. There is no persistence layer in LicOps, so the config file is
//! the only durable tier.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// TOML configuration shared by both services
///
/// Lives at `~/.config/licops/config.toml` (or `/etc/licops/config.toml`
/// system-wide on Linux). All fields optional; services fall back to
/// compiled defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// API key for the model-backed extraction endpoint
    pub model_api_key: Option<String>,
    /// Base URL of the chat-completion endpoint
    pub model_base_url: Option<String>,
    /// Path to the historical deals CSV
    pub deals_path: Option<PathBuf>,
    /// Path to a knowledge catalog seed file (JSON)
    pub catalog_path: Option<PathBuf>,
}

impl TomlConfig {
    /// Load the TOML config from the platform config location
    ///
    /// A missing file is not an error; it yields the default (empty)
    /// config. A present-but-unparseable file is an error.
    pub fn load() -> Result<Self> {
        match locate_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load the TOML config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }
}

/// Locate the config file for the platform, if one exists
fn locate_config_file() -> Option<PathBuf> {
    if let Some(path) = dirs::config_dir().map(|d| d.join("licops").join("config.toml")) {
        if path.exists() {
            return Some(path);
        }
    }
    if cfg!(target_os = "linux") {
        let system = PathBuf::from("/etc/licops/config.toml");
        if system.exists() {
            return Some(system);
        }
    }
    None
}

/// Resolve one setting with CLI → ENV → TOML priority
///
/// Warns when more than one source supplies a value, since that usually
/// indicates a stale config file.
pub fn resolve_setting(
    name: &str,
    cli: Option<&str>,
    env_var: &str,
    toml_value: Option<&str>,
) -> Option<String> {
    let env_value = std::env::var(env_var).ok().filter(|v| !v.trim().is_empty());
    let cli_value = cli.filter(|v| !v.trim().is_empty());
    let toml_value = toml_value.filter(|v| !v.trim().is_empty());

    let sources: Vec<&str> = [
        cli_value.map(|_| "CLI"),
        env_value.as_deref().map(|_| "environment"),
        toml_value.map(|_| "TOML"),
    ]
    .into_iter()
    .flatten()
    .collect();

    if sources.len() > 1 {
        warn!(
            "{} found in multiple sources: {}. Using {} (highest priority).",
            name,
            sources.join(", "),
            sources[0]
        );
    }

    cli_value
        .map(str::to_string)
        .or(env_value)
        .or_else(|| toml_value.map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_wins_over_toml() {
        let resolved = resolve_setting(
            "model API key",
            Some("from-cli"),
            "LICOPS_TEST_UNSET_VAR",
            Some("from-toml"),
        );
        assert_eq!(resolved.as_deref(), Some("from-cli"));
    }

    #[test]
    fn blank_values_are_ignored() {
        let resolved = resolve_setting("model API key", Some("  "), "LICOPS_TEST_UNSET_VAR", None);
        assert_eq!(resolved, None);
    }

    #[test]
    fn toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "model_api_key = \"abc123\"\n").unwrap();

        let config = TomlConfig::load_from(&path).unwrap();
        assert_eq!(config.model_api_key.as_deref(), Some("abc123"));
        assert!(config.deals_path.is_none());
    }
}
