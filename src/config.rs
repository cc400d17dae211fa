//! Application configuration.
//!
//! Settings live in an optional JSON file; credentials only ever come from
//! the environment variables the file names.
use crate::enrich::{EnrichmentClient, PromptBook, Provider, ProviderConfig, DEFAULT_TIMEOUT};
use crate::store::{Store, DEFAULT_DATA_REL};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Current schema version for the config file.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;
/// Environment override for the config file location.
pub const CONFIG_ENV: &str = "FDESK_CONFIG";
/// Environment override for the backing file location.
pub const DATA_ENV: &str = "FDESK_DATA";

const DEFAULT_BUSINESS: &str = "service business";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    pub schema_version: u32,
    pub data_path: Option<PathBuf>,
    /// Kind of business named in prompts ("restaurant", "salon", ...).
    pub business: String,
    pub timeout_secs: u64,
    pub primary: ProviderConfig,
    pub secondary: ProviderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        default_config()
    }
}

/// Built-in defaults: OpenAI first, OpenRouter as the fallback provider.
pub fn default_config() -> AppConfig {
    AppConfig {
        schema_version: CONFIG_SCHEMA_VERSION,
        data_path: None,
        business: DEFAULT_BUSINESS.to_string(),
        timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        primary: ProviderConfig::openai(),
        secondary: ProviderConfig::openrouter(),
    }
}

pub fn load_config(path: &Path) -> Result<AppConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: AppConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    validate_config(&config).with_context(|| format!("validate config {}", path.display()))?;
    Ok(config)
}

pub fn write_config(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("create config dir")?;
    }
    let text = serde_json::to_string_pretty(config).context("serialize config")?;
    fs::write(path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn validate_config(config: &AppConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {}",
            config.schema_version
        ));
    }
    if config.timeout_secs == 0 {
        return Err(anyhow!("timeout_secs must be greater than zero"));
    }
    if config.business.trim().is_empty() {
        return Err(anyhow!("business must be non-empty"));
    }
    for (label, provider) in [("primary", &config.primary), ("secondary", &config.secondary)] {
        for (field, value) in [
            ("name", &provider.name),
            ("url", &provider.url),
            ("model", &provider.model),
            ("api_key_env", &provider.api_key_env),
        ] {
            if value.trim().is_empty() {
                return Err(anyhow!("{label}.{field} must be non-empty"));
            }
        }
    }
    Ok(())
}

/// Where the config file would be read from, if anywhere.
///
/// Order: explicit flag, `FDESK_CONFIG`, then the per-user config dir when a
/// file exists there.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    user_config_path().filter(|path| path.is_file())
}

/// `<config dir>/fdesk/config.json` for the current user.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("fdesk").join("config.json"))
}

/// Fully resolved settings for one CLI invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: AppConfig,
    pub config_path: Option<PathBuf>,
    pub data_path: PathBuf,
}

impl Settings {
    /// Load config (or defaults) and resolve the data path.
    ///
    /// Data path order: explicit flag, `FDESK_DATA`, config `data_path`,
    /// then `data/submissions.csv`.
    pub fn load(config_flag: Option<&Path>, data_flag: Option<&Path>) -> Result<Self> {
        let config_path = resolve_config_path(config_flag);
        let config = match config_path.as_deref() {
            Some(path) => load_config(path)?,
            None => default_config(),
        };
        let data_path = data_flag
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(DATA_ENV).filter(|v| !v.is_empty()).map(PathBuf::from))
            .or_else(|| config.data_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_REL));
        tracing::debug!(
            config = ?config_path,
            data = %data_path.display(),
            "resolved settings"
        );
        Ok(Self {
            config,
            config_path,
            data_path,
        })
    }

    pub fn store(&self) -> Store {
        Store::new(self.data_path.clone())
    }

    pub fn prompts(&self) -> PromptBook {
        PromptBook::new(self.config.business.clone())
    }

    pub fn providers(&self) -> Vec<Provider> {
        vec![self.config.primary.resolve(), self.config.secondary.resolve()]
    }

    pub fn enrichment_client(&self) -> EnrichmentClient {
        EnrichmentClient::new(
            self.providers(),
            Duration::from_secs(self.config.timeout_secs),
        )
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
