use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

pub mod defaults;
pub mod duration_serde;

use defaults::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
}

/// Remote pictogram API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Versioned API root, e.g. `https://api.arasaac.org/v1`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Language code used for searches and keyword suggestions
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_connect_timeout", with = "duration_serde::duration")]
    pub connect_timeout: Duration,
}

/// Search and autocompletion tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search is committed
    #[serde(default = "default_debounce", with = "duration_serde::duration")]
    pub debounce: Duration,
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,
    /// Records kept per API response (and per cache entry)
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Maximum pictograms per outgoing message
    #[serde(default = "default_selection_capacity")]
    pub capacity: usize,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)
}

fn default_debounce() -> Duration {
    Duration::from_millis(DEFAULT_DEBOUNCE_MS)
}

fn default_min_query_length() -> usize {
    DEFAULT_MIN_QUERY_LENGTH
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_max_suggestions() -> usize {
    DEFAULT_MAX_SUGGESTIONS
}

fn default_selection_capacity() -> usize {
    DEFAULT_SELECTION_CAPACITY
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            language: default_language(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: default_debounce(),
            min_query_length: default_min_query_length(),
            max_results: default_max_results(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            capacity: default_selection_capacity(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from_file(&config_file)
    }

    pub fn load_from_file(config_file: &str) -> Result<Self> {
        let config: Self = if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            toml::from_str(&contents)?
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            default_config
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would break the search and selection limits
    pub fn validate(&self) -> Result<()> {
        if self.api.language.trim().is_empty() {
            bail!("api.language must not be empty");
        }
        url::Url::parse(&self.api.base_url)?;
        if self.search.max_results == 0 || self.search.max_results > DEFAULT_MAX_RESULTS {
            bail!(
                "search.max_results must be between 1 and {}",
                DEFAULT_MAX_RESULTS
            );
        }
        if self.selection.capacity == 0 || self.selection.capacity > DEFAULT_SELECTION_CAPACITY {
            bail!(
                "selection.capacity must be between 1 and {}",
                DEFAULT_SELECTION_CAPACITY
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.base_url, "https://api.arasaac.org/v1");
        assert_eq!(config.api.language, "es");
        assert_eq!(config.search.debounce, Duration::from_millis(500));
        assert_eq!(config.search.max_results, 8);
        assert_eq!(config.search.max_suggestions, 5);
        assert_eq!(config.selection.capacity, 5);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            language = "en"

            [search]
            debounce = "250ms"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.language, "en");
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.search.debounce, Duration::from_millis(250));
        assert_eq!(config.search.min_query_length, 2);
        assert_eq!(config.selection.capacity, 5);
    }

    #[test]
    fn test_capacity_above_limit_is_rejected() {
        let mut config = Config::default();
        config.selection.capacity = 6;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.search.max_results = 20;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path = path.to_str().unwrap();

        let config = Config::load_from_file(path).unwrap();
        assert_eq!(config.api.language, "es");

        let written = std::fs::read_to_string(path).unwrap();
        let reparsed: Config = toml::from_str(&written).unwrap();
        assert_eq!(reparsed.search.debounce, config.search.debounce);
    }
}
