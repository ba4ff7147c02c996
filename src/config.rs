//! Configuration management for learnview using the prefer crate.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{FilterConfig, LEARNINGS_SUFFIX};
use crate::viewer::DEFAULT_DISCOVERY_CONCURRENCY;

/// Default per-load timeout in seconds.
pub const DEFAULT_LOAD_TIMEOUT_SECS: u64 = 5;

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory or base URL holding the learnings files.
    pub data_location: String,
    /// Substring highlighted in summaries.
    pub content_filter: String,
    /// Category the content filter applies to.
    pub type_filter: String,
    /// Manifest file name, relative to the data location.
    pub manifest_name: String,
    /// Suffix that identifies learnings files.
    pub file_suffix: String,
    /// Files to try when no manifest or directory listing is available.
    pub candidates: Vec<String>,
    /// Per-load timeout in seconds.
    pub load_timeout_secs: u64,
    /// User agent for HTTP requests (None = default).
    pub user_agent: Option<String>,
    /// Maximum concurrent loads during discovery.
    pub discovery_concurrency: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let filter = FilterConfig::default();
        Self {
            data_location: "data/learnings".to_string(),
            content_filter: filter.content_filter,
            type_filter: filter.type_filter,
            manifest_name: "manifest.json".to_string(),
            file_suffix: LEARNINGS_SUFFIX.to_string(),
            candidates: Vec::new(),
            load_timeout_secs: DEFAULT_LOAD_TIMEOUT_SECS,
            user_agent: None,
            discovery_concurrency: DEFAULT_DISCOVERY_CONCURRENCY,
        }
    }
}

impl Settings {
    /// Create settings with a custom data location.
    pub fn with_data_location(data_location: &str) -> Self {
        Self {
            data_location: data_location.to_string(),
            ..Default::default()
        }
    }

    pub fn filter(&self) -> FilterConfig {
        FilterConfig::new(&self.content_filter, &self.type_filter)
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs)
    }

    /// Check values that would make the viewer unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_location.trim().is_empty() {
            return Err(ConfigError::EmptyDataLocation);
        }
        if self.load_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.discovery_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Directory or base URL holding the data files.
    #[serde(default)]
    pub data: Option<String>,
    /// Content filter substring.
    #[serde(default)]
    pub filter: Option<String>,
    /// Target category name.
    #[serde(default, rename = "type")]
    pub type_filter: Option<String>,
    /// Manifest file name.
    #[serde(default)]
    pub manifest: Option<String>,
    /// Learnings file suffix.
    #[serde(default)]
    pub suffix: Option<String>,
    /// Fixed candidate list.
    #[serde(default)]
    pub candidates: Option<Vec<String>>,
    /// Per-load timeout in seconds.
    #[serde(default)]
    pub load_timeout: Option<u64>,
    /// User agent string.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Maximum concurrent loads during discovery.
    #[serde(default)]
    pub discovery_concurrency: Option<usize>,
}

impl Config {
    /// Load configuration using prefer crate.
    /// Automatically discovers learnview config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("learnview").await {
            Ok(pref_config) => {
                let data: Option<String> = pref_config.get("data").ok();
                let filter: Option<String> = pref_config.get("filter").ok();
                let type_filter: Option<String> = pref_config.get("type").ok();
                let manifest: Option<String> = pref_config.get("manifest").ok();
                let suffix: Option<String> = pref_config.get("suffix").ok();
                let candidates: Option<Vec<String>> = pref_config.get("candidates").ok();
                let load_timeout: Option<u64> = pref_config.get("load_timeout").ok();
                let user_agent: Option<String> = pref_config.get("user_agent").ok();
                let discovery_concurrency: Option<usize> =
                    pref_config.get("discovery_concurrency").ok();

                Config {
                    data,
                    filter,
                    type_filter,
                    manifest,
                    suffix,
                    candidates,
                    load_timeout,
                    user_agent,
                    discovery_concurrency,
                }
            }
            Err(_) => {
                // No config file found, use defaults
                Self::default()
            }
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(ref data) = self.data {
            settings.data_location = expand_location(data);
        }
        if let Some(ref filter) = self.filter {
            settings.content_filter = filter.clone();
        }
        if let Some(ref type_filter) = self.type_filter {
            settings.type_filter = type_filter.clone();
        }
        if let Some(ref manifest) = self.manifest {
            settings.manifest_name = manifest.clone();
        }
        if let Some(ref suffix) = self.suffix {
            settings.file_suffix = suffix.clone();
        }
        if let Some(ref candidates) = self.candidates {
            settings.candidates = candidates.clone();
        }
        if let Some(timeout) = self.load_timeout {
            settings.load_timeout_secs = timeout;
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = Some(user_agent.clone());
        }
        if let Some(concurrency) = self.discovery_concurrency {
            settings.discovery_concurrency = concurrency;
        }
    }
}

/// Expand `~` in filesystem locations; URLs are left alone.
pub fn expand_location(location: &str) -> String {
    if location.contains("://") {
        location.to_string()
    } else {
        shellexpand::tilde(location).into_owned()
    }
}

/// Load settings from configuration (async version).
pub async fn load_settings() -> Settings {
    let config = Config::load().await;
    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings);
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.data_location, "data/learnings");
        assert_eq!(settings.load_timeout(), Duration::from_secs(5));
        assert_eq!(settings.filter(), FilterConfig::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_apply_overrides_only_set_fields() {
        let config = Config {
            filter: Some("async".to_string()),
            load_timeout: Some(9),
            candidates: Some(vec!["a_learnings.json".to_string()]),
            ..Default::default()
        };
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings);

        assert_eq!(settings.content_filter, "async");
        assert_eq!(settings.type_filter, "tech_choices");
        assert_eq!(settings.load_timeout_secs, 9);
        assert_eq!(settings.candidates, vec!["a_learnings.json"]);
    }

    #[test]
    fn test_config_keys() {
        let config: Config = serde_json::from_str(
            r#"{"data": "https://example.com/learnings", "type": "patterns"}"#,
        )
        .unwrap();
        assert_eq!(config.type_filter.as_deref(), Some("patterns"));

        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings);
        assert_eq!(settings.data_location, "https://example.com/learnings");
        assert_eq!(settings.type_filter, "patterns");
    }

    #[test]
    fn test_validate() {
        let mut settings = Settings::default();
        settings.load_timeout_secs = 0;
        assert!(matches!(settings.validate(), Err(ConfigError::ZeroTimeout)));

        let mut settings = Settings::default();
        settings.discovery_concurrency = 0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ZeroConcurrency)
        ));

        let settings = Settings::with_data_location("  ");
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::EmptyDataLocation)
        ));
    }

    #[test]
    fn test_expand_location_leaves_urls() {
        assert_eq!(
            expand_location("https://example.com/~user/data"),
            "https://example.com/~user/data"
        );
        assert_eq!(expand_location("data/learnings"), "data/learnings");
    }
}
