#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::form::SectorOptions;
use crate::core::flatten::DEFAULT_INDENT_MARKER;
use crate::core::sector_tree::OrphanPolicy;
use crate::core::session::DEFAULT_SESSION_KEY;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    parse_http_url, validate_non_empty_string, validate_path, validate_range, Validate,
};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_API_ENDPOINT: &str = "http://api.softartist.ee:8888";
pub const DEFAULT_STORAGE_PATH: &str = "./.sector-form/storage.json";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Fully resolved settings: built-in defaults, then the config file, then
/// command line overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_endpoint: String,
    pub timeout_seconds: u64,
    pub storage_path: String,
    pub session_key: String,
    pub orphan_policy: OrphanPolicy,
    pub indent_marker: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            storage_path: DEFAULT_STORAGE_PATH.to_string(),
            session_key: DEFAULT_SESSION_KEY.to_string(),
            orphan_policy: OrphanPolicy::default(),
            indent_marker: DEFAULT_INDENT_MARKER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn merge_file(mut self, file: TomlConfig) -> Self {
        if let Some(api) = file.api {
            if let Some(endpoint) = api.endpoint {
                self.api_endpoint = endpoint;
            }
            if let Some(timeout) = api.timeout_seconds {
                self.timeout_seconds = timeout;
            }
        }
        if let Some(session) = file.session {
            if let Some(path) = session.storage_path {
                self.storage_path = path;
            }
            if let Some(key) = session.key {
                self.session_key = key;
            }
        }
        if let Some(sectors) = file.sectors {
            if let Some(policy) = sectors.orphan_policy {
                self.orphan_policy = policy;
            }
            if let Some(marker) = sectors.indent_marker {
                self.indent_marker = marker;
            }
        }
        self
    }

    pub fn sector_options(&self) -> SectorOptions {
        SectorOptions {
            orphan_policy: self.orphan_policy,
            indent_marker: self.indent_marker.clone(),
        }
    }
}

impl ConfigProvider for AppConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn storage_path(&self) -> &str {
        &self.storage_path
    }

    fn session_key(&self) -> &str {
        &self.session_key
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        parse_http_url("api.endpoint", &self.api_endpoint)?;
        validate_range("api.timeout_seconds", self.timeout_seconds, 1, 600)?;
        validate_path("session.storage_path", &self.storage_path)?;
        validate_non_empty_string("session.key", &self.session_key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.session_key(), "sessionId");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = TomlConfig::from_toml_str(
            r#"
[api]
endpoint = "https://forms.example.com"

[sectors]
orphan_policy = "reject"
"#,
        )
        .unwrap();

        let config = AppConfig::default().merge_file(file);

        assert_eq!(config.api_endpoint, "https://forms.example.com");
        assert_eq!(config.orphan_policy, OrphanPolicy::Reject);
        assert_eq!(config.storage_path, DEFAULT_STORAGE_PATH);
        assert_eq!(config.sector_options().indent_marker, "----");
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let config = AppConfig {
            api_endpoint: "invalid-url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            session_key: " ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
