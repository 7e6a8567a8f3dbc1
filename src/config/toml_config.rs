use crate::core::sector_tree::OrphanPolicy;
use crate::utils::error::{FormError, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Optional config file. Every section and key may be left out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: Option<ApiConfig>,
    pub session: Option<SessionConfig>,
    pub sectors: Option<SectorsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    pub storage_path: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectorsConfig {
    pub orphan_policy: Option<OrphanPolicy>,
    pub indent_marker: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FormError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FormError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_ENDPOINT})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR
            .get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

        re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
endpoint = "https://forms.example.com"
timeout_seconds = 10

[session]
storage_path = "./state/storage.json"
key = "formSession"

[sectors]
orphan_policy = "reject"
indent_marker = "  "
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        let api = config.api.unwrap();
        assert_eq!(api.endpoint.as_deref(), Some("https://forms.example.com"));
        assert_eq!(api.timeout_seconds, Some(10));
        assert_eq!(config.session.unwrap().key.as_deref(), Some("formSession"));
        let sectors = config.sectors.unwrap();
        assert_eq!(sectors.orphan_policy, Some(OrphanPolicy::Reject));
        assert_eq!(sectors.indent_marker.as_deref(), Some("  "));
    }

    #[test]
    fn test_empty_config() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.api.is_none());
        assert!(config.session.is_none());
        assert!(config.sectors.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SECTOR_FORM_TEST_ENDPOINT", "https://test.api.com");

        let toml_content = r#"
[api]
endpoint = "${SECTOR_FORM_TEST_ENDPOINT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.api.unwrap().endpoint.as_deref(),
            Some("https://test.api.com")
        );

        std::env::remove_var("SECTOR_FORM_TEST_ENDPOINT");
    }

    #[test]
    fn test_unknown_policy_is_config_error() {
        let err = TomlConfig::from_toml_str("[sectors]\norphan_policy = \"explode\"\n").unwrap_err();
        assert!(matches!(err, FormError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\nendpoint = \"https://api.example.com\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.api.unwrap().endpoint.as_deref(),
            Some("https://api.example.com")
        );
    }
}
