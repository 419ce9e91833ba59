use crate::utils::error::{Result, StatsError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional `salary-stats.toml` file. Every section and key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub headhunter: HeadHunterSection,
    #[serde(default)]
    pub superjob: SuperJobSection,
    #[serde(default)]
    pub run: RunSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadHunterSection {
    pub endpoint: Option<String>,
    pub area_id: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuperJobSection {
    pub endpoint: Option<String>,
    pub town_id: Option<u32>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    pub languages: Option<Vec<String>>,
    pub network_pause_seconds: Option<u64>,
    pub request_timeout_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StatsError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SUPERJOB_KEY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StatsError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.headhunter.endpoint {
            validation::validate_url("headhunter.endpoint", endpoint)?;
        }
        if let Some(endpoint) = &self.superjob.endpoint {
            validation::validate_url("superjob.endpoint", endpoint)?;
        }
        if let Some(key) = &self.superjob.api_key {
            if key.starts_with("${") {
                return Err(StatsError::MissingConfigError {
                    field: format!("superjob.api_key ({})", key),
                });
            }
        }
        if let Some(languages) = &self.run.languages {
            for language in languages {
                validation::validate_non_empty_string("run.languages", language)?;
            }
        }
        Ok(())
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
[headhunter]
endpoint = "https://api.hh.ru/vacancies/"
area_id = 2

[superjob]
town_id = 14
api_key = "v3.r.123"

[run]
languages = ["Rust", "Go"]
network_pause_seconds = 5
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.headhunter.area_id, Some(2));
        assert_eq!(config.superjob.town_id, Some(14));
        assert_eq!(config.superjob.endpoint, None);
        assert_eq!(config.superjob.api_key.as_deref(), Some("v3.r.123"));
        assert_eq!(
            config.run.languages,
            Some(vec!["Rust".to_string(), "Go".to_string()])
        );
        assert_eq!(config.run.network_pause_seconds, Some(5));
        assert_eq!(config.run.request_timeout_seconds, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.headhunter.endpoint.is_none());
        assert!(config.run.languages.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SALARY_STATS_TEST_SJ_KEY", "from-env");

        let config = TomlConfig::from_toml_str(
            r#"
[superjob]
api_key = "${SALARY_STATS_TEST_SJ_KEY}"
"#,
        )
        .unwrap();
        assert_eq!(config.superjob.api_key.as_deref(), Some("from-env"));

        std::env::remove_var("SALARY_STATS_TEST_SJ_KEY");
    }

    #[test]
    fn test_unresolved_key_fails_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[superjob]
api_key = "${SALARY_STATS_TEST_UNSET_KEY}"
"#,
        )
        .unwrap();

        match config.validate() {
            Err(StatsError::MissingConfigError { field }) => {
                assert!(field.contains("SALARY_STATS_TEST_UNSET_KEY"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_endpoint_fails_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[headhunter]
endpoint = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = TomlConfig::from_toml_str(
            r#"
[run]
languages = ["Go"]
parallel = true
"#,
        );
        assert!(matches!(result, Err(StatsError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[headhunter]\narea_id = 3\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.headhunter.area_id, Some(3));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = TomlConfig::from_file("/definitely/not/here/salary-stats.toml");
        assert!(matches!(result, Err(StatsError::IoError(_))));
    }
}
