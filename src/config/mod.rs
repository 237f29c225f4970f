pub mod models;

pub use models::{Config, Zone};

use anyhow::{Context, Result};
use std::{borrow::Cow, env, fs};
use validator::Validate;

/// Environment variable that takes precedence over the file's `api_token`.
pub const TOKEN_ENV: &str = "HDNS_API_TOKEN";

impl Config {
    pub fn load(config_file: &str) -> Result<Self> {
        let contents = fs::read_to_string(config_file)
            .with_context(|| format!("Failed to read config file: {}", config_file))?;

        Self::resolve(&contents, env::var(TOKEN_ENV).ok())
            .with_context(|| format!("Invalid config file: {}", config_file))
    }

    pub fn resolve(contents: &str, env_token: Option<String>) -> Result<Self> {
        let mut config: Config = serde_yaml::from_str(contents).context("Failed to parse config")?;

        if let Some(token) = env_token.filter(|t| !t.is_empty()) {
            config.api_token = Cow::Owned(token);
        }

        config.validate().context("Config validation failed")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::RecordsListOptions;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONFIG: &str = r#"
        api_token: "test_token"
        zones:
          - id: "5c95wmRRiFSdwNswRDcMuG"
            per_page: 25
            records:
              - "8ce7818ffd302808066d3732ffbb26a4"
          - id: "abcdef0123456789"
    "#;

    #[test]
    fn test_config_deserialization() {
        let config = Config::resolve(CONFIG, None).unwrap();

        assert_eq!(config.api_token, "test_token");
        assert_eq!(config.base_url, "https://dns.hetzner.com/api/v1");
        assert_eq!(config.zones.len(), 2);
        assert_eq!(config.zones[0].id, "5c95wmRRiFSdwNswRDcMuG");
        assert_eq!(config.zones[0].records, vec!["8ce7818ffd302808066d3732ffbb26a4"]);
        assert!(config.zones[1].records.is_empty());
    }

    #[test]
    fn test_zone_list_options() {
        let config = Config::resolve(CONFIG, None).unwrap();

        let options = config.zones[0].list_options();
        assert_eq!(options.items_per_page, 25);
        assert_eq!(options.page, 1);
        assert_eq!(config.zones[1].list_options(), RecordsListOptions::default());
    }

    #[test]
    fn test_env_token_overrides_file() {
        let config = Config::resolve(CONFIG, Some("from_env".to_string())).unwrap();
        assert_eq!(config.api_token, "from_env");

        let config = Config::resolve(CONFIG, Some(String::new())).unwrap();
        assert_eq!(config.api_token, "test_token");
    }

    #[test]
    fn test_missing_token_uses_env() {
        let contents = r#"
            api_token: ""
            zones:
              - id: "abcdef0123456789"
        "#;
        assert!(Config::resolve(contents, None).is_err());
        assert!(Config::resolve(contents, Some("from_env".to_string())).is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let invalid_config = r#"
            api_token: "test_token"
            # missing required fields
        "#;
        assert!(Config::resolve(invalid_config, None).is_err());
    }

    #[test]
    fn test_validation_errors() {
        let no_zones = r#"
            api_token: "test_token"
            zones: []
        "#;
        assert!(Config::resolve(no_zones, None).is_err());

        let empty_zone_id = r#"
            api_token: "test_token"
            zones:
              - id: ""
        "#;
        assert!(Config::resolve(empty_zone_id, None).is_err());

        let zero_page = r#"
            api_token: "test_token"
            zones:
              - id: "abcdef0123456789"
                page: 0
        "#;
        assert!(Config::resolve(zero_page, None).is_err());

        let bad_url = r#"
            api_token: "test_token"
            base_url: "not a url"
            zones:
              - id: "abcdef0123456789"
        "#;
        assert!(Config::resolve(bad_url, None).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", CONFIG).unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.zones.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/config.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/config.yaml"));
    }
}
