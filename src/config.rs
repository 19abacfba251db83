//! Configuration management for the explorer client

use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_limit")]
    pub page_limit: usize,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_limit: default_page_limit(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.tzkt.io".to_string()
}

fn default_page_limit() -> usize {
    10
}

fn default_request_timeout() -> u64 {
    30
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = fs::read_to_string("config.toml").unwrap_or_default();
    let config: Config = if config_str.is_empty() {
        // Provide sane defaults when config.toml is absent
        Config {
            api: ApiConfig::default(),
        }
    } else {
        toml::from_str(&config_str)?
    };

    // Validate critical values
    if config.api.base_url.is_empty() {
        return Err("api.base_url must be set in config.toml".into());
    }

    if config.api.page_limit == 0 {
        return Err("api.page_limit must be greater than zero".into());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ApiConfig::default();
        assert_eq!(cfg.base_url, "https://api.tzkt.io");
        assert_eq!(cfg.page_limit, 10);
        assert_eq!(cfg.request_timeout_secs, 30);
    }

    #[test]
    fn test_parse_partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [api]
            base_url = "http://localhost:5000"
            "#,
        )
        .expect("config should parse");

        assert_eq!(cfg.api.base_url, "http://localhost:5000");
        assert_eq!(cfg.api.page_limit, 10);
        assert_eq!(cfg.api.request_timeout_secs, 30);
    }

    #[test]
    fn test_parse_empty_toml_uses_default_section() {
        let cfg: Config = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.api.base_url, "https://api.tzkt.io");
    }
}
