//! Application configuration
//!
//! Configuration loaded from the .sg-batches.toml file.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration loaded from .sg-batches.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    /// Base URL of the Sourcegraph instance to talk to
    #[serde(default = "default_instance_url")]
    pub instance_url: String,

    /// Sourcegraph access token; usually supplied via the SRC_ACCESS_TOKEN
    /// environment variable instead of the config file
    #[serde(default)]
    pub access_token: Option<String>,

    /// Seconds to wait after a successful publish before refreshing the
    /// changeset list, giving the server time to move the changeset along
    #[serde(default = "default_publish_refresh_delay_secs")]
    pub publish_refresh_delay_secs: u64,
}

fn default_instance_url() -> String {
    "https://sourcegraph.com".to_string()
}

fn default_publish_refresh_delay_secs() -> u64 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            instance_url: default_instance_url(),
            access_token: None,
            publish_refresh_delay_secs: default_publish_refresh_delay_secs(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Delay between a successful publish and the follow-up refresh
    pub fn publish_refresh_delay(&self) -> Duration {
        Duration::from_secs(self.publish_refresh_delay_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.instance_url, "https://sourcegraph.com");
        assert_eq!(config.access_token, None);
        assert_eq!(config.publish_refresh_delay_secs, 10);
        assert_eq!(config.publish_refresh_delay(), Duration::from_secs(10));
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            instance_url = "https://sourcegraph.example.com"
            access_token = "sgp_abc123"
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.instance_url, "https://sourcegraph.example.com");
        assert_eq!(config.access_token.as_deref(), Some("sgp_abc123"));
        // publish_refresh_delay_secs should use default
        assert_eq!(config.publish_refresh_delay_secs, 10);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            publish_refresh_delay_secs = 3
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.publish_refresh_delay_secs, 3);
        // Other fields should use defaults
        assert_eq!(config.instance_url, "https://sourcegraph.com");
        assert_eq!(config.access_token, None);
    }
}
