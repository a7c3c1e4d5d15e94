//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::errors::ConfigError;
use crate::application::messaging::MentionMatch;
use crate::infrastructure::adapters::groupme::DEFAULT_API_BASE;
use crate::infrastructure::storage::redis_store::DEFAULT_KEY_PREFIX;

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub notifier: NotifierConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    /// Invocation prefix marking a message as a command
    pub prefix: String,
    pub list_command: bool,
    pub mention_match: MentionMatch,
    pub suppress_empty_mentions: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_requests: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    Redis,
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub redis_url: String,
    pub key_prefix: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotifierKind {
    Groupme,
    Console,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct NotifierConfig {
    pub kind: NotifierKind,
    pub api_base: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "mentions-bot".to_string(),
            prefix: "@bot".to_string(),
            list_command: true,
            mention_match: MentionMatch::Anywhere,
            suppress_empty_mentions: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_requests: true,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Redis,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            kind: NotifierKind::Groupme,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = Config::default();

        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            config.bot.prefix = prefix;
        }

        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            config.server.port = port;
        }

        if let Ok(url) = std::env::var("REDIS_URL") {
            config.storage.redis_url = url;
        }

        if let Ok(api_base) = std::env::var("GROUPME_API_BASE") {
            config.notifier.api_base = api_base;
        }

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.trim().is_empty() {
            return Err(ConfigError::MissingField("bot.prefix".to_string()));
        }
        if self.storage.backend == StorageBackend::Redis && self.storage.redis_url.is_empty() {
            return Err(ConfigError::MissingField("storage.redis-url".to_string()));
        }
        if self.notifier.kind == NotifierKind::Groupme && !self.notifier.api_base.starts_with("http") {
            return Err(ConfigError::InvalidValue(format!(
                "notifier.api-base must be an http(s) URL: {}",
                self.notifier.api_base
            )));
        }
        Ok(())
    }

    /// `host:port` for the webhook listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Turn a bare hostname (`api.groupme.com`) into an API base URL
    pub fn set_api_host(&mut self, hostname: &str) {
        self.notifier.api_base = if hostname.starts_with("http://") || hostname.starts_with("https://") {
            hostname.to_string()
        } else {
            format!("https://{}", hostname)
        };
    }

    /// Accepts `host:port`, `:port` or a full `redis://` URL
    pub fn set_redis_address(&mut self, address: &str) {
        self.storage.redis_url = if address.contains("://") {
            address.to_string()
        } else if let Some(port) = address.strip_prefix(':') {
            format!("redis://127.0.0.1:{}", port)
        } else {
            format!("redis://{}", address)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bot.prefix, "@bot");
        assert!(config.bot.list_command);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.storage.backend, StorageBackend::Redis);
        assert_eq!(config.notifier.api_base, "https://api.groupme.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml(
            "bot:\n  prefix: \"@mb\"\n  mention-match: trailing\nstorage:\n  backend: memory\n",
        )
        .expect("valid yaml");
        assert_eq!(config.bot.prefix, "@mb");
        assert_eq!(config.bot.mention_match, MentionMatch::Trailing);
        assert!(!config.bot.suppress_empty_mentions);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_default_roundtrips_through_yaml() {
        let yaml = serde_yaml::to_string(&Config::default()).expect("serializable");
        assert!(yaml.contains("suppress-empty-mentions"));
        let config = Config::from_yaml(&yaml).expect("valid yaml");
        assert_eq!(config.bot.name, "mentions-bot");
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Config::from_yaml("bot:\n  prefix: \"\"\n").is_err());
        assert!(Config::from_yaml("notifier:\n  api-base: api.groupme.com\n").is_err());
        assert!(Config::from_yaml("server: [1, 2]").is_err());
    }

    #[test]
    fn test_address_overrides() {
        let mut config = Config::default();
        config.set_redis_address(":6380");
        assert_eq!(config.storage.redis_url, "redis://127.0.0.1:6380");
        config.set_redis_address("cache.internal:6379");
        assert_eq!(config.storage.redis_url, "redis://cache.internal:6379");

        config.set_api_host("api.groupme-b.com");
        assert_eq!(config.notifier.api_base, "https://api.groupme-b.com");
        config.set_api_host("http://localhost:9000");
        assert_eq!(config.notifier.api_base, "http://localhost:9000");
    }
}
