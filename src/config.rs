use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::constants::{
    DEFAULT_BOT_POLL_TIMEOUT_SECONDS, DEFAULT_CATALOG_TIMEOUT_SECONDS, DEFAULT_CATALOG_URL,
    DEFAULT_HOST, DEFAULT_PORT, DEFAULT_STATIC_DIR, DEFAULT_USER_AGENT,
};
use crate::error::{Result, StockError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub token: Option<String>,
    pub poll_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: DEFAULT_STATIC_DIR.to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_URL.to_string(),
            timeout_seconds: DEFAULT_CATALOG_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: None,
            poll_timeout_seconds: DEFAULT_BOT_POLL_TIMEOUT_SECONDS,
        }
    }
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    /// Reads `path` if it exists, falls back to defaults otherwise, then
    /// applies overrides from the process environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Settings from `path` alone, defaults when the file does not exist
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config_path = path.as_ref();
        let config = if config_path.exists() {
            let config_content = fs::read_to_string(config_path).map_err(|e| {
                StockError::Config(format!(
                    "Failed to read config file '{}': {}",
                    config_path.display(),
                    e
                ))
            })?;
            info!("Loaded configuration from {}", config_path.display());
            toml::from_str(&config_content)?
        } else {
            debug!("No config file at {}, using defaults", config_path.display());
            Config::default()
        };
        Ok(config)
    }

    /// Overrides individual settings with values from `lookup` (usually the environment)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_number("PORT", &port)?;
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            self.server.static_dir = dir;
        }
        if let Some(url) = lookup("CATALOG_URL") {
            self.catalog.base_url = url;
        }
        if let Some(secs) = lookup("CATALOG_TIMEOUT_SECONDS") {
            self.catalog.timeout_seconds = parse_number("CATALOG_TIMEOUT_SECONDS", &secs)?;
        }
        if let Some(token) = lookup("BOT_TOKEN") {
            self.bot.token = Some(token);
        }
        Ok(())
    }

    /// Token for the chat bot; the bot cannot start without one
    pub fn bot_token(&self) -> Result<&str> {
        match self.bot.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(StockError::Config(
                "Environment variable: BOT_TOKEN is empty".to_string(),
            )),
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| StockError::Config(format!("{key} must be a number, got '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_file(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.catalog.timeout_seconds, DEFAULT_CATALOG_TIMEOUT_SECONDS);
        assert_eq!(config.server.static_dir, DEFAULT_STATIC_DIR);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9000\n\n[catalog]\nbase_url = \"http://localhost:1234\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.catalog.base_url, "http://localhost:1234");
        assert_eq!(config.bot.poll_timeout_seconds, DEFAULT_BOT_POLL_TIMEOUT_SECONDS);
    }

    #[test]
    fn example_config_parses() {
        let config: Config = toml::from_str(include_str!("../config.example.toml")).unwrap();
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert!(config.catalog.base_url.starts_with("http"));
        assert_eq!(config.bot.token, None);
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup_from(&[
                ("PORT", "3000"),
                ("CATALOG_URL", "http://catalog.test"),
                ("CATALOG_TIMEOUT_SECONDS", "5"),
                ("BOT_TOKEN", "123:abc"),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.catalog.base_url, "http://catalog.test");
        assert_eq!(config.catalog.timeout(), Duration::from_secs(5));
        assert_eq!(config.bot_token().unwrap(), "123:abc");
    }

    #[test]
    fn invalid_port_is_a_config_error() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(lookup_from(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, StockError::Config(_)));
    }

    #[test]
    fn blank_bot_token_is_rejected() {
        let mut config = Config::default();
        assert!(config.bot_token().is_err());
        config.bot.token = Some("   ".to_string());
        assert!(config.bot_token().is_err());
    }
}
