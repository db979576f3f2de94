// config.rs
// Client configuration loaded from conf/client.conf (key = value lines)

use crate::defs::{
    DEFAULT_BALLS_PATH, DEFAULT_BASE_URL, DEFAULT_CARDS_PATH, DEFAULT_POLL_INTERVAL,
    DEFAULT_TIMEOUT_SECS,
};
use crate::logging::{log_info, log_warning};

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "conf/client.conf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub cards_path: String,
    pub balls_path: String,
    pub poll_interval: u64,
    pub timeout: u64,
    pub player_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cards_path: DEFAULT_CARDS_PATH.to_string(),
            balls_path: DEFAULT_BALLS_PATH.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL.as_secs(),
            timeout: DEFAULT_TIMEOUT_SECS,
            player_id: None,
        }
    }
}

impl ClientConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Self::from_str_content(&content)
    }

    pub fn from_str_content(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config_map = parse_config(content)?;
        let defaults = Self::default();

        let base_url = config_map.get("base_url")
            .cloned()
            .unwrap_or(defaults.base_url);

        let cards_path = config_map.get("cards_path")
            .cloned()
            .unwrap_or(defaults.cards_path);

        let balls_path = config_map.get("balls_path")
            .cloned()
            .unwrap_or(defaults.balls_path);

        let poll_interval = match config_map.get("poll_interval") {
            Some(value) => value.parse::<u64>()
                .map_err(|e| format!("invalid poll_interval '{value}': {e}"))?,
            None => defaults.poll_interval,
        };
        if poll_interval == 0 {
            return Err("poll_interval must be at least 1 second".into());
        }

        let timeout = config_map.get("timeout")
            .and_then(|t| t.parse::<u64>().ok())
            .unwrap_or(defaults.timeout);

        let player_id = config_map.get("player_id")
            .filter(|id| !id.is_empty())
            .cloned();

        Ok(ClientConfig { base_url, cards_path, balls_path, poll_interval, timeout, player_id })
    }

    pub fn load_or_default() -> Self {
        Self::load_from_or_default(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from_or_default<P: AsRef<Path>>(path: P) -> Self {
        let config_path = path.as_ref();

        match Self::from_file(config_path) {
            Ok(config) => {
                log_info(&format!("Loaded client configuration from {}", config_path.display()));
                config
            }
            Err(e) => {
                log_warning(&format!("Could not load client config from {}: {}. Using defaults.", config_path.display(), e));
                Self::default()
            }
        }
    }

    pub fn poll_period(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn cards_url(&self) -> String {
        join_url(&self.base_url, &self.cards_path)
    }

    pub fn balls_url(&self) -> String {
        join_url(&self.base_url, &self.balls_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn parse_config(content: &str) -> Result<HashMap<String, String>, Box<dyn std::error::Error>> {
    let mut config = HashMap::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Parse key = value pairs
        match line.split_once('=') {
            Some((key, value)) => {
                config.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => {
                return Err(format!("line {}: expected 'key = value', got '{line}'", index + 1).into());
            }
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let content = r#"
            # This is a comment
            base_url = https://bingo.example.org
            poll_interval = 5
            # Another comment
            player_id = ABC123
        "#;

        let config = parse_config(content).unwrap();
        assert_eq!(config.get("base_url"), Some(&"https://bingo.example.org".to_string()));
        assert_eq!(config.get("poll_interval"), Some(&"5".to_string()));
        assert_eq!(config.get("player_id"), Some(&"ABC123".to_string()));
    }

    #[test]
    fn test_parse_config_rejects_garbage_line() {
        assert!(parse_config("base_url = x\nnot a pair\n").is_err());
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.cards_path, "/api/bingo-cards/");
        assert_eq!(config.balls_path, "/api/bingo-balls/");
        assert_eq!(config.poll_period(), Duration::from_secs(20));
        assert_eq!(config.timeout, 30);
        assert_eq!(config.player_id, None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ClientConfig::from_str_content("poll_interval = 3\nplayer_id =\n").unwrap();
        assert_eq!(config.poll_interval, 3);
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.player_id, None);
    }

    #[test]
    fn test_invalid_poll_interval() {
        assert!(ClientConfig::from_str_content("poll_interval = soon").is_err());
        assert!(ClientConfig::from_str_content("poll_interval = 0").is_err());
    }

    #[test]
    fn test_urls() {
        let config = ClientConfig {
            base_url: "http://192.168.1.100:8080/".to_string(),
            cards_path: "api/cards".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(config.cards_url(), "http://192.168.1.100:8080/api/cards");
        assert_eq!(config.balls_url(), "http://192.168.1.100:8080/api/bingo-balls/");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = ClientConfig::load_from_or_default("conf/does-not-exist.conf");
        assert_eq!(config, ClientConfig::default());
    }
}
