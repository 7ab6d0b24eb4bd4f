use crate::constants::{self, DEFAULT_LOG_FILE_NAME, env_vars, player_cache, tool_defaults};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path, get_player_cache_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the Sleeper API, without trailing slash.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Location of the persisted player directory. Platform cache dir when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_cache_path: Option<String>,
    /// How long a persisted player snapshot stays valid.
    #[serde(default = "default_player_cache_ttl")]
    pub player_cache_ttl_hours: u64,
    /// Season used when a tool call does not name one.
    #[serde(default = "default_season")]
    pub default_season: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
}

fn default_api_base_url() -> String {
    constants::DEFAULT_API_BASE_URL.to_string()
}

fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_player_cache_ttl() -> u64 {
    player_cache::TTL_HOURS
}

fn default_season() -> String {
    tool_defaults::SEASON.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: default_api_base_url(),
            http_timeout_seconds: default_http_timeout(),
            player_cache_path: None,
            player_cache_ttl_hours: default_player_cache_ttl(),
            default_season: default_season(),
            log_file_path: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// A missing config file is not an error: defaults are used.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `SLEEPER_API_BASE_URL` - Override API base URL
    /// - `SLEEPER_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    /// - `SLEEPER_PLAYER_CACHE` - Override player cache file path
    /// - `SLEEPER_LOG_FILE` - Override log file path
    /// - `SLEEPER_DEFAULT_SEASON` - Override default season
    pub async fn load() -> Result<Self, AppError> {
        Self::load_with_overrides(&get_config_path()).await
    }

    /// Loads the file at `path` if it exists, applies environment overrides
    /// and validates the result.
    pub async fn load_with_overrides(path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(path).exists() {
            Self::load_from_path(path).await?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(env_vars::API_BASE_URL) {
            self.api_base_url = url;
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }

        if let Ok(cache_path) = std::env::var(env_vars::PLAYER_CACHE) {
            self.player_cache_path = Some(cache_path);
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Ok(season) = std::env::var(env_vars::DEFAULT_SEASON) {
            self.default_season = season;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(
            &self.api_base_url,
            self.http_timeout_seconds,
            self.player_cache_ttl_hours,
            &self.default_season,
            &[
                ("Player cache path", &self.player_cache_path),
                ("Log file path", &self.log_file_path),
            ],
        )
    }

    /// Snapshot lifetime as a duration. Saturates instead of overflowing.
    pub fn player_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.player_cache_ttl_hours.saturating_mul(3600))
    }

    /// Effective player cache file path: configured value or platform default.
    pub fn resolved_player_cache_path(&self) -> String {
        self.player_cache_path
            .clone()
            .unwrap_or_else(get_player_cache_path)
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let config = Config::load().await?;

        if Path::new(&config_path).exists() {
            println!("\nCurrent Configuration");
        } else {
            println!("\nNo configuration file found, showing defaults");
        }
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        println!("────────────────────────────────────");
        println!("API Base URL:");
        println!("{}", config.api_base_url);
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} seconds", config.http_timeout_seconds);
        println!("────────────────────────────────────");
        println!("Player Cache:");
        println!("{}", config.resolved_player_cache_path());
        println!("(valid for {} hours)", config.player_cache_ttl_hours);
        println!("────────────────────────────────────");
        println!("Default Season:");
        println!("{}", config.default_season);
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{}/{DEFAULT_LOG_FILE_NAME}", get_log_dir_path());
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path, creating the parent
    /// directory if needed. A trailing slash on the API base URL is dropped.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }

        let content = toml::to_string_pretty(&Config {
            api_base_url: self.api_base_url.trim_end_matches('/').to_string(),
            ..self.clone()
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without applying
    /// environment overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn clear_env() {
        // SAFETY: tests touching the environment are serialized with #[serial]
        unsafe {
            std::env::remove_var(env_vars::API_BASE_URL);
            std::env::remove_var(env_vars::HTTP_TIMEOUT);
            std::env::remove_var(env_vars::PLAYER_CACHE);
            std::env::remove_var(env_vars::LOG_FILE);
            std::env::remove_var(env_vars::DEFAULT_SEASON);
        }
    }

    #[tokio::test]
    async fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
api_base_url = "https://api.example.com/v1"
http_timeout_seconds = 10
player_cache_path = "/tmp/players.json"
default_season = "2023"
"#;
        tokio::fs::write(&config_path, config_content).await.unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.api_base_url, "https://api.example.com/v1");
        assert_eq!(config.http_timeout_seconds, 10);
        assert_eq!(config.player_cache_path, Some("/tmp/players.json".to_string()));
        assert_eq!(config.player_cache_ttl_hours, 24);
        assert_eq!(config.default_season, "2023");
        assert_eq!(config.log_file_path, None);
    }

    #[tokio::test]
    async fn test_config_empty_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "").await.unwrap();

        let config = Config::load_from_path(&config_path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_config_save_and_reload() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let config = Config {
            api_base_url: "https://api.example.com/v1/".to_string(),
            log_file_path: Some("/custom/log/path".to_string()),
            ..Config::default()
        };
        config.save_to_path(&config_path_str).await.unwrap();
        assert!(config_path.exists());

        let content = tokio::fs::read_to_string(&config_path).await.unwrap();
        assert!(content.contains("log_file_path"));
        // None values are not written
        assert!(!content.contains("player_cache_path"));

        let loaded = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded.api_base_url, "https://api.example.com/v1");
        assert_eq!(loaded.log_file_path, Some("/custom/log/path".to_string()));
    }

    #[tokio::test]
    async fn test_config_invalid_toml() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "api_base_url = [").await.unwrap();

        let result = Config::load_from_path(&config_path.to_string_lossy()).await;
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[tokio::test]
    #[serial]
    async fn test_missing_file_falls_back_to_defaults() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("absent.toml");

        let config = Config::load_with_overrides(&config_path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    #[serial]
    async fn test_env_overrides_take_precedence() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "http_timeout_seconds = 5\n")
            .await
            .unwrap();

        // SAFETY: serialized test
        unsafe {
            std::env::set_var(env_vars::API_BASE_URL, "http://localhost:9999");
            std::env::set_var(env_vars::HTTP_TIMEOUT, "12");
            std::env::set_var(env_vars::PLAYER_CACHE, "/tmp/override.json");
            std::env::set_var(env_vars::DEFAULT_SEASON, "2025");
        }

        let config = Config::load_with_overrides(&config_path.to_string_lossy())
            .await
            .unwrap();
        clear_env();

        assert_eq!(config.api_base_url, "http://localhost:9999");
        assert_eq!(config.http_timeout_seconds, 12);
        assert_eq!(config.resolved_player_cache_path(), "/tmp/override.json");
        assert_eq!(config.default_season, "2025");
    }

    #[tokio::test]
    #[serial]
    async fn test_invalid_env_override_fails_validation() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("absent.toml");

        // SAFETY: serialized test
        unsafe {
            std::env::set_var(env_vars::API_BASE_URL, "not-a-url");
        }
        let result = Config::load_with_overrides(&config_path.to_string_lossy()).await;
        clear_env();

        assert!(matches!(result.unwrap_err(), AppError::Config(_)));
    }

    #[test]
    fn test_player_cache_ttl_saturates() {
        assert_eq!(
            Config::default().player_cache_ttl(),
            Duration::from_secs(24 * 3600)
        );
        let huge = Config {
            player_cache_ttl_hours: u64::MAX,
            ..Config::default()
        };
        assert_eq!(huge.player_cache_ttl(), Duration::from_secs(u64::MAX));
    }

    #[tokio::test]
    async fn test_huge_ttl_in_file_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "player_cache_ttl_hours = 9223372036854775807\n")
            .await
            .unwrap();

        let config = Config::load_from_path(&config_path.to_string_lossy())
            .await
            .unwrap();
        assert!(matches!(config.validate().unwrap_err(), AppError::Config(_)));
    }

    #[test]
    fn test_resolved_player_cache_path_default() {
        let config = Config::default();
        assert!(
            config
                .resolved_player_cache_path()
                .ends_with(player_cache::FILE_NAME)
        );
    }
}
