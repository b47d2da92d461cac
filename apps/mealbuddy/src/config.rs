//! Session configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use match_store::{GeneratorConfig, MatchStoreError};
use serde::{Deserialize, Serialize};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub log_json: bool,

    /// Pause before a new match or candidate list is shown, in milliseconds
    #[serde(default = "default_search_delay_ms")]
    pub search_delay_ms: u64,

    /// Seed for reproducible sessions (random if not specified)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Candidate generation settings
    #[serde(default)]
    pub generator: GeneratorConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_search_delay_ms() -> u64 {
    1500
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            search_delay_ms: default_search_delay_ms(),
            seed: None,
            generator: GeneratorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional config file and the environment
    ///
    /// Environment variables take precedence over the file.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let mut config = match Self::find_config_file() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.generator.validate()?;

        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Override fields from `MEALBUDDY_*` variables returned by `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("MEALBUDDY_LOG_LEVEL") {
            self.log_level = level;
        }

        if let Some(val) = lookup("MEALBUDDY_LOG_JSON") {
            self.log_json = parse_var("MEALBUDDY_LOG_JSON", &val)?;
        }

        if let Some(val) = lookup("MEALBUDDY_SEARCH_DELAY_MS") {
            self.search_delay_ms = parse_var("MEALBUDDY_SEARCH_DELAY_MS", &val)?;
        }

        if let Some(val) = lookup("MEALBUDDY_SEED") {
            self.seed = Some(parse_var("MEALBUDDY_SEED", &val)?);
        }

        if let Some(val) = lookup("MEALBUDDY_MANUAL_OPTION_COUNT") {
            self.generator.manual_option_count = parse_var("MEALBUDDY_MANUAL_OPTION_COUNT", &val)?;
        }

        if let Some(val) = lookup("MEALBUDDY_MANUAL_ANONYMOUS_CHANCE") {
            self.generator.manual_anonymous_chance =
                parse_var("MEALBUDDY_MANUAL_ANONYMOUS_CHANCE", &val)?;
        }

        Ok(())
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let locations = [
            Some(PathBuf::from("mealbuddy.toml")),
            dirs::config_dir().map(|p| p.join("mealbuddy").join("config.toml")),
        ];

        locations.into_iter().flatten().find(|p| p.exists())
    }

    /// Get the cosmetic search delay
    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Invalid generator settings: {0}")]
    Generator(#[from] MatchStoreError),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.search_delay(), Duration::from_millis(1500));
        assert!(config.seed.is_none());
        assert_eq!(config.generator.manual_option_count, 6);
    }

    #[test]
    fn test_parse_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            log_level = "debug"
            search_delay_ms = 0
            seed = 42

            [generator]
            manual_option_count = 4
            manual_anonymous_chance = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.search_delay_ms, 0);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.generator.manual_option_count, 4);
        assert_eq!(config.generator.manual_anonymous_chance, 0.5);
        assert_eq!(config.generator.random_score_min, 70);
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("MEALBUDDY_LOG_LEVEL", "trace"),
            ("MEALBUDDY_SEARCH_DELAY_MS", "250"),
            ("MEALBUDDY_SEED", "7"),
            ("MEALBUDDY_MANUAL_OPTION_COUNT", "3"),
        ]);
        let mut config = AppConfig::default();

        config.apply_env(|key| vars.get(key).cloned()).unwrap();

        assert_eq!(config.log_level, "trace");
        assert_eq!(config.search_delay_ms, 250);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.generator.manual_option_count, 3);
    }

    #[test]
    fn test_env_wins_over_file() {
        let mut config: AppConfig = toml::from_str(
            r#"
            log_level = "debug"
            search_delay_ms = 0
            "#,
        )
        .unwrap();
        let vars = env(&[("MEALBUDDY_LOG_LEVEL", "warn")]);

        config.apply_env(|key| vars.get(key).cloned()).unwrap();

        assert_eq!(config.log_level, "warn");
        assert_eq!(config.search_delay_ms, 0);
    }

    #[test]
    fn test_env_rejects_garbage() {
        let vars = env(&[("MEALBUDDY_SEED", "not-a-number")]);
        let mut config = AppConfig::default();

        let err = config.apply_env(|key| vars.get(key).cloned()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "MEALBUDDY_SEED",
                ..
            }
        ));
    }
}
