use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Time limits offered on the settings screen; `None` means no limit.
pub const TIME_LIMIT_CHOICES: [Option<u32>; 6] =
    [None, Some(20), Some(30), Some(40), Some(50), Some(60)];

pub const LANGUAGES: [&str; 2] = ["ja", "en"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid time limit {0:?}: expected a positive number of seconds or \"none\"")]
    InvalidTimeLimit(String),
}

/// A time limit as given on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeLimitArg(pub Option<u32>);

impl FromStr for TimeLimitArg {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") || s.eq_ignore_ascii_case("off") {
            return Ok(TimeLimitArg(None));
        }
        match s.parse::<u32>() {
            Ok(secs) if secs > 0 => Ok(TimeLimitArg(Some(secs))),
            _ => Err(ConfigError::InvalidTimeLimit(s.to_string())),
        }
    }
}

/// Command-line values that apply to this run only and are never saved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub time_limit: Option<Option<u32>>,
    pub theme: Option<String>,
    pub language: Option<String>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self.time_limit.is_none() && self.theme.is_none() && self.language.is_none()
    }

    pub fn apply(&self, config: &mut Config) {
        if let Some(limit) = self.time_limit {
            config.time_limit = limit;
        }
        if let Some(ref theme) = self.theme {
            config.theme = theme.clone();
        }
        if let Some(ref language) = self.language {
            config.language = language.clone();
        }
        config.validate();
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_theme() -> String {
    "daylight".to_string()
}
fn default_language() -> String {
    "ja".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_limit: None,
            theme: default_theme(),
            language: default_language(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nanji-attack")
            .join("config.toml")
    }

    /// Reset values a hand-edited file may have broken.
    pub fn validate(&mut self) {
        if self.time_limit == Some(0) {
            self.time_limit = None;
        }
        if !LANGUAGES.contains(&self.language.as_str()) {
            self.language = default_language();
        }
    }

    pub fn cycle_time_limit_forward(&mut self) {
        let idx = Self::time_limit_index(self.time_limit);
        self.time_limit = TIME_LIMIT_CHOICES[(idx + 1) % TIME_LIMIT_CHOICES.len()];
    }

    pub fn cycle_time_limit_backward(&mut self) {
        let idx = Self::time_limit_index(self.time_limit);
        let prev = if idx == 0 {
            TIME_LIMIT_CHOICES.len() - 1
        } else {
            idx - 1
        };
        self.time_limit = TIME_LIMIT_CHOICES[prev];
    }

    /// Custom limits (from the CLI or a hand-edited file) cycle from "none".
    fn time_limit_index(limit: Option<u32>) -> usize {
        TIME_LIMIT_CHOICES
            .iter()
            .position(|&c| c == limit)
            .unwrap_or(0)
    }

    pub fn cycle_language(&mut self) {
        let idx = LANGUAGES
            .iter()
            .position(|&l| l == self.language)
            .unwrap_or(0);
        self.language = LANGUAGES[(idx + 1) % LANGUAGES.len()].to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.time_limit, None);
    }

    #[test]
    fn test_config_serde_roundtrip_with_limit() {
        let mut config = Config::default();
        config.time_limit = Some(40);
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_config_serde_roundtrip_without_limit() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        assert!(!serialized.contains("time_limit"));
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.time_limit, None);
    }

    #[test]
    fn test_validate_resets_bad_values() {
        let mut config = Config {
            time_limit: Some(0),
            theme: "daylight".to_string(),
            language: "fr".to_string(),
        };
        config.validate();
        assert_eq!(config.time_limit, None);
        assert_eq!(config.language, "ja");
    }

    #[test]
    fn test_time_limit_cycles_through_choices() {
        let mut config = Config::default();
        let mut seen = Vec::new();
        for _ in 0..TIME_LIMIT_CHOICES.len() {
            config.cycle_time_limit_forward();
            seen.push(config.time_limit);
        }
        assert_eq!(
            seen,
            vec![Some(20), Some(30), Some(40), Some(50), Some(60), None]
        );
        config.cycle_time_limit_backward();
        assert_eq!(config.time_limit, Some(60));
    }

    #[test]
    fn test_custom_limit_cycles_from_none() {
        let mut config = Config::default();
        config.time_limit = Some(90);
        config.cycle_time_limit_forward();
        assert_eq!(config.time_limit, Some(20));
    }

    #[test]
    fn test_save_to_and_load_from() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        let config = Config {
            time_limit: Some(30),
            theme: "night".to_string(),
            language: "en".to_string(),
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_overrides_apply_only_given_fields() {
        let mut config = Config::default();
        let overrides = ConfigOverrides {
            time_limit: Some(Some(45)),
            language: Some("fr".to_string()),
            ..ConfigOverrides::default()
        };
        overrides.apply(&mut config);
        assert_eq!(config.time_limit, Some(45));
        assert_eq!(config.theme, "daylight");
        // Unknown languages fall back to the default.
        assert_eq!(config.language, "ja");
        assert!(ConfigOverrides::default().is_empty());
        assert!(!overrides.is_empty());
    }

    #[test]
    fn test_time_limit_arg_parsing() {
        assert_eq!("none".parse::<TimeLimitArg>(), Ok(TimeLimitArg(None)));
        assert_eq!(" 45 ".parse::<TimeLimitArg>(), Ok(TimeLimitArg(Some(45))));
        assert_eq!(
            "0".parse::<TimeLimitArg>(),
            Err(ConfigError::InvalidTimeLimit("0".to_string()))
        );
        assert!("soon".parse::<TimeLimitArg>().is_err());
    }
}
