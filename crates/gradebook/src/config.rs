//! Configuration management for gradebook.
//!
//! This module provides configuration loading and validation using figment,
//! supporting a TOML config file, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "gradebook";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `GRADEBOOK_`, sections split on `__`)
/// 2. TOML config file at `~/.config/gradebook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gradebook configuration.
    pub gradebook: GradebookConfig,
    /// Report display configuration.
    pub display: DisplayConfig,
}

/// Curriculum and start-up data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradebookConfig {
    /// Subjects every student is enrolled in.
    pub subjects: Vec<String>,
    /// Load the sample students when the interactive menu starts.
    pub sample_data: bool,
}

/// Report display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Number of students shown by "top performers" when none is given.
    pub top_performers: usize,
    /// Percentage represented by one block of a distribution bar.
    pub bar_step_percent: u32,
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            subjects: default_subjects(),
            sample_data: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            top_performers: 5,
            bar_step_percent: 2,
        }
    }
}

/// Default curriculum.
#[must_use]
pub fn default_subjects() -> Vec<String> {
    vec![
        "Mathematics".to_string(),
        "English".to_string(),
        "Science".to_string(),
    ]
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `GRADEBOOK_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        debug!("Loading configuration from {}", config_file.display());

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("GRADEBOOK_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let subjects = &self.gradebook.subjects;
        if subjects.is_empty() {
            return Err(Error::ConfigValidation {
                message: "at least one subject must be configured".to_string(),
            });
        }

        for (i, subject) in subjects.iter().enumerate() {
            if subject.trim().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "subject names cannot be blank".to_string(),
                });
            }
            if subjects[..i].iter().any(|s| s.trim() == subject.trim()) {
                return Err(Error::ConfigValidation {
                    message: format!("duplicate subject: {subject}"),
                });
            }
        }

        if self.display.top_performers == 0 {
            return Err(Error::ConfigValidation {
                message: "top_performers must be greater than 0".to_string(),
            });
        }

        if !(1..=100).contains(&self.display.bar_step_percent) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "bar_step_percent ({}) must be between 1 and 100",
                    self.display.bar_step_percent
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.gradebook.subjects, default_subjects());
        assert!(config.gradebook.sample_data);
        assert_eq!(config.display.top_performers, 5);
        assert_eq!(config.display.bar_step_percent, 2);
    }

    #[test]
    fn test_default_subjects() {
        assert_eq!(default_subjects(), vec!["Mathematics", "English", "Science"]);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_no_subjects() {
        let mut config = Config::default();
        config.gradebook.subjects.clear();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("at least one subject"));
    }

    #[test]
    fn test_validate_blank_subject() {
        let mut config = Config::default();
        config.gradebook.subjects.push("   ".to_string());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("blank"));
    }

    #[test]
    fn test_validate_duplicate_subject() {
        let mut config = Config::default();
        config.gradebook.subjects.push(" Science".to_string());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("duplicate subject"));
    }

    #[test]
    fn test_validate_zero_top_performers() {
        let mut config = Config::default();
        config.display.top_performers = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("top_performers"));
    }

    #[test]
    fn test_validate_bar_step_bounds() {
        let mut config = Config::default();
        config.display.bar_step_percent = 0;
        assert!(config.validate().is_err());

        config.display.bar_step_percent = 101;
        assert!(config.validate().is_err());

        config.display.bar_step_percent = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("gradebook"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[gradebook]
subjects = ["History", "Art"]
sample_data = false

[display]
top_performers = 3
"#
        )
        .unwrap();

        let config = Config::load_from(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.gradebook.subjects, vec!["History", "Art"]);
        assert!(!config.gradebook.sample_data);
        assert_eq!(config.display.top_performers, 3);
        assert_eq!(config.display.bar_step_percent, 2);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gradebook]\nsubjects = []").unwrap();

        let err = Config::load_from(Some(file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\ntop_performers = \"many\"").unwrap();

        let err = Config::load_from(Some(file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, Error::ConfigLoad(_)));
    }

    #[test]
    fn test_config_serialize() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("subjects"));
        assert!(json.contains("bar_step_percent"));
    }

    #[test]
    fn test_display_config_deserialize() {
        let json = r#"{"top_performers": 10}"#;
        let display: DisplayConfig = serde_json::from_str(json).unwrap();
        assert_eq!(display.top_performers, 10);
        assert_eq!(display.bar_step_percent, 2);
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(config, cloned);
    }
}
