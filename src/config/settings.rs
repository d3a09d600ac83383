//! TOML-based configuration for reqforge.
//!
//! Example configuration:
//! ```toml
//! [analysis]
//! keep_stop_words = true
//! attribute_window = 6
//! max_input_chars = 20000
//! detect_capitalized_terms = false
//!
//! [dictionary.modules]
//! authentication = ["single sign on", "sso"]
//!
//! [dictionary.entities]
//! Vehicle = ["vehicle", "car"]
//!
//! [output]
//! dialect = "postgres"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dictionary::DictionaryError;
use crate::sql::Dialect;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid dictionary extension: {0}")]
    Dictionary(#[from] DictionaryError),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Analysis tuning.
    pub analysis: AnalysisSettings,

    /// Extra vocabulary merged into the built-in dictionary.
    pub dictionary: DictionarySettings,

    /// Output defaults for the CLI.
    pub output: OutputSettings,
}

/// Analysis tuning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Keep stop words in the token stream. When off, relationship phrases
    /// are matched without their stop words ("belongs to" as `belongs`).
    pub keep_stop_words: bool,

    /// Max token distance between an attribute keyword and its entity.
    pub attribute_window: usize,

    /// Reject longer input.
    pub max_input_chars: usize,

    /// Promote capitalized mid-sentence words to entities.
    pub detect_capitalized_terms: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            keep_stop_words: true,
            attribute_window: 6,
            max_input_chars: 20_000,
            detect_capitalized_terms: false,
        }
    }
}

/// Extra vocabulary. Module keys are tag names (`authentication`,
/// `data_storage`, ...); entity keys are PascalCase entity names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DictionarySettings {
    pub modules: BTreeMap<String, Vec<String>>,
    pub entities: BTreeMap<String, Vec<String>>,
}

impl DictionarySettings {
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.entities.is_empty()
    }
}

/// Output defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// SQL dialect for DDL output.
    pub dialect: Dialect,
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `REQFORGE_CONFIG`
    /// 2. `./reqforge.toml`
    /// 3. `~/.config/reqforge/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("REQFORGE_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("reqforge.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("reqforge").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.analysis.attribute_window == 0 {
            return Err(SettingsError::InvalidConfig(
                "analysis.attribute_window must be at least 1".to_string(),
            ));
        }
        if self.analysis.max_input_chars == 0 {
            return Err(SettingsError::InvalidConfig(
                "analysis.max_input_chars must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
