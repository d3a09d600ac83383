//! Configuration module for reqforge.
//!
//! Handles the settings file and its defaults.

mod settings;

pub use settings::{AnalysisSettings, DictionarySettings, OutputSettings, Settings, SettingsError};
