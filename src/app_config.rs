use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::language::LanguageTag;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language used when none is given on the command line
    #[serde(default)]
    pub default_language: LanguageTag,

    /// Analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Annotations used when a lexicon has no entry
    #[serde(default)]
    pub placeholder: PlaceholderConfig,

    /// Display settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Analysis pipeline settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AnalysisConfig {
    /// Upper bound on a single analyzer call, in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Extra JSON lexicons layered over the built-in ones
    #[serde(default)]
    pub lexicon_paths: HashMap<LanguageTag, PathBuf>,
}

impl AnalysisConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Placeholder annotations for units missing from the lexicon
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaceholderConfig {
    /// Pronunciation shown for unknown characters
    #[serde(default = "default_character_pronunciation")]
    pub character_pronunciation: Option<String>,

    /// Pronunciation shown for unknown words
    #[serde(default)]
    pub word_pronunciation: Option<String>,

    /// Definition shown for any unknown unit
    #[serde(default = "default_placeholder_definition")]
    pub definition: String,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            character_pronunciation: default_character_pronunciation(),
            word_pronunciation: None,
            definition: default_placeholder_definition(),
        }
    }
}

/// Display settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RenderConfig {
    /// Show pronunciation above characters for ruby-style languages
    #[serde(default = "default_true")]
    pub show_pronunciation: bool,

    /// Name of the language idiomatic translations are written in
    #[serde(default = "default_target_language_label")]
    pub target_language_label: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            show_pronunciation: true,
            target_language_label: default_target_language_label(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_character_pronunciation() -> Option<String> {
    Some("pīnyīn".to_string())
}

fn default_placeholder_definition() -> String {
    "definition".to_string()
}

fn default_target_language_label() -> String {
    "English".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.placeholder.definition.trim().is_empty() {
            return Err(anyhow!(
                "Placeholder definition must not be empty: interactive segments always need a definition"
            ));
        }

        if self.analysis.timeout_ms == Some(0) {
            return Err(anyhow!("Analysis timeout must be greater than zero"));
        }

        for (language, path) in &self.analysis.lexicon_paths {
            if path.as_os_str().is_empty() {
                return Err(anyhow!("Lexicon path for {} is empty", language));
            }
        }

        Ok(())
    }

    /// Default location of the configuration file
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("annotext").join("conf.json"))
            .unwrap_or_else(|| PathBuf::from("conf.json"))
    }

    /// Load the configuration, writing a default file if none exists yet
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let file = File::open(path)
                .context(format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context(format!("Failed to create config directory: {}", parent.display()))?;
            }
        }

        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .context(format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            default_language: LanguageTag::default(),
            analysis: AnalysisConfig::default(),
            placeholder: PlaceholderConfig::default(),
            render: RenderConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
