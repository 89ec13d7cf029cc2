/*!
 * Tests for application configuration functionality
 */

use std::path::PathBuf;
use std::time::Duration;

use annotext::app_config::{Config, LogLevel};
use annotext::language::LanguageTag;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.default_language, LanguageTag::Chinese);
    assert_eq!(config.analysis.timeout_ms, None);
    assert!(config.analysis.lexicon_paths.is_empty());
    assert_eq!(config.placeholder.character_pronunciation.as_deref(), Some("pīnyīn"));
    assert_eq!(config.placeholder.word_pronunciation, None);
    assert_eq!(config.placeholder.definition, "definition");
    assert!(config.render.show_pronunciation);
    assert_eq!(config.render.target_language_label, "English");
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // A placeholder definition is mandatory for interactive segments
    config.placeholder.definition = "   ".to_string();
    assert!(config.validate().is_err());
    config.placeholder.definition = "definition".to_string();

    // Zero timeout would fail every request
    config.analysis.timeout_ms = Some(0);
    assert!(config.validate().is_err());
    config.analysis.timeout_ms = Some(250);
    assert!(config.validate().is_ok());

    config
        .analysis
        .lexicon_paths
        .insert(LanguageTag::Hindi, PathBuf::new());
    assert!(config.validate().is_err());
}

#[test]
fn test_analysis_timeout_withMilliseconds_shouldConvertToDuration() {
    let mut config = Config::default();
    assert_eq!(config.analysis.timeout(), None);

    config.analysis.timeout_ms = Some(1500);
    assert_eq!(config.analysis.timeout(), Some(Duration::from_millis(1500)));
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("nested").join("conf.json");

    let config = Config::load_or_create(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.default_language, LanguageTag::Chinese);

    // A second load reads the written file back
    let reloaded = Config::load_or_create(&path).unwrap();
    assert_eq!(reloaded.placeholder, config.placeholder);
    assert_eq!(reloaded.render, config.render);
}

#[test]
fn test_loadOrCreate_withPartialFile_shouldFillDefaults() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        dir.path(),
        "conf.json",
        r#"{ "default_language": "portuguese", "analysis": { "timeout_ms": 500 } }"#,
    )
    .unwrap();

    let config = Config::load_or_create(&path).unwrap();

    assert_eq!(config.default_language, LanguageTag::Portuguese);
    assert_eq!(config.analysis.timeout_ms, Some(500));
    assert_eq!(config.placeholder.definition, "definition");
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "conf.json", "{ not json").unwrap();

    assert!(Config::load_or_create(&path).is_err());
}

#[test]
fn test_logLevel_shouldMapToLevelFilter() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
    assert_eq!(LogLevel::default().to_level_filter(), log::LevelFilter::Info);
}
