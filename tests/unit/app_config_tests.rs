/*!
 * Tests for application configuration
 */

use cliptempo::app_config::{Config, EncodeConfig, LogLevel};

/// Defaults mirror the original delivery policy
#[test]
fn test_config_default_shouldCarryRetimingDefaults() {
    let config = Config::default();

    assert_eq!(config.default_target_secs, 6.0);
    assert_eq!(config.copy_floor_secs, 2.0);
    assert_eq!(config.output_dir_name, "adjusted_videos");
    assert_eq!(config.clip_extensions, vec!["mp4".to_string()]);
    assert!(config.concurrent_clips >= 1);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Encode profile defaults to the fixed delivery format
#[test]
fn test_encode_config_default_shouldUseDeliveryProfile() {
    let encode = EncodeConfig::default();

    assert_eq!(encode.video_codec, "libx264");
    assert_eq!(encode.audio_codec, "aac");
    assert_eq!(encode.video_bitrate, "6900k");
    assert_eq!(encode.audio_bitrate, "192k");
}

/// The default configuration validates cleanly
#[test]
fn test_config_validate_withDefaults_shouldPass() {
    assert!(Config::default().validate().is_ok());
}

/// Non-positive targets are rejected
#[test]
fn test_config_validate_withZeroTarget_shouldFail() {
    let mut config = Config::default();
    config.default_target_secs = 0.0;
    assert!(config.validate().is_err());
}

/// Zero worker count is rejected
#[test]
fn test_config_validate_withZeroConcurrency_shouldFail() {
    let mut config = Config::default();
    config.concurrent_clips = 0;
    assert!(config.validate().is_err());
}

/// The output folder must be a plain name, not a path
#[test]
fn test_config_validate_withPathLikeOutputDir_shouldFail() {
    let mut config = Config::default();
    config.output_dir_name = "out/nested".to_string();
    assert!(config.validate().is_err());
}

/// An empty extension set is rejected
#[test]
fn test_config_validate_withEmptyExtensions_shouldFail() {
    let mut config = Config::default();
    config.clip_extensions.clear();
    assert!(config.validate().is_err());
}

/// Partial JSON fills missing fields from defaults
#[test]
fn test_config_deserialize_withPartialJson_shouldApplyDefaults() {
    let config: Config = serde_json::from_str(r#"{"default_target_secs": 8.0}"#).unwrap();

    assert_eq!(config.default_target_secs, 8.0);
    assert_eq!(config.copy_floor_secs, 2.0);
    assert_eq!(config.output_dir_name, "adjusted_videos");
}

/// Log level round-trips through lowercase serde names
#[test]
fn test_config_deserialize_withLogLevel_shouldParseLowercase() {
    let config: Config = serde_json::from_str(r#"{"log_level": "debug"}"#).unwrap();
    assert_eq!(config.log_level, LogLevel::Debug);
}
