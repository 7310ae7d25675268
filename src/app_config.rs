use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target duration used when a clip filename has no usable index
    #[serde(default = "default_target_secs")]
    pub default_target_secs: f64,

    /// Targets at or below this value always take the copy path
    #[serde(default = "default_copy_floor_secs")]
    pub copy_floor_secs: f64,

    /// Name of the output subfolder created inside the clip folder
    #[serde(default = "default_output_dir_name")]
    pub output_dir_name: String,

    /// Clip extensions to process, matched case-insensitively
    #[serde(default = "default_clip_extensions")]
    pub clip_extensions: Vec<String>,

    /// Maximum number of clips retimed in parallel
    #[serde(default = "default_concurrent_clips")]
    pub concurrent_clips: usize,

    /// Delivery encode profile
    #[serde(default)]
    pub encode: EncodeConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Fixed delivery profile applied to re-encoded clips.
///
/// A policy choice for a consistent output format, not a correctness
/// requirement.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EncodeConfig {
    /// Video codec name passed to ffmpeg
    #[serde(default = "default_video_codec")]
    pub video_codec: String,

    /// Audio codec name passed to ffmpeg
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    /// Video bitrate, e.g. "6900k"
    #[serde(default = "default_video_bitrate")]
    pub video_bitrate: String,

    /// Audio bitrate, e.g. "192k"
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: String,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            video_codec: default_video_codec(),
            audio_codec: default_audio_codec(),
            video_bitrate: default_video_bitrate(),
            audio_bitrate: default_audio_bitrate(),
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

fn default_target_secs() -> f64 {
    6.0
}

fn default_copy_floor_secs() -> f64 {
    2.0
}

fn default_output_dir_name() -> String {
    "adjusted_videos".to_string()
}

fn default_clip_extensions() -> Vec<String> {
    vec!["mp4".to_string()]
}

fn default_concurrent_clips() -> usize {
    2
}

fn default_video_codec() -> String {
    "libx264".to_string()
}

fn default_audio_codec() -> String {
    "aac".to_string()
}

fn default_video_bitrate() -> String {
    "6900k".to_string()
}

fn default_audio_bitrate() -> String {
    "192k".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.default_target_secs <= 0.0 {
            return Err(anyhow!(
                "default_target_secs must be positive, got {}",
                self.default_target_secs
            ));
        }

        if self.copy_floor_secs < 0.0 {
            return Err(anyhow!(
                "copy_floor_secs must not be negative, got {}",
                self.copy_floor_secs
            ));
        }

        if self.concurrent_clips == 0 {
            return Err(anyhow!("concurrent_clips must be at least 1"));
        }

        if self.clip_extensions.is_empty() {
            return Err(anyhow!("clip_extensions must not be empty"));
        }

        if self.output_dir_name.is_empty()
            || self.output_dir_name.contains('/')
            || self.output_dir_name.contains('\\')
        {
            return Err(anyhow!(
                "output_dir_name must be a plain folder name, got {:?}",
                self.output_dir_name
            ));
        }

        if self.encode.video_codec.is_empty() || self.encode.audio_codec.is_empty() {
            return Err(anyhow!("encode codecs must not be empty"));
        }

        if self.encode.video_bitrate.is_empty() || self.encode.audio_bitrate.is_empty() {
            return Err(anyhow!("encode bitrates must not be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            default_target_secs: default_target_secs(),
            copy_floor_secs: default_copy_floor_secs(),
            output_dir_name: default_output_dir_name(),
            clip_extensions: default_clip_extensions(),
            concurrent_clips: default_concurrent_clips(),
            encode: EncodeConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
