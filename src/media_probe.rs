use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::error;
use serde_json::{Value, from_str};
use tokio::process::Command;

// @module: ffprobe-based media inspection

/// Basic playback properties of a media file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaInfo {
    /// Container duration in seconds
    pub duration_secs: f64,

    /// Video frame rate in frames per second
    pub fps: f64,

    /// Whether the file carries at least one audio stream
    pub has_audio: bool,
}

/// Probe a media file for its duration, frame rate and audio presence.
///
/// Uses ffprobe JSON output with a timeout to avoid hanging on problematic
/// files.
pub async fn probe_media<P: AsRef<Path>>(path: P) -> Result<MediaInfo> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(anyhow!("Media file not found: {:?}", path));
    }

    let ffprobe_future = Command::new("ffprobe")
        .args([
            "-v", "quiet",
            "-print_format", "json",
            "-show_format",
            "-show_streams",
            path.to_str().unwrap_or(""),
        ])
        .output();

    let timeout_duration = std::time::Duration::from_secs(60); // 1 minute timeout
    let output = tokio::select! {
        result = ffprobe_future => {
            result.map_err(|e| anyhow!("Failed to execute ffprobe command: {}", e))?
        },
        _ = tokio::time::sleep(timeout_duration) => {
            return Err(anyhow!("ffprobe command timed out after 60 seconds"));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("ffprobe failed for {:?}: {}", path, stderr);
        return Err(anyhow!("ffprobe command failed: {}", stderr));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_probe_output(&stdout).with_context(|| format!("Unusable ffprobe output for {:?}", path))
}

/// Parse ffprobe JSON output into a [`MediaInfo`].
///
/// Duration comes from the container format section, falling back to the
/// video stream; frame rate is read from the video stream's `avg_frame_rate`
/// fraction.
pub fn parse_probe_output(stdout: &str) -> Result<MediaInfo> {
    let json: Value = from_str(stdout).context("Failed to parse ffprobe JSON output")?;

    let streams = json
        .get("streams")
        .and_then(|s| s.as_array())
        .ok_or_else(|| anyhow!("ffprobe output has no streams section"))?;

    let video_stream = streams
        .iter()
        .find(|s| s.get("codec_type").and_then(|t| t.as_str()) == Some("video"))
        .ok_or_else(|| anyhow!("No video stream found"))?;

    let has_audio = streams
        .iter()
        .any(|s| s.get("codec_type").and_then(|t| t.as_str()) == Some("audio"));

    let fps = video_stream
        .get("avg_frame_rate")
        .and_then(|r| r.as_str())
        .and_then(parse_frame_rate)
        .filter(|fps| *fps > 0.0)
        .ok_or_else(|| anyhow!("No usable frame rate in video stream"))?;

    let duration_secs = json
        .get("format")
        .and_then(|f| f.get("duration"))
        .and_then(|d| d.as_str())
        .and_then(|d| d.parse::<f64>().ok())
        .or_else(|| {
            video_stream
                .get("duration")
                .and_then(|d| d.as_str())
                .and_then(|d| d.parse::<f64>().ok())
        })
        .ok_or_else(|| anyhow!("No usable duration in ffprobe output"))?;

    Ok(MediaInfo {
        duration_secs,
        fps,
        has_audio,
    })
}

/// Parse an ffprobe frame-rate expression like `30000/1001` or `25`
pub fn parse_frame_rate(raw: &str) -> Option<f64> {
    match raw.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 { None } else { Some(num / den) }
        }
        None => raw.trim().parse().ok(),
    }
}
