use std::path::Path;

use log::{debug, info, warn};
use tokio::process::Command;

use crate::app_config::EncodeConfig;
use crate::errors::RetimeError;
use crate::file_utils::FileManager;
use crate::media_probe::{MediaInfo, probe_media};

// @module: Clip retiming engine

// @const: Wall-clock limit for a single ffmpeg encode
const ENCODE_TIMEOUT_SECS: u64 = 600;

/// The transform selected for one clip
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RetimeDecision {
    /// Source already satisfies the target; carried over byte-for-byte
    Copy,

    /// Source is shorter than the target; playback is stretched
    SlowDown {
        /// original/target ratio, in (0, 1)
        factor: f64,
    },

    /// Source is longer than the target; playback is compressed
    SpeedUp {
        /// original/target ratio, above 1
        factor: f64,
    },
}

impl RetimeDecision {
    /// Short label for progress lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::SlowDown { .. } => "slow",
            Self::SpeedUp { .. } => "speed",
        }
    }
}

/// Result of retiming one clip
#[derive(Debug, Clone)]
pub struct RetimeOutcome {
    /// The transform that was applied
    pub decision: RetimeDecision,

    /// Re-probed output duration, when verification succeeded
    pub output_duration_secs: Option<f64>,
}

/// Select the transform for a clip.
///
/// Exactly one variant applies: a source shorter than the target is slowed
/// down; a source longer than a target above the copy floor is sped up;
/// everything else, including `original == target` and targets at or below
/// the floor, is a plain copy.
pub fn decide(original_secs: f64, target_secs: f64, copy_floor_secs: f64) -> RetimeDecision {
    if original_secs < target_secs {
        RetimeDecision::SlowDown {
            factor: original_secs / target_secs,
        }
    } else if original_secs > target_secs && target_secs > copy_floor_secs {
        RetimeDecision::SpeedUp {
            factor: original_secs / target_secs,
        }
    } else {
        RetimeDecision::Copy
    }
}

/// Number of frames the output must contain for a frame-exact target
pub fn frame_exact_frames(target_secs: f64, fps: f64) -> u64 {
    (target_secs * fps).round() as u64
}

/// Factor an audio tempo ratio into stages the atempo filter accepts.
///
/// atempo only takes values in [0.5, 2.0]; ratios outside that range are
/// split into a chain of stages whose product equals the requested factor.
pub fn atempo_chain(factor: f64) -> Vec<f64> {
    let mut stages = Vec::new();
    let mut remaining = factor;

    while remaining > 2.0 {
        stages.push(2.0);
        remaining /= 2.0;
    }
    while remaining < 0.5 {
        stages.push(0.5);
        remaining /= 0.5;
    }
    stages.push(remaining);

    stages
}

/// Build the ffmpeg filter graph for a uniform speed change.
///
/// Video playback time is scaled with setpts and then trimmed to an exact
/// frame count; audio tempo follows the same factor through a chained
/// atempo and is trimmed to the same wall-clock length.
pub fn build_filter_graph(factor: f64, total_frames: u64, fps: f64, has_audio: bool) -> String {
    let video = format!(
        "[0:v]setpts=PTS/{factor:.6},trim=end_frame={total_frames}[v]"
    );

    if !has_audio {
        return video;
    }

    let tempo: Vec<String> = atempo_chain(factor)
        .iter()
        .map(|stage| format!("atempo={stage:.6}"))
        .collect();
    let end_secs = total_frames as f64 / fps;

    format!("{video};[0:a]{},atrim=end={end_secs:.6}[a]", tempo.join(","))
}

/// Retime a clip to a target duration.
///
/// Probes the source, picks the transform and either copies the file
/// unchanged or runs a single ffmpeg pass combining the speed change with a
/// frame-accurate trim. The transformed output is re-probed and any duration
/// drift beyond half a frame is logged, never treated as a failure; the
/// trim itself is the correctness guarantee.
pub async fn retime_clip(
    input: &Path,
    output: &Path,
    target_secs: f64,
    copy_floor_secs: f64,
    encode: &EncodeConfig,
) -> Result<RetimeOutcome, RetimeError> {
    let clip = clip_name(input);

    let info = probe_media(input).await.map_err(|e| RetimeError::ClipOpen {
        clip: clip.clone(),
        reason: e.to_string(),
    })?;
    debug!(
        "{}: original {:.2}s at {:.3} fps, target {:.2}s",
        clip, info.duration_secs, info.fps, target_secs
    );

    let decision = decide(info.duration_secs, target_secs, copy_floor_secs);
    match decision {
        RetimeDecision::Copy => {
            FileManager::copy_file(input, output).map_err(|e| RetimeError::ClipWrite {
                clip: clip.clone(),
                reason: e.to_string(),
            })?;
            Ok(RetimeOutcome {
                decision,
                output_duration_secs: None,
            })
        }
        RetimeDecision::SlowDown { factor } | RetimeDecision::SpeedUp { factor } => {
            if factor <= 0.0 {
                return Err(RetimeError::InvalidSpeedFactor { clip, factor });
            }

            apply_speed_transform(input, output, factor, target_secs, &info, encode)
                .await
                .map_err(|reason| RetimeError::ClipWrite {
                    clip: clip.clone(),
                    reason,
                })?;

            let output_duration_secs = verify_output(output, target_secs, info.fps, &clip).await;

            Ok(RetimeOutcome {
                decision,
                output_duration_secs,
            })
        }
    }
}

/// Run the ffmpeg pass that applies the speed factor and frame-exact trim
async fn apply_speed_transform(
    input: &Path,
    output: &Path,
    factor: f64,
    target_secs: f64,
    info: &MediaInfo,
    encode: &EncodeConfig,
) -> Result<(), String> {
    let total_frames = frame_exact_frames(target_secs, info.fps);
    let filter = build_filter_graph(factor, total_frames, info.fps, info.has_audio);
    let fps_arg = format!("{:.6}", info.fps);

    let mut args: Vec<&str> = vec![
        "-y",
        "-i", input.to_str().unwrap_or_default(),
        "-filter_complex", filter.as_str(),
        "-map", "[v]",
    ];
    if info.has_audio {
        args.extend([
            "-map", "[a]",
            "-c:a", encode.audio_codec.as_str(),
            "-b:a", encode.audio_bitrate.as_str(),
        ]);
    }
    args.extend([
        "-c:v", encode.video_codec.as_str(),
        "-b:v", encode.video_bitrate.as_str(),
        "-r", fps_arg.as_str(),
        output.to_str().unwrap_or_default(),
    ]);

    let ffmpeg_future = Command::new("ffmpeg").args(&args).output();

    let timeout_duration = std::time::Duration::from_secs(ENCODE_TIMEOUT_SECS);
    let result = tokio::select! {
        result = ffmpeg_future => {
            result.map_err(|e| format!("Failed to execute ffmpeg command: {}", e))?
        },
        _ = tokio::time::sleep(timeout_duration) => {
            return Err(format!("ffmpeg command timed out after {} seconds", ENCODE_TIMEOUT_SECS));
        }
    };

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(filter_ffmpeg_stderr(&stderr));
    }

    Ok(())
}

/// Re-open the output and compare its duration against the target.
///
/// This is an observability signal only; a mismatch is logged and the
/// operation still counts as successful.
async fn verify_output(output: &Path, target_secs: f64, fps: f64, clip: &str) -> Option<f64> {
    match probe_media(output).await {
        Ok(out_info) => {
            let half_frame = 0.5 / fps;
            let drift = (out_info.duration_secs - target_secs).abs();
            if drift > half_frame {
                warn!(
                    "{}: output duration {:.3}s drifts {:.3}s from target {:.3}s",
                    clip, out_info.duration_secs, drift, target_secs
                );
            } else {
                info!("{}: output duration {:.3}s", clip, out_info.duration_secs);
            }
            Some(out_info.duration_secs)
        }
        Err(e) => {
            warn!("{}: could not verify output duration: {}", clip, e);
            None
        }
    }
}

fn clip_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Filter ffmpeg stderr to only show meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let dominated_prefixes = [
        "ffmpeg version",
        "  built with",
        "  configuration:",
        "  lib",
        "Input #",
        "  Metadata:",
        "  Duration:",
        "  Stream #",
        "      Metadata:",
        "Output #",
        "Stream mapping:",
        "Press [q]",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !dominated_prefixes.iter().any(|p| line.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
