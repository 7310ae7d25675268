/*!
 * # cliptempo
 *
 * A Rust library for retiming batches of short video clips so each clip's
 * duration matches a target derived from a subtitle track and a storyboard
 * grouping file.
 *
 * ## Features
 *
 * - Parse SRT timecodes and cue durations
 * - Aggregate cue durations into per-segment targets via a storyboard file
 * - Frame-accurate playback-speed transforms through ffmpeg
 * - Concurrent folder-level batch processing with per-clip failure isolation
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `timecode`: SRT timestamp parsing
 * - `subtitle_durations`: Cue text to duration extraction
 * - `storyboard`: Segment grouping and target duration aggregation
 * - `media_probe`: ffprobe-based clip inspection
 * - `retime_engine`: Speed-change decisions and the ffmpeg transform
 * - `batch`: Folder batch driver with channel-based progress
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod batch;
pub mod errors;
pub mod file_utils;
pub mod media_probe;
pub mod retime_engine;
pub mod storyboard;
pub mod subtitle_durations;
pub mod timecode;

// Re-export main types for easier usage
pub use app_config::{Config, EncodeConfig};
pub use app_controller::Controller;
pub use batch::{BatchSummary, ClipProgress};
pub use errors::{AppError, RetimeError, TimecodeError};
pub use retime_engine::{RetimeDecision, RetimeOutcome};
pub use storyboard::{SegmentGroup, TargetDuration};
