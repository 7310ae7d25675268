/*!
 * Tests for ffprobe output parsing
 */

use cliptempo::media_probe::{parse_frame_rate, parse_probe_output};

/// Fractional frame rates parse to their quotient
#[test]
fn test_parse_frame_rate_withFraction_shouldDivide() {
    let fps = parse_frame_rate("30000/1001").unwrap();
    assert!((fps - 29.97).abs() < 0.01);
}

/// Plain numeric frame rates parse directly
#[test]
fn test_parse_frame_rate_withPlainNumber_shouldParse() {
    assert_eq!(parse_frame_rate("25"), Some(25.0));
}

/// A zero denominator is rejected rather than dividing by zero
#[test]
fn test_parse_frame_rate_withZeroDenominator_shouldReturnNone() {
    assert_eq!(parse_frame_rate("0/0"), None);
}

/// Garbage input is rejected
#[test]
fn test_parse_frame_rate_withGarbage_shouldReturnNone() {
    assert_eq!(parse_frame_rate("abc"), None);
}

/// A complete probe document yields duration, fps and audio presence
#[test]
fn test_parse_probe_output_withVideoAndAudio_shouldExtractAll() {
    let json = r#"{
        "streams": [
            {"codec_type": "video", "avg_frame_rate": "30/1"},
            {"codec_type": "audio", "avg_frame_rate": "0/0"}
        ],
        "format": {"duration": "6.000000"}
    }"#;

    let info = parse_probe_output(json).unwrap();
    assert!((info.duration_secs - 6.0).abs() < 1e-9);
    assert!((info.fps - 30.0).abs() < 1e-9);
    assert!(info.has_audio);
}

/// Audio presence is false when only a video stream exists
#[test]
fn test_parse_probe_output_withoutAudioStream_shouldFlagNoAudio() {
    let json = r#"{
        "streams": [{"codec_type": "video", "avg_frame_rate": "24/1"}],
        "format": {"duration": "3.5"}
    }"#;

    let info = parse_probe_output(json).unwrap();
    assert!(!info.has_audio);
}

/// Duration falls back to the video stream when the format lacks it
#[test]
fn test_parse_probe_output_withStreamDurationOnly_shouldFallBack() {
    let json = r#"{
        "streams": [
            {"codec_type": "video", "avg_frame_rate": "25/1", "duration": "4.2"}
        ],
        "format": {}
    }"#;

    let info = parse_probe_output(json).unwrap();
    assert!((info.duration_secs - 4.2).abs() < 1e-9);
}

/// A document without a video stream is an error
#[test]
fn test_parse_probe_output_withoutVideoStream_shouldFail() {
    let json = r#"{
        "streams": [{"codec_type": "audio"}],
        "format": {"duration": "2.0"}
    }"#;

    assert!(parse_probe_output(json).is_err());
}

/// Non-JSON output is an error
#[test]
fn test_parse_probe_output_withInvalidJson_shouldFail() {
    assert!(parse_probe_output("not json").is_err());
}
