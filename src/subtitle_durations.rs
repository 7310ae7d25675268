use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::file_utils::FileManager;
use crate::timecode::parse_timecode;

// @module: Subtitle cue duration extraction

// @const: SRT index line regex (digits only)
static INDEX_LINE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

/// Scan SRT content into a mapping from cue text to cue duration in seconds.
///
/// The scan is line-oriented: a digits-only line starts a block, the next line
/// must carry the `-->` timing pair and the line after it is taken as the cue
/// text. Only that single text line is captured; wrapped continuation lines
/// are ignored. When the same text appears in several cues, the last
/// occurrence's duration wins.
///
/// Blocks with a missing or unparseable timing line are skipped without
/// failing the scan.
pub fn extract_durations(content: &str) -> HashMap<String, f64> {
    // Tolerate a UTF-8 BOM at the start of the file
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let lines: Vec<&str> = content.lines().collect();

    let mut durations = HashMap::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();
        if line.is_empty() {
            i += 1;
            continue;
        }

        if INDEX_LINE_REGEX.is_match(line) && i + 2 < lines.len() {
            let timing_line = lines[i + 1].trim();
            let text_line = lines[i + 2].trim();

            if let Some((start_raw, end_raw)) = timing_line.split_once("-->") {
                match (parse_timecode(start_raw), parse_timecode(end_raw)) {
                    (Ok(start), Ok(end)) => {
                        // Last occurrence wins for repeated cue text
                        durations.insert(text_line.to_string(), end - start);
                        i += 3;
                        continue;
                    }
                    _ => {
                        debug!("Skipping cue with unparseable timing: {}", timing_line);
                    }
                }
            }
        }

        i += 1;
    }

    if durations.is_empty() {
        warn!("No subtitle cues found in content");
    }

    durations
}

/// Read a subtitle file and extract its text-to-duration mapping
pub fn extract_durations_from_file<P: AsRef<Path>>(path: P) -> Result<HashMap<String, f64>> {
    let content = FileManager::read_to_string(&path)
        .with_context(|| format!("Failed to read subtitle file: {:?}", path.as_ref()))?;
    Ok(extract_durations(&content))
}
