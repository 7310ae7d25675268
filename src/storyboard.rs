use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::file_utils::FileManager;

// @module: Storyboard grouping and target-duration aggregation

/// One storyboard unit: an ordered list of cue-text tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentGroup {
    /// Cue text tokens referencing subtitle lines
    pub tokens: Vec<String>,
}

impl SegmentGroup {
    /// Build a group from a single storyboard line.
    ///
    /// A line containing commas yields one token per comma-separated part,
    /// trimmed; otherwise the whole trimmed line is a single token.
    pub fn from_line(line: &str) -> Self {
        let cleaned = line.trim();
        let tokens = if cleaned.contains(',') {
            cleaned.split(',').map(|item| item.trim().to_string()).collect()
        } else {
            vec![cleaned.to_string()]
        };
        SegmentGroup { tokens }
    }
}

/// Target duration for one output segment
#[derive(Debug, Clone, PartialEq)]
pub struct TargetDuration {
    /// 0-based segment ordinal; clip filenames encode `segment + 1`
    pub segment: usize,

    /// Desired output length in seconds
    pub seconds: f64,
}

/// Parse storyboard content into ordered segment groups.
///
/// Blank lines are dropped without emitting a placeholder; group order is
/// file order.
pub fn read_groups(content: &str) -> Vec<SegmentGroup> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(SegmentGroup::from_line)
        .collect()
}

/// Read a storyboard file into ordered segment groups
pub fn read_groups_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<SegmentGroup>> {
    let content = FileManager::read_to_string(&path)
        .with_context(|| format!("Failed to read storyboard file: {:?}", path.as_ref()))?;
    Ok(read_groups(&content))
}

/// Combine segment groups with cue durations into the Target Duration Table.
///
/// Each group's value is the sum of the recorded duration for every token
/// present in the mapping; tokens without a matching cue contribute zero.
/// Group order is preserved.
pub fn build_target_table(
    groups: &[SegmentGroup],
    durations: &HashMap<String, f64>,
) -> Vec<TargetDuration> {
    groups
        .iter()
        .enumerate()
        .map(|(segment, group)| {
            let seconds: f64 = group
                .tokens
                .iter()
                .filter_map(|token| durations.get(token))
                .sum();
            debug!("{} {}: {}", segment, group.tokens.join(","), seconds);
            TargetDuration { segment, seconds }
        })
        .collect()
}
