/*!
 * Tests for storyboard grouping and target duration aggregation
 */

use std::collections::HashMap;

use cliptempo::storyboard::{SegmentGroup, build_target_table, read_groups};
use cliptempo::subtitle_durations::extract_durations;

use crate::common;

/// Lines with commas split into trimmed tokens, plain lines stay whole
#[test]
fn test_read_groups_withMixedLines_shouldSplitOnCommas() {
    let groups = read_groups("A, B\nC\n  D ,E  \n");

    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].tokens, vec!["A", "B"]);
    assert_eq!(groups[1].tokens, vec!["C"]);
    assert_eq!(groups[2].tokens, vec!["D", "E"]);
}

/// Blank lines are dropped without emitting placeholder groups
#[test]
fn test_read_groups_withBlankLines_shouldDropThem() {
    let groups = read_groups("A\n\n   \nB\n");

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].tokens, vec!["A"]);
    assert_eq!(groups[1].tokens, vec!["B"]);
}

/// Group order follows file order
#[test]
fn test_read_groups_withSeveralLines_shouldPreserveOrder() {
    let groups = read_groups("third\nfirst\nsecond\n");
    let firsts: Vec<&str> = groups.iter().map(|g| g.tokens[0].as_str()).collect();
    assert_eq!(firsts, vec!["third", "first", "second"]);
}

/// The canonical fixture yields the target table [4.0, 1.5]
#[test]
fn test_build_target_table_withSampleFixture_shouldSumGroupDurations() {
    let durations = extract_durations(common::SAMPLE_SRT);
    let groups = read_groups(common::SAMPLE_STORYBOARD);

    let table = build_target_table(&groups, &durations);

    assert_eq!(table.len(), 2);
    assert_eq!(table[0].segment, 0);
    assert!((table[0].seconds - 4.0).abs() < 1e-9);
    assert_eq!(table[1].segment, 1);
    assert!((table[1].seconds - 1.5).abs() < 1e-9);
}

/// Tokens absent from the duration mapping contribute zero
#[test]
fn test_build_target_table_withUnknownToken_shouldContributeZero() {
    let mut durations = HashMap::new();
    durations.insert("known".to_string(), 3.0);

    let groups = vec![SegmentGroup {
        tokens: vec!["known".to_string(), "missing".to_string()],
    }];

    let table = build_target_table(&groups, &durations);
    assert!((table[0].seconds - 3.0).abs() < 1e-9);
}

/// A group with no matched tokens has a zero target, not an error
#[test]
fn test_build_target_table_withAllTokensMissing_shouldYieldZero() {
    let durations = HashMap::new();
    let groups = read_groups("nothing matches\n");

    let table = build_target_table(&groups, &durations);
    assert_eq!(table.len(), 1);
    assert_eq!(table[0].seconds, 0.0);
}

/// One table entry per group, in order
#[test]
fn test_build_target_table_withManyGroups_shouldKeepOneEntryPerGroup() {
    let durations = extract_durations(common::SAMPLE_SRT);
    let groups = read_groups("A\nB\nA, B\nB\n");

    let table = build_target_table(&groups, &durations);
    let seconds: Vec<f64> = table.iter().map(|t| t.seconds).collect();

    assert_eq!(table.len(), 4);
    assert!((seconds[0] - 2.5).abs() < 1e-9);
    assert!((seconds[1] - 1.5).abs() < 1e-9);
    assert!((seconds[2] - 4.0).abs() < 1e-9);
    assert!((seconds[3] - 1.5).abs() < 1e-9);
}
