/*!
 * Tests for the pipeline controller preconditions and end-to-end flow
 */

use anyhow::Result;
use cliptempo::app_config::Config;
use cliptempo::app_controller::Controller;

use crate::common;

/// A missing subtitle file is a fatal precondition, not a per-clip error
#[tokio::test]
async fn test_run_withMissingSubtitleFile_shouldFailBeforeProcessing() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let storyboard = common::create_test_storyboard(dir.path(), "storyboard.txt")?;

    let controller = Controller::with_config(Config::default())?;
    let result = controller
        .run(&dir.path().join("missing.srt"), &storyboard, dir.path())
        .await;

    assert!(result.is_err());
    Ok(())
}

/// A clip folder path pointing at a file is rejected up front
#[tokio::test]
async fn test_run_withFileAsClipFolder_shouldFailBeforeProcessing() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let subtitle = common::create_test_subtitle(dir.path(), "subs.srt")?;
    let storyboard = common::create_test_storyboard(dir.path(), "storyboard.txt")?;

    let controller = Controller::with_config(Config::default())?;
    let result = controller.run(&subtitle, &storyboard, &subtitle).await;

    assert!(result.is_err());
    Ok(())
}

/// With valid inputs the pipeline accounts for every matched clip
#[tokio::test]
async fn test_run_withFixtureInputs_shouldAccountForAllClips() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let subtitle = common::create_test_subtitle(dir.path(), "subs.srt")?;
    let storyboard = common::create_test_storyboard(dir.path(), "storyboard.txt")?;

    let clips = dir.path().join("clips");
    std::fs::create_dir(&clips)?;
    std::fs::write(clips.join("1.scene.mp4"), "not a real video")?;
    std::fs::write(clips.join("2.scene.mp4"), "not a real video")?;

    let controller = Controller::with_config(Config::default())?;
    let summary = controller.run(&subtitle, &storyboard, &clips).await?;

    assert_eq!(summary.processed + summary.errors, 2);
    assert!(summary.output_dir.is_dir());

    Ok(())
}

/// An invalid configuration is rejected at controller construction
#[test]
fn test_with_config_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.concurrent_clips = 0;
    assert!(Controller::with_config(config).is_err());
}
