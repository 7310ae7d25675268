use anyhow::Result;
use log::info;
use std::path::Path;

use crate::app_config::Config;
use crate::batch::{BatchSummary, run_batch};
use crate::file_utils::FileManager;
use crate::storyboard;
use crate::subtitle_durations;

// @module: Application controller for clip retiming

/// Main application controller for the retiming pipeline
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the full pipeline: parse the subtitle and storyboard files, build
    /// the target duration table, then retime every clip in the folder.
    ///
    /// Path existence checks here are fatal preconditions; once clips are
    /// being processed, failures stay per-clip.
    pub async fn run(
        &self,
        subtitle_file: &Path,
        storyboard_file: &Path,
        clip_folder: &Path,
    ) -> Result<BatchSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(subtitle_file) {
            return Err(anyhow::anyhow!(
                "Subtitle file does not exist: {:?}",
                subtitle_file
            ));
        }
        if !FileManager::file_exists(storyboard_file) {
            return Err(anyhow::anyhow!(
                "Storyboard file does not exist: {:?}",
                storyboard_file
            ));
        }
        if !FileManager::dir_exists(clip_folder) {
            return Err(anyhow::anyhow!(
                "Clip folder is not a directory: {:?}",
                clip_folder
            ));
        }

        let durations = subtitle_durations::extract_durations_from_file(subtitle_file)?;
        let groups = storyboard::read_groups_from_file(storyboard_file)?;
        let table = storyboard::build_target_table(&groups, &durations);

        info!(
            "Parsed {} subtitle cue(s) and {} storyboard group(s)",
            durations.len(),
            table.len()
        );

        let summary = run_batch(clip_folder, &table, &self.config).await?;

        info!(
            "Batch complete in {}: {} processed, {} errors - output: {}",
            Self::format_duration(start_time.elapsed()),
            summary.processed,
            summary.errors,
            summary.output_dir.display()
        );

        Ok(summary)
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
