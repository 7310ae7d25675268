use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use log::{error, info, warn};
use tokio::sync::mpsc;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::retime_engine::{RetimeDecision, retime_clip};
use crate::storyboard::TargetDuration;

// @module: Batch driver for folder retiming

/// Progress message sent from a retiming worker to the single log consumer
#[derive(Debug, Clone)]
pub enum ClipProgress {
    /// A clip was picked up for processing
    Started {
        /// Clip file name
        clip: String,
        /// Resolved target duration in seconds
        target_secs: f64,
    },

    /// A clip finished successfully
    Finished {
        /// Clip file name
        clip: String,
        /// The transform that was applied
        decision: RetimeDecision,
    },

    /// A clip failed; the batch continues
    Failed {
        /// Clip file name
        clip: String,
        /// Failure detail
        reason: String,
    },
}

/// Final batch accounting
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    /// Clips retimed or copied successfully
    pub processed: usize,

    /// Clips that failed and were skipped
    pub errors: usize,

    /// Folder the outputs were written to
    pub output_dir: PathBuf,
}

/// Extract the numeric index from the leading dot-separated filename
/// component. `"3.intro.mp4"` yields 3; anything non-numeric or zero
/// yields `None`.
pub fn clip_index(path: &Path) -> Option<usize> {
    let name = path.file_name()?.to_str()?;
    let leading = name.split('.').next()?;
    leading.parse::<usize>().ok().filter(|index| *index >= 1)
}

/// Resolve a clip's target duration from the table.
///
/// The filename index maps to table entry `index - 1`; a missing or
/// unparseable index falls back to the configured default instead of
/// skipping the clip.
pub fn resolve_target(path: &Path, table: &[TargetDuration], default_secs: f64) -> f64 {
    match clip_index(path).and_then(|index| table.get(index - 1)) {
        Some(entry) => entry.seconds,
        None => {
            warn!(
                "No target duration for {:?}, falling back to {}s",
                path.file_name().unwrap_or_default(),
                default_secs
            );
            default_secs
        }
    }
}

/// Retime every supported clip in a folder against the target table.
///
/// The output subfolder is created once before any worker starts; clips are
/// retimed concurrently up to the configured limit, each reading one input
/// and writing one distinct output. Per-clip failures are counted, never
/// fatal. Progress events flow over an unbounded channel to a single
/// logging consumer so workers never block on log delivery.
pub async fn run_batch(
    folder: &Path,
    table: &[TargetDuration],
    config: &Config,
) -> Result<BatchSummary> {
    let clips = FileManager::list_clips(folder, &config.clip_extensions)?;
    let output_dir = folder.join(&config.output_dir_name);

    if clips.is_empty() {
        warn!(
            "No clips with extensions {:?} found in {:?}",
            config.clip_extensions, folder
        );
        return Ok(BatchSummary {
            processed: 0,
            errors: 0,
            output_dir,
        });
    }

    // Create the output folder once, before any parallel writes
    FileManager::ensure_dir(&output_dir)
        .with_context(|| format!("Failed to create output folder: {:?}", output_dir))?;

    info!("Retiming {} clip(s) into {:?}", clips.len(), output_dir);

    let (tx, mut rx) = mpsc::unbounded_channel::<ClipProgress>();
    let consumer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                ClipProgress::Started { clip, target_secs } => {
                    info!("Processing {} (target {:.2}s)", clip, target_secs);
                }
                ClipProgress::Finished { clip, decision } => {
                    info!("Done {} [{}]", clip, decision.label());
                }
                ClipProgress::Failed { clip, reason } => {
                    error!("Failed {}: {}", clip, reason);
                }
            }
        }
    });

    let results: Vec<bool> = stream::iter(clips.iter().map(|input| {
        let tx = tx.clone();
        let output = output_dir.join(input.file_name().unwrap_or_default());
        async move {
            let clip = input
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| input.display().to_string());
            let target_secs = resolve_target(input, table, config.default_target_secs);

            let _ = tx.send(ClipProgress::Started {
                clip: clip.clone(),
                target_secs,
            });

            match retime_clip(
                input,
                &output,
                target_secs,
                config.copy_floor_secs,
                &config.encode,
            )
            .await
            {
                Ok(outcome) => {
                    let _ = tx.send(ClipProgress::Finished {
                        clip,
                        decision: outcome.decision,
                    });
                    true
                }
                Err(e) => {
                    let _ = tx.send(ClipProgress::Failed {
                        clip,
                        reason: e.to_string(),
                    });
                    false
                }
            }
        }
    }))
    .buffer_unordered(config.concurrent_clips)
    .collect()
    .await;

    // Close the channel and let the consumer drain remaining events
    drop(tx);
    let _ = consumer.await;

    let processed = results.iter().filter(|ok| **ok).count();
    let errors = results.len() - processed;

    Ok(BatchSummary {
        processed,
        errors,
        output_dir,
    })
}
