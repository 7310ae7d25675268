// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod batch;
mod errors;
mod file_utils;
mod media_probe;
mod retime_engine;
mod storyboard;
mod subtitle_durations;
mod timecode;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Retime a folder of numbered clips to subtitle-derived durations (default command)
    Retime(RetimeArgs),

    /// Generate shell completions for cliptempo
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RetimeArgs {
    /// Subtitle file (.srt) providing per-line durations
    #[arg(value_name = "SUBTITLE_FILE")]
    subtitle_file: PathBuf,

    /// Storyboard grouping file (.txt), one group per line
    #[arg(value_name = "STORYBOARD_FILE")]
    storyboard_file: PathBuf,

    /// Folder of numbered video clips to retime
    #[arg(value_name = "CLIP_FOLDER")]
    clip_folder: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// cliptempo - frame-accurate clip retiming
///
/// Retimes a batch of short video clips so each clip's duration matches a
/// target derived from a subtitle track and a storyboard grouping file.
#[derive(Parser, Debug)]
#[command(name = "cliptempo")]
#[command(version = "1.0.0")]
#[command(about = "Retime numbered video clips to subtitle-derived durations")]
#[command(long_about = "cliptempo derives a target duration per storyboard segment from an SRT
subtitle file, then stretches, compresses or copies each numbered clip in a
folder so its length matches the segment's target, frame-exactly.

EXAMPLES:
    cliptempo subs.srt storyboard.txt ./clips      # Retime using default config
    cliptempo -l debug subs.srt story.txt ./clips  # Verbose per-clip logging
    cliptempo completions bash > cliptempo.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.

OUTPUT:
    Retimed clips are written into an 'adjusted_videos' subfolder created
    inside the clip folder, one output per input, same base name.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Subtitle file (.srt) providing per-line durations
    #[arg(value_name = "SUBTITLE_FILE")]
    subtitle_file: Option<PathBuf>,

    /// Storyboard grouping file (.txt), one group per line
    #[arg(value_name = "STORYBOARD_FILE")]
    storyboard_file: Option<PathBuf>,

    /// Folder of numbered video clips to retime
    #[arg(value_name = "CLIP_FOLDER")]
    clip_folder: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    // Verbosity follows the global max level so later overrides (config or
    // the -l flag) can raise it above the level passed to init
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "cliptempo", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Retime(args)) => run_retime(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let missing = || anyhow!("SUBTITLE_FILE, STORYBOARD_FILE and CLIP_FOLDER are required");
            let retime_args = RetimeArgs {
                subtitle_file: cli.subtitle_file.ok_or_else(missing)?,
                storyboard_file: cli.storyboard_file.ok_or_else(missing)?,
                clip_folder: cli.clip_folder.ok_or_else(missing)?,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_retime(retime_args).await
        }
    }
}

async fn run_retime(options: RetimeArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Update log level in config if specified via command line
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        // Apply command line log level to default config if specified
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;

    let summary = controller
        .run(
            &options.subtitle_file,
            &options.storyboard_file,
            &options.clip_folder,
        )
        .await?;

    if summary.errors > 0 {
        return Err(anyhow!(
            "{} clip(s) failed to retime (see log above)",
            summary.errors
        ));
    }

    Ok(())
}
