/*!
 * Error types for the cliptempo application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when parsing subtitle timecodes
#[derive(Error, Debug)]
pub enum TimecodeError {
    /// The timestamp does not match the `H:MM:SS[,.]mmm` shape
    #[error("Malformed timecode: {0}")]
    Malformed(String),
}

/// Errors that can occur while retiming a single clip
#[derive(Error, Debug)]
pub enum RetimeError {
    /// The computed speed factor is outside the usable range
    #[error("Invalid speed factor {factor} for clip {clip}")]
    InvalidSpeedFactor {
        /// Clip file name
        clip: String,
        /// Computed original/target ratio
        factor: f64,
    },

    /// The source clip could not be opened or probed
    #[error("Failed to open clip {clip}: {reason}")]
    ClipOpen {
        /// Clip file name
        clip: String,
        /// Probe failure detail
        reason: String,
    },

    /// The output clip could not be written
    #[error("Failed to write clip {clip}: {reason}")]
    ClipWrite {
        /// Clip file name
        clip: String,
        /// Encode or copy failure detail
        reason: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from timecode parsing
    #[error("Timecode error: {0}")]
    Timecode(#[from] TimecodeError),

    /// Error from clip retiming
    #[error("Retime error: {0}")]
    Retime(#[from] RetimeError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
