/*!
 * Error types for the subplayer library.
 *
 * This module contains custom error types for different parts of the player,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Reasons a subtitle block is rejected during parsing.
///
/// These never reach the caller of `parse_srt`: a rejected block is logged and
/// skipped, and parsing continues with the next one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// Block does not have an index line, a timing line and at least one text line
    #[error("Block has {0} lines, expected at least 3")]
    TooFewLines(usize),

    /// Timing line is not of the form `start --> end`
    #[error("Invalid timing line: {0}")]
    InvalidTimingLine(String),

    /// A timestamp component is missing or not an integer
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Start time lies after end time
    #[error("Invalid time range: start {start} > end {end}")]
    InvalidTimeRange {
        /// Start in seconds
        start: f64,
        /// End in seconds
        end: f64,
    },
}

/// Errors raised by the media boundary and the player runtime
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlayerError {
    /// The host refused to start playback
    #[error("Playback request rejected: {0}")]
    PlaybackRejected(String),

    /// The platform refused a fullscreen transition
    #[error("Fullscreen request denied: {0}")]
    FullscreenDenied(String),

    /// A selected file is neither a video nor a subtitle file
    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    /// The runtime task is gone and no longer accepts events
    #[error("Player runtime has shut down")]
    RuntimeClosed,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration loading or validation
    #[error("Config error: {0}")]
    Config(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from the player
    #[error("Player error: {0}")]
    Player(#[from] PlayerError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

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
