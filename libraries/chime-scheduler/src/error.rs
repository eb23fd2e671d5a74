//! Error types for schedule loading

use chime_core::ParseTimeError;
use std::path::PathBuf;
use thiserror::Error;

/// Schedule errors
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The schedule file could not be read
    #[error("Failed to read schedule {}: {source}", path.display())]
    Io {
        /// File that was opened
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A line ended before a required field
    #[error("Missing {0}")]
    MissingField(&'static str),

    /// A start or end time did not parse
    #[error("Invalid {field}: {source}")]
    InvalidTime {
        /// Which time field
        field: &'static str,
        /// Parse failure
        #[source]
        source: ParseTimeError,
    },

    /// A folder or file number is not a number, or outside its range
    #[error("Invalid {field} number: {value:?}")]
    InvalidNumber {
        /// Which number field
        field: &'static str,
        /// Text as written
        value: String,
    },

    /// An option token other than `shuffle` or `repeat`
    #[error("Unknown option: {0:?}")]
    UnknownOption(String),
}

/// Result type for schedule operations
pub type Result<T> = std::result::Result<T, ScheduleError>;
