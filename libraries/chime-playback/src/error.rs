//! Error types for playback management

use chime_core::DecoderFault;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The decoder never returned a track count for the folder
    #[error("Track count for folder {folder} unavailable after {attempts} attempts: {fault}")]
    TrackCountUnavailable {
        /// Folder that was queried
        folder: u8,
        /// Number of queries issued
        attempts: u32,
        /// Fault from the last attempt
        fault: DecoderFault,
    },

    /// The decoder reports no tracks in the folder
    #[error("Folder {0} contains no tracks")]
    EmptyFolder(u8),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
