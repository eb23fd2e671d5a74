//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Highest volume level accepted by the decoder module
pub const MAX_VOLUME: u8 = 30;

/// One playable (folder, file) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueueEntry {
    /// Folder number on the storage medium
    pub folder: u8,

    /// File number inside the folder
    pub file: u8,
}

impl QueueEntry {
    /// Create a new entry
    pub fn new(folder: u8, file: u8) -> Self {
        Self { folder, file }
    }
}

impl fmt::Display for QueueEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:03}", self.folder, self.file)
    }
}

/// Configuration for the player service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Target volume reached by fade-ins (0-30, default: 15)
    pub volume: u8,

    /// Settle delay between a track finishing and the next one starting,
    /// in milliseconds (default: 2000)
    pub wait_ms: u64,

    /// Track count queries issued before a folder request fails (default: 100)
    pub track_count_retries: u32,

    /// Pause between track count queries, in milliseconds (default: 10)
    pub track_count_backoff_ms: u64,
}

impl PlayerConfig {
    /// Settle delay as a `Duration`
    pub fn wait_duration(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }

    /// Track count backoff as a `Duration`
    pub fn track_count_backoff(&self) -> Duration {
        Duration::from_millis(self.track_count_backoff_ms)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: MAX_VOLUME / 2,
            wait_ms: 2000,
            track_count_retries: 100,
            track_count_backoff_ms: 10,
        }
    }
}
