//! Scheduled task definition

use chime_core::TimeOfDay;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a task plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayTarget {
    /// Every track in the folder (`-1` in the schedule file)
    Folder(u8),
    /// One file
    File {
        /// Folder number
        folder: u8,
        /// File number inside the folder
        file: u8,
    },
}

impl PlayTarget {
    /// Folder this target lives in
    pub fn folder(&self) -> u8 {
        match self {
            Self::Folder(folder) | Self::File { folder, .. } => *folder,
        }
    }
}

/// One line of the schedule: play `target` between `start` and `end`
///
/// Start and end match by exact minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Minute playback begins
    pub start: TimeOfDay,
    /// Minute playback fades out
    pub end: TimeOfDay,
    /// What to play
    pub target: PlayTarget,
    /// Shuffle folder order
    pub shuffle: bool,
    /// Loop until the end time
    pub repeat: bool,
}

impl fmt::Display for ScheduledTask {
    /// Formats the task as a schedule file line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.start, self.end)?;
        match self.target {
            PlayTarget::Folder(folder) => write!(f, "{folder} -1")?,
            PlayTarget::File { folder, file } => write!(f, "{folder} {file}")?,
        }
        if self.shuffle {
            f.write_str(" shuffle")?;
        }
        if self.repeat {
            f.write_str(" repeat")?;
        }
        Ok(())
    }
}
