//! Schedule file parsing
//!
//! One task per line:
//!
//! ```text
//! # start end   folder file [shuffle] [repeat]
//! 09:00 09:05 2 -1 shuffle repeat
//! 12:31 13:08 1 12
//! ```
//!
//! `file = -1` plays the whole folder. Lines starting with `#` and blank lines
//! are skipped; malformed lines are skipped with a warning.

use crate::error::{Result, ScheduleError};
use crate::task::{PlayTarget, ScheduledTask};
use chime_core::TimeOfDay;
use std::path::Path;
use tracing::{debug, warn};

/// Maximum number of tasks in a schedule
pub const MAX_TASKS: usize = 20;

/// Highest folder number on the decoder's medium
pub const MAX_FOLDER: u8 = 99;

/// A line that was not turned into a task
#[derive(Debug)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    /// Line text, trimmed
    pub text: String,
    /// Why it was skipped
    pub error: ScheduleError,
}

/// Fixed-size task table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    slots: [Option<ScheduledTask>; MAX_TASKS],
}

impl Schedule {
    /// Schedule with no tasks
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read and parse a schedule file
    ///
    /// Bytes that are not valid UTF-8 are replaced before parsing, so an
    /// undecodable comment costs at most its own line.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ScheduleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Parse schedule text, logging every skipped line
    pub fn parse(text: &str) -> Self {
        let (schedule, skipped) = Self::parse_with_report(text);
        for skip in &skipped {
            warn!(line = skip.line, text = %skip.text, "Skipping schedule line: {}", skip.error);
        }
        schedule
    }

    /// Parse schedule text, returning the lines that were skipped
    ///
    /// Tasks fill slots in file order. Lines past the table capacity are
    /// dropped with a single warning.
    pub fn parse_with_report(text: &str) -> (Self, Vec<SkippedLine>) {
        let mut schedule = Self::empty();
        let mut skipped = Vec::new();
        let mut next = 0;
        let mut overflow = 0usize;

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_line(line) {
                Ok(task) if next < MAX_TASKS => {
                    debug!(slot = next, %task, "Loaded task");
                    schedule.slots[next] = Some(task);
                    next += 1;
                }
                Ok(_) => overflow += 1,
                Err(error) => skipped.push(SkippedLine {
                    line: index + 1,
                    text: line.to_string(),
                    error,
                }),
            }
        }

        if overflow > 0 {
            warn!(
                ignored = overflow,
                "Schedule holds more than {MAX_TASKS} tasks, ignoring the rest"
            );
        }
        (schedule, skipped)
    }

    /// Task in a slot
    pub fn get(&self, slot: usize) -> Option<&ScheduledTask> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Occupied slots with their indices, in table order
    pub fn tasks(&self) -> impl Iterator<Item = (usize, &ScheduledTask)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, task)| task.as_ref().map(|task| (slot, task)))
    }

    /// Number of tasks
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Check if no task is loaded
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// Parse one non-comment schedule line
pub fn parse_line(line: &str) -> Result<ScheduledTask> {
    let mut fields = line.split_whitespace();
    let mut next = |name: &'static str| fields.next().ok_or(ScheduleError::MissingField(name));

    let start = parse_time("start time", next("start time")?)?;
    let end = parse_time("end time", next("end time")?)?;
    let folder_text = next("folder")?;
    let file_text = next("file")?;

    let folder = match folder_text.parse::<u8>() {
        Ok(folder @ 1..=MAX_FOLDER) => folder,
        _ => {
            return Err(ScheduleError::InvalidNumber {
                field: "folder",
                value: folder_text.to_string(),
            })
        }
    };
    let target = if file_text == "-1" {
        PlayTarget::Folder(folder)
    } else {
        match file_text.parse::<u8>() {
            Ok(file @ 1..=u8::MAX) => PlayTarget::File { folder, file },
            _ => {
                return Err(ScheduleError::InvalidNumber {
                    field: "file",
                    value: file_text.to_string(),
                })
            }
        }
    };

    let mut task = ScheduledTask {
        start,
        end,
        target,
        shuffle: false,
        repeat: false,
    };
    for option in fields {
        match option {
            "shuffle" => task.shuffle = true,
            "repeat" => task.repeat = true,
            other => return Err(ScheduleError::UnknownOption(other.to_string())),
        }
    }
    Ok(task)
}

fn parse_time(field: &'static str, text: &str) -> Result<TimeOfDay> {
    text.parse()
        .map_err(|source| ScheduleError::InvalidTime { field, source })
}
