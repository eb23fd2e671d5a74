//! Simulated decoder backend
//!
//! Stands in for the serial MP3 module using a host directory laid out like
//! its memory card: `<root>/NN/MMM*.mp3`, where `NN` is the two-digit folder
//! number and `MMM` the three-digit file number. Tracks do not produce sound;
//! each one "plays" for a fixed length and then reports completion.

use chime_core::{Clock, Decoder, DecoderEvent, DecoderFault};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct Playing {
    file: u8,
    started_at: Instant,
}

/// [`Decoder`] over a directory tree
pub struct SimulatedDecoder<C: Clock> {
    root: PathBuf,
    track_length: Duration,
    clock: C,
    volume: u8,
    playing: Option<Playing>,
    card_present: bool,
    events: VecDeque<DecoderEvent>,
}

impl<C: Clock> SimulatedDecoder<C> {
    pub fn new(root: impl Into<PathBuf>, track_length: Duration, clock: C) -> Self {
        let root = root.into();
        let card_present = root.is_dir();
        Self {
            root,
            track_length,
            clock,
            volume: 0,
            playing: None,
            card_present,
            events: VecDeque::new(),
        }
    }

    /// Last volume level set
    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// File number currently playing
    pub fn playing_file(&self) -> Option<u8> {
        self.playing.as_ref().map(|p| p.file)
    }

    fn folder_dir(&self, folder: u8) -> PathBuf {
        self.root.join(format!("{folder:02}"))
    }

    /// Track files in a folder, by file number
    fn tracks(&self, folder: u8) -> Vec<(u8, PathBuf)> {
        let Ok(entries) = fs::read_dir(self.folder_dir(folder)) else {
            return Vec::new();
        };
        let mut tracks: Vec<(u8, PathBuf)> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter_map(|path| track_number(&path).map(|number| (number, path)))
            .collect();
        tracks.sort();
        tracks
    }

    fn check_card(&mut self) {
        let present = self.root.is_dir();
        if present == self.card_present {
            return;
        }
        self.card_present = present;
        if present {
            self.events.push_back(DecoderEvent::CardInserted);
            self.events.push_back(DecoderEvent::CardOnline);
        } else {
            self.playing = None;
            self.events.push_back(DecoderEvent::CardRemoved);
        }
    }
}

impl<C: Clock + Send> Decoder for SimulatedDecoder<C> {
    fn set_volume(&mut self, level: u8) {
        self.volume = level;
    }

    fn play_folder_file(&mut self, folder: u8, file: u8) {
        self.check_card();
        let found = self
            .tracks(folder)
            .into_iter()
            .find(|(number, _)| *number == file);

        match found {
            Some((_, path)) => {
                info!(path = %path.display(), "Simulated playback");
                self.playing = Some(Playing {
                    file,
                    started_at: self.clock.now(),
                });
            }
            None => {
                debug!(folder, file, "No such track");
                self.playing = None;
                self.events
                    .push_back(DecoderEvent::Error(DecoderFault::FileMismatch));
            }
        }
    }

    fn pause(&mut self) {
        self.playing = None;
    }

    fn query_track_count(&mut self, folder: u8) -> Result<u16, DecoderFault> {
        self.check_card();
        if !self.card_present {
            return Err(DecoderFault::Busy);
        }
        let count = self.tracks(folder).len();
        Ok(u16::try_from(count).unwrap_or(u16::MAX))
    }

    fn poll_event(&mut self) -> Option<DecoderEvent> {
        self.check_card();
        let finished = self
            .playing
            .as_ref()
            .filter(|p| self.clock.now().duration_since(p.started_at) >= self.track_length)
            .map(|p| p.file);
        if let Some(file) = finished {
            self.playing = None;
            self.events.push_back(DecoderEvent::Finished {
                track: u16::from(file),
            });
        }
        self.events.pop_front()
    }
}

/// File number of `NNN*.mp3`
fn track_number(path: &Path) -> Option<u8> {
    let is_mp3 = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"));
    if !is_mp3 {
        return None;
    }
    let name = path.file_name()?.to_str()?;
    let digits = name.get(..3)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match digits.parse::<u8>() {
        Ok(number) if number > 0 => Some(number),
        _ => None,
    }
}
