//! Playback control seam
//!
//! The subset of player operations the scheduler drives. Implemented by
//! [`crate::PlayerService`]; mocked in scheduler tests.

use crate::error::Result;

/// Commands accepted by a player
pub trait PlaybackControl {
    /// Play one file, repeated while repeat is on
    fn play_file(&mut self, folder: u8, file: u8);

    /// Play every track of a folder in order, or shuffled
    fn play_folder(&mut self, folder: u8) -> Result<()>;

    /// Fade out and stop
    fn stop(&mut self);

    /// Repeat flag used when the next queue is built
    fn set_repeat(&mut self, repeat: bool);

    /// Shuffle flag used when the next folder queue is built
    fn set_shuffle(&mut self, shuffle: bool);

    /// Whether a track is playing (including while fading)
    fn is_playing(&self) -> bool;
}
