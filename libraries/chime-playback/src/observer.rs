//! Playback notifications
//!
//! A player holds one observer at a time; installing a new one replaces the
//! previous. Every method defaults to doing nothing.

use crate::types::QueueEntry;

/// Receives playback notifications from [`crate::PlayerService`]
pub trait PlaybackObserver: Send {
    /// A fade-in completed and `entry` is audible at full volume
    fn on_play(&mut self, _entry: QueueEntry) {}

    /// Playback ended (fade-out finished, queue exhausted, or medium removed)
    fn on_stop(&mut self) {}

    /// The decoder reported a problem, or a folder request failed
    fn on_error(&mut self, _detail: &str) {}
}

/// Observer that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PlaybackObserver for NoopObserver {}
