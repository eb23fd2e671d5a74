//! Decoder event monitor
//!
//! Classifies decoder notifications and owns the deferred-advance timer that
//! debounces track completion.

use chime_core::DecoderEvent;
use std::time::{Duration, Instant};
use tracing::debug;

/// What the player should do about a decoder event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Nothing to do
    Ignored,
    /// Track finished; advance is scheduled
    Deferred,
    /// Current file is unplayable; report it, advance is scheduled
    SkipTrack(String),
    /// Storage medium removed; playback is over
    MediumRemoved,
    /// Report the detail through the error notification
    Report(String),
}

/// Tracks the waiting-for-advance state
#[derive(Debug, Clone)]
pub struct EventMonitor {
    wait: Duration,
    waiting: bool,
    advance_at: Option<Instant>,
}

impl EventMonitor {
    /// Create a monitor with the given settle delay
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            waiting: false,
            advance_at: None,
        }
    }

    /// Settle delay between completion and advance
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Change the settle delay; a timer already armed keeps its deadline
    pub fn set_wait(&mut self, wait: Duration) {
        self.wait = wait;
    }

    /// Whether a deferred advance is pending
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    /// Deadline of the pending advance
    pub fn advance_at(&self) -> Option<Instant> {
        self.advance_at
    }

    /// Classify one decoder event
    ///
    /// `active` is true while a track is audible and not fading out; only
    /// then do completions and missing files schedule an advance.
    pub fn observe(&mut self, event: &DecoderEvent, active: bool, now: Instant) -> Reaction {
        match event {
            DecoderEvent::Finished { track } => {
                if self.waiting || !active {
                    debug!(track, waiting = self.waiting, "Ignoring completion notice");
                    return Reaction::Ignored;
                }
                self.arm(now);
                Reaction::Deferred
            }
            DecoderEvent::Error(fault) if fault.skips_track() && active && !self.waiting => {
                self.arm(now);
                Reaction::SkipTrack(event.describe())
            }
            DecoderEvent::CardRemoved => {
                self.cancel();
                Reaction::MediumRemoved
            }
            _ => Reaction::Report(event.describe()),
        }
    }

    /// Consume the pending advance once its deadline has passed
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.advance_at {
            Some(at) if now >= at => {
                self.cancel();
                true
            }
            _ => false,
        }
    }

    /// Drop any pending advance
    pub fn cancel(&mut self) {
        self.waiting = false;
        self.advance_at = None;
    }

    fn arm(&mut self, now: Instant) {
        self.waiting = true;
        self.advance_at = Some(now + self.wait);
    }
}
