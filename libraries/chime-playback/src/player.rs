//! Player service - core orchestration
//!
//! Drives the decoder through queue playback: builds queues, ramps volume in
//! and out, reacts to decoder events and advances after each track settles.
//! Everything happens from the caller's context; `update` must be called
//! periodically (every few milliseconds) for fades and advances to progress.

use crate::{
    control::PlaybackControl,
    error::{PlaybackError, Result},
    fade::{Fade, FadeDirection, FadeTick},
    monitor::{EventMonitor, Reaction},
    observer::{NoopObserver, PlaybackObserver},
    queue::PlayQueue,
    shuffle::track_order,
    types::{PlayerConfig, QueueEntry, MAX_VOLUME},
};
use chime_core::{Clock, Decoder, DecoderEvent, DecoderFault};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Queue-driven player on top of a [`Decoder`]
pub struct PlayerService<D: Decoder, C: Clock> {
    decoder: D,
    clock: C,
    config: PlayerConfig,

    queue: PlayQueue,
    fade: Option<Fade>,
    monitor: EventMonitor,

    /// Level fade-ins ramp up to (0-30)
    volume: u8,

    /// Level last sent to the decoder
    device_volume: Option<u8>,

    playing: bool,
    repeat: bool,
    shuffle: bool,

    rng: Box<dyn RngCore + Send>,
    observer: Box<dyn PlaybackObserver>,
}

impl<D: Decoder, C: Clock> PlayerService<D, C> {
    /// Create a player
    ///
    /// Nothing is sent to the decoder until the first request.
    pub fn new(decoder: D, clock: C, config: PlayerConfig) -> Self {
        let volume = config.volume.min(MAX_VOLUME);
        let monitor = EventMonitor::new(config.wait_duration());

        Self {
            decoder,
            clock,
            config,
            queue: PlayQueue::new(),
            fade: None,
            monitor,
            volume,
            device_volume: None,
            playing: false,
            repeat: false,
            shuffle: false,
            rng: Box::new(StdRng::from_entropy()),
            observer: Box::new(NoopObserver),
        }
    }

    /// Use a specific random source for shuffling
    #[must_use]
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Install the playback observer, replacing the previous one
    pub fn set_observer(&mut self, observer: impl PlaybackObserver + 'static) {
        self.observer = Box::new(observer);
    }

    /// Service fades, drain decoder events and run a due advance
    ///
    /// At most one fade step and one advance happen per call.
    pub fn update(&mut self) {
        let now = self.clock.now();
        self.service_fade(now);

        while let Some(event) = self.decoder.poll_event() {
            self.handle_event(&event, now);
        }

        if self.monitor.take_due(now) {
            self.advance();
        }
    }

    /// Move to the next queue entry
    ///
    /// Plays it with a fresh fade-in, or stops immediately (no fade) when
    /// the queue is exhausted.
    pub fn advance(&mut self) {
        self.monitor.cancel();
        self.fade = None;
        self.queue.advance();
        self.play_current();
    }

    /// Entry under the queue cursor
    pub fn current_entry(&self) -> Option<QueueEntry> {
        self.queue.current()
    }

    /// Set the target volume (clamped to 30)
    ///
    /// Sent to the decoder right away unless a fade is running; a fade in
    /// progress keeps its own ramp and the new level applies to the next one.
    pub fn set_volume(&mut self, level: u8) {
        let level = level.min(MAX_VOLUME);
        self.volume = level;
        if self.fade.is_none() && self.device_volume != Some(level) {
            self.send_volume(level);
        }
    }

    /// Target volume
    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Settle delay between a track finishing and the next one starting
    pub fn set_wait_duration(&mut self, wait: Duration) {
        self.monitor.set_wait(wait);
    }

    /// Whether a fade is in progress
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Whether an advance is scheduled
    pub fn is_waiting(&self) -> bool {
        self.monitor.is_waiting()
    }

    /// Repeat flag
    pub fn repeat(&self) -> bool {
        self.repeat
    }

    /// Shuffle flag
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// Current play queue
    pub fn queue(&self) -> &PlayQueue {
        &self.queue
    }

    /// Borrow the decoder
    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Borrow the decoder mutably
    pub fn decoder_mut(&mut self) -> &mut D {
        &mut self.decoder
    }

    /// Borrow the clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Internal: start the entry under the cursor
    fn play_current(&mut self) {
        let Some(entry) = self.queue.current() else {
            info!(cursor = self.queue.cursor(), "Queue exhausted");
            self.finish();
            return;
        };

        info!(%entry, "Playing");
        self.send_volume(0);
        self.decoder.play_folder_file(entry.folder, entry.file);
        self.playing = true;

        let now = self.clock.now();
        self.fade = Some(Fade::fade_in(self.volume, now));
        self.service_fade(now);
    }

    /// Internal: issue whatever step the running fade has due
    fn service_fade(&mut self, now: Instant) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };
        let direction = fade.direction();

        match fade.poll(now) {
            FadeTick::Idle => {}
            FadeTick::Step(level) => self.send_volume(level),
            FadeTick::Complete => {
                self.fade = None;
                match direction {
                    FadeDirection::In => {
                        if let Some(entry) = self.queue.current() {
                            self.observer.on_play(entry);
                        }
                    }
                    FadeDirection::Out => {
                        self.decoder.pause();
                        self.queue.clear();
                        self.finish();
                    }
                }
            }
        }
    }

    /// Internal: react to one decoder event
    fn handle_event(&mut self, event: &DecoderEvent, now: Instant) {
        debug!(%event, "Decoder event");
        let fading_out = matches!(
            self.fade.as_ref().map(Fade::direction),
            Some(FadeDirection::Out)
        );
        let active = self.playing && !fading_out;

        match self.monitor.observe(event, active, now) {
            Reaction::Ignored => {}
            Reaction::Deferred => {
                debug!(wait = ?self.monitor.wait(), "Track finished, advance scheduled");
            }
            Reaction::SkipTrack(detail) => {
                warn!(entry = ?self.queue.current(), "{detail}");
                self.observer.on_error(&detail);
            }
            Reaction::MediumRemoved => {
                warn!("Storage medium removed");
                self.fade = None;
                self.finish();
            }
            Reaction::Report(detail) => {
                warn!("{detail}");
                self.observer.on_error(&detail);
            }
        }
    }

    /// Internal: mark playback over, notifying only on a real transition
    fn finish(&mut self) {
        if self.playing {
            self.playing = false;
            self.observer.on_stop();
        }
    }

    fn send_volume(&mut self, level: u8) {
        self.decoder.set_volume(level);
        self.device_volume = Some(level);
    }

    /// Internal: ask the decoder for the folder's track count
    ///
    /// Retries transient failures with a blocking backoff through the clock.
    fn query_track_count(&mut self, folder: u8) -> Result<u8> {
        let attempts = self.config.track_count_retries.max(1);
        let backoff = self.config.track_count_backoff();
        let mut last_fault = DecoderFault::TimeOut;

        for attempt in 1..=attempts {
            match self.decoder.query_track_count(folder) {
                Ok(0) => return Err(PlaybackError::EmptyFolder(folder)),
                Ok(count) => {
                    let count = u8::try_from(count).unwrap_or_else(|_| {
                        warn!(folder, count, "Track count exceeds file range, clamping");
                        u8::MAX
                    });
                    return Ok(count);
                }
                Err(fault) => {
                    debug!(folder, attempt, %fault, "Track count query failed");
                    last_fault = fault;
                    if attempt < attempts {
                        self.clock.sleep(backoff);
                    }
                }
            }
        }

        Err(PlaybackError::TrackCountUnavailable {
            folder,
            attempts,
            fault: last_fault,
        })
    }
}

impl<D: Decoder, C: Clock> PlaybackControl for PlayerService<D, C> {
    fn play_file(&mut self, folder: u8, file: u8) {
        self.monitor.cancel();
        self.fade = None;
        self.queue
            .fill_single(QueueEntry::new(folder, file), self.repeat);
        self.play_current();
    }

    fn play_folder(&mut self, folder: u8) -> Result<()> {
        self.monitor.cancel();

        let count = match self.query_track_count(folder) {
            Ok(count) => count,
            Err(e) => {
                error!(folder, "Folder request failed: {e}");
                self.queue.clear();
                self.observer.on_error(&e.to_string());
                return Err(e);
            }
        };
        info!(folder, count, shuffle = self.shuffle, repeat = self.repeat, "Queueing folder");

        let order = track_order(count, self.shuffle, &mut self.rng);
        self.fade = None;
        self.queue.fill_folder(folder, &order, self.repeat);
        self.play_current();
        Ok(())
    }

    fn stop(&mut self) {
        self.monitor.cancel();
        let now = self.clock.now();

        let from = match self.fade.as_ref() {
            Some(fade) if fade.direction() == FadeDirection::Out => return,
            Some(fade) => fade.last_level().unwrap_or(0),
            None if self.playing => self.device_volume.unwrap_or(self.volume),
            None => {
                self.queue.clear();
                return;
            }
        };

        info!(from, "Fading out");
        self.fade = Some(Fade::fade_out(from, now));
        self.service_fade(now);
    }

    fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    fn set_shuffle(&mut self, shuffle: bool) {
        self.shuffle = shuffle;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}
