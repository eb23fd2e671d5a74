//! Chime - Playback Management
//!
//! Queue-driven playback on a serial MP3 decoder module.
//!
//! This crate provides:
//! - A fixed-capacity play queue (single file or whole folder, optional repeat)
//! - Unbiased folder shuffle
//! - Non-blocking 31-step volume fades
//! - Decoder event monitoring with a debounced advance
//!
//! # Architecture
//!
//! `chime-playback` knows nothing about serial ports or wall clocks. The
//! decoder and the clock come in through the [`chime_core::Decoder`] and
//! [`chime_core::Clock`] traits, so the same player runs against hardware,
//! a simulated backend, or a test double.
//!
//! # Example
//!
//! ```rust
//! use chime_core::{Decoder, DecoderEvent, DecoderFault, ManualClock};
//! use chime_playback::{PlaybackControl, PlayerConfig, PlayerService};
//!
//! struct Silent;
//!
//! impl Decoder for Silent {
//!     fn set_volume(&mut self, _level: u8) {}
//!     fn play_folder_file(&mut self, _folder: u8, _file: u8) {}
//!     fn pause(&mut self) {}
//!     fn query_track_count(&mut self, _folder: u8) -> Result<u16, DecoderFault> {
//!         Ok(4)
//!     }
//!     fn poll_event(&mut self) -> Option<DecoderEvent> {
//!         None
//!     }
//! }
//!
//! let mut player = PlayerService::new(Silent, ManualClock::default(), PlayerConfig::default());
//! player.set_shuffle(true);
//! player.play_folder(2).unwrap();
//! assert!(player.is_playing());
//!
//! // Call periodically to run fades and advances
//! player.update();
//! ```

mod control;
mod error;
mod fade;
mod monitor;
mod observer;
mod player;
mod queue;
mod shuffle;
pub mod types;

// Public exports
pub use control::PlaybackControl;
pub use error::{PlaybackError, Result};
pub use fade::{Fade, FadeDirection, FadeTick, FADE_INTERVAL, FADE_STEPS};
pub use monitor::{EventMonitor, Reaction};
pub use observer::{NoopObserver, PlaybackObserver};
pub use player::PlayerService;
pub use queue::{PlayQueue, QUEUE_CAPACITY};
pub use shuffle::track_order;
pub use types::{PlayerConfig, QueueEntry, MAX_VOLUME};
