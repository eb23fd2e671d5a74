/// Core traits for Chime
use crate::error::DecoderFault;
use crate::types::{DecoderEvent, TimeOfDay};
use std::time::{Duration, Instant};

/// Command/event channel to the audio decoder module
///
/// The module decodes and plays audio on its own; this trait only covers the
/// narrow control surface the playback core needs. Commands are fire-and-forget,
/// matching the serial protocol, and are expected to be issued from a single
/// control loop.
pub trait Decoder: Send {
    /// Set the output volume (0-30)
    fn set_volume(&mut self, level: u8);

    /// Start playing `file` inside `folder`
    fn play_folder_file(&mut self, folder: u8, file: u8);

    /// Pause the current track
    fn pause(&mut self);

    /// Ask the module how many tracks `folder` holds
    ///
    /// # Errors
    /// Returns the fault reported by the module or the link when no valid
    /// count came back
    fn query_track_count(&mut self, folder: u8) -> Result<u16, DecoderFault>;

    /// Take the next pending event, if any
    fn poll_event(&mut self) -> Option<DecoderEvent>;
}

/// Time source for scheduling and fades
///
/// Abstracted so host-side tests and simulations can drive time explicitly.
pub trait Clock {
    /// Monotonic timestamp
    fn now(&self) -> Instant;

    /// Current local wall-clock time
    fn time_of_day(&self) -> TimeOfDay;

    /// Block the caller for `duration`
    fn sleep(&self, duration: Duration);
}
