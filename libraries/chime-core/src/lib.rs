//! Chime Core
//!
//! Shared types and seams for the Chime scheduled-playback controller.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `TimeOfDay`, `DecoderEvent`
//! - **Core Traits**: `Decoder` (the audio module's command/event channel), `Clock`
//! - **Error Handling**: the `DecoderFault` taxonomy
//!
//! # Example
//!
//! ```rust
//! use chime_core::{Clock, ManualClock, TimeOfDay};
//! use std::time::Duration;
//!
//! let clock = ManualClock::at(TimeOfDay::new(8, 59).unwrap());
//! clock.advance(Duration::from_secs(60));
//! assert_eq!(clock.time_of_day().to_string(), "09:00");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// System and manually driven clocks
pub mod clock;
/// Decoder faults and parse errors
pub mod error;
/// Decoder and clock seams
pub mod traits;
/// Time of day and decoder events
pub mod types;

// Re-export commonly used types
pub use clock::{ManualClock, SystemClock};
pub use error::{DecoderFault, FaultClass, ParseTimeError};
pub use traits::{Clock, Decoder};
pub use types::{DecoderEvent, TimeOfDay};
