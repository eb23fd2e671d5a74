/// Core error types for Chime
use thiserror::Error;

/// Fault reported by the decoder module, or by the link to it
///
/// The display strings are the fixed descriptions handed to error
/// notifications.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecoderFault {
    /// No response on the serial link
    #[error("Time Out!")]
    TimeOut,

    /// Malformed frame on the serial link
    #[error("Stack Wrong!")]
    WrongStack,

    /// Module busy (no card present)
    #[error("DFPlayerError: Card not found")]
    Busy,

    /// Module is in sleep mode
    #[error("DFPlayerError: Sleeping")]
    Sleeping,

    /// Module received a malformed frame
    #[error("DFPlayerError: Get Wrong Stack")]
    SerialWrongStack,

    /// Module received a frame with a bad checksum
    #[error("DFPlayerError: Check Sum Not Match")]
    CheckSumNotMatch,

    /// Requested file index is out of bounds
    #[error("DFPlayerError: File Index Out of Bound")]
    FileIndexOut,

    /// Requested file does not exist
    #[error("DFPlayerError: Cannot Find File")]
    FileMismatch,

    /// Module is playing an advertisement
    #[error("DFPlayerError: In Advertise")]
    Advertise,
}

/// Where a [`DecoderFault`] originated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultClass {
    /// The serial link (timeouts, bad frames)
    Transport,
    /// The module itself
    Device,
}

impl DecoderFault {
    /// Classify the fault
    #[must_use]
    pub fn class(&self) -> FaultClass {
        match self {
            Self::TimeOut | Self::WrongStack => FaultClass::Transport,
            Self::Busy
            | Self::Sleeping
            | Self::SerialWrongStack
            | Self::CheckSumNotMatch
            | Self::FileIndexOut
            | Self::FileMismatch
            | Self::Advertise => FaultClass::Device,
        }
    }

    /// Whether playback can carry on with the next queue entry
    ///
    /// Only a missing file qualifies: the queue skips it after the usual
    /// settle delay.
    #[must_use]
    pub fn skips_track(&self) -> bool {
        matches!(self, Self::FileMismatch)
    }
}

/// Error parsing a [`crate::TimeOfDay`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseTimeError {
    /// Not of the form `HH:MM`
    #[error("Invalid time format: {0:?} (expected HH:MM)")]
    Format(String),

    /// Hour or minute outside the valid range
    #[error("Time out of range: {hour}:{minute:02}")]
    OutOfRange {
        /// Parsed hour
        hour: u8,
        /// Parsed minute
        minute: u8,
    },
}
