/// Asynchronous notifications reported by the decoder module
use crate::error::DecoderFault;
use std::fmt;

/// Event received from the decoder module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderEvent {
    /// A track played to its end
    Finished {
        /// Global track number reported by the module
        track: u16,
    },

    /// The module reported a fault
    Error(DecoderFault),

    /// Storage medium inserted
    CardInserted,

    /// Storage medium removed
    CardRemoved,

    /// Storage medium mounted and ready
    CardOnline,
}

impl DecoderEvent {
    /// Human-readable detail, as passed to error notifications
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Finished { track } => format!("Number:{track} Play Finished!"),
            Self::Error(fault) => fault.to_string(),
            Self::CardInserted => "Card Inserted!".to_string(),
            Self::CardRemoved => "Card Removed!".to_string(),
            Self::CardOnline => "Card Online!".to_string(),
        }
    }
}

impl fmt::Display for DecoderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
