mod event;
mod time;

pub use event::DecoderEvent;
pub use time::TimeOfDay;
