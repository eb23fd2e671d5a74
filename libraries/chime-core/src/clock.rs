//! Clock implementations
//!
//! - [`SystemClock`]: local wall-clock time via `chrono`, monotonic time via `Instant`
//! - [`ManualClock`]: explicitly driven clock for tests and simulations

use crate::traits::Clock;
use crate::types::TimeOfDay;
use chrono::{Local, Timelike};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

const MILLIS_PER_DAY: u128 = 24 * 60 * 60 * 1000;
const MILLIS_PER_MINUTE: u128 = 60 * 1000;

/// Clock backed by the host's real time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn time_of_day(&self) -> TimeOfDay {
        let now = Local::now();
        TimeOfDay::from_minutes(now.hour() * 60 + now.minute())
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug)]
struct ManualState {
    origin: Instant,
    elapsed: Duration,
    millis_of_day: u128,
}

/// Clock that only moves when told to
///
/// Cloning yields a handle onto the same time, so a test can keep one handle
/// while the components under test own others. Advancing moves the monotonic
/// and the wall-clock time together; [`Clock::sleep`] advances instead of
/// blocking.
#[derive(Debug, Clone)]
pub struct ManualClock {
    state: Arc<Mutex<ManualState>>,
}

impl ManualClock {
    /// Create a clock reading `time` on the wall clock
    #[must_use]
    pub fn at(time: TimeOfDay) -> Self {
        Self {
            state: Arc::new(Mutex::new(ManualState {
                origin: Instant::now(),
                elapsed: Duration::ZERO,
                millis_of_day: minute_start(time),
            })),
        }
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        let mut state = self.lock();
        state.elapsed += by;
        state.millis_of_day = (state.millis_of_day + by.as_millis()) % MILLIS_PER_DAY;
    }

    /// Jump the wall clock to `time` (start of that minute)
    ///
    /// Monotonic time is unaffected.
    pub fn set_time_of_day(&self, time: TimeOfDay) {
        self.lock().millis_of_day = minute_start(time);
    }

    /// Monotonic time elapsed since the clock was created
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.lock().elapsed
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn minute_start(time: TimeOfDay) -> u128 {
    u128::from(time.minutes_since_midnight()) * MILLIS_PER_MINUTE
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::at(TimeOfDay::MIDNIGHT)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let state = self.lock();
        state.origin + state.elapsed
    }

    fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from_minutes((self.lock().millis_of_day / MILLIS_PER_MINUTE) as u32)
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}
