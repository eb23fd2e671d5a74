//! Chime - Task Scheduler
//!
//! Loads a line-oriented schedule and turns time-of-day matches into player
//! requests.
//!
//! # Example
//!
//! ```rust
//! use chime_core::{ManualClock, TimeOfDay};
//! use chime_scheduler::{Schedule, TaskScheduler};
//!
//! let clock = ManualClock::at(TimeOfDay::new(9, 0).unwrap());
//! let mut scheduler = TaskScheduler::new(clock);
//! scheduler.replace_schedule(Schedule::parse("09:00 09:05 2 -1 shuffle repeat"));
//! scheduler.on_start(|task| println!("starting {task}"));
//! scheduler.start();
//! ```

mod error;
mod schedule;
mod scheduler;
mod task;

pub use error::{Result, ScheduleError};
pub use schedule::{parse_line, Schedule, SkippedLine, MAX_FOLDER, MAX_TASKS};
pub use scheduler::{EndReason, TaskScheduler, Transition};
pub use task::{PlayTarget, ScheduledTask};
