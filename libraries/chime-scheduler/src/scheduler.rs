//! Time-of-day task scheduler
//!
//! Two states: idle, or one task active. Each `tick` compares the current
//! minute with the schedule and drives the player across the transitions.

use crate::schedule::Schedule;
use crate::task::{PlayTarget, ScheduledTask};
use chime_core::{Clock, TimeOfDay};
use chime_playback::PlaybackControl;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

type TaskCallback = Box<dyn FnMut(&ScheduledTask) + Send>;

/// Why an active task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The current minute matched the task's end time
    EndTime,
    /// The task ran for the configured maximum duration
    MaxDuration,
}

/// State change made by a [`TaskScheduler::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The task in `slot` became active
    Started {
        /// Schedule slot
        slot: usize,
    },
    /// The task in `slot` was deactivated
    Ended {
        /// Schedule slot
        slot: usize,
        /// What ended it
        reason: EndReason,
    },
}

#[derive(Debug, Clone)]
struct ActiveTask {
    slot: usize,
    task: ScheduledTask,
    started_at: Instant,
}

/// Starts and stops playback from a [`Schedule`]
pub struct TaskScheduler<C: Clock> {
    clock: C,
    schedule: Schedule,
    started: bool,
    active: Option<ActiveTask>,

    /// Slot that ended, and the minute it ended in
    cooldown: Option<(usize, TimeOfDay)>,

    max_play_duration: Option<Duration>,
    on_start: TaskCallback,
    on_end: TaskCallback,
}

impl<C: Clock> TaskScheduler<C> {
    /// Create an idle, unarmed scheduler with an empty schedule
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            schedule: Schedule::empty(),
            started: false,
            active: None,
            cooldown: None,
            max_play_duration: None,
            on_start: Box::new(|_| {}),
            on_end: Box::new(|_| {}),
        }
    }

    /// Load the schedule file, replacing every slot
    ///
    /// A missing or unreadable file leaves the scheduler with no tasks.
    /// An active task stays active until its end.
    pub fn load(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let schedule = match Schedule::load(path) {
            Ok(schedule) => schedule,
            Err(e) => {
                warn!("{e}; running without tasks");
                Schedule::empty()
            }
        };
        info!(path = %path.display(), tasks = schedule.len(), "Schedule loaded");
        self.replace_schedule(schedule);
    }

    /// Install a parsed schedule
    pub fn replace_schedule(&mut self, schedule: Schedule) {
        self.schedule = schedule;
    }

    /// Current schedule
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Arm the scheduler; `tick` does nothing before this
    pub fn start(&mut self) {
        self.started = true;
    }

    /// Whether `start` was called
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// The active task, if any
    pub fn active_task(&self) -> Option<&ScheduledTask> {
        self.active.as_ref().map(|active| &active.task)
    }

    /// End any task that has been active this long, even if its end minute
    /// was missed. `None` disables the limit.
    pub fn set_max_play_duration(&mut self, limit: Option<Duration>) {
        self.max_play_duration = limit;
    }

    /// Notification fired when a task starts, before playback is requested
    pub fn on_start(&mut self, callback: impl FnMut(&ScheduledTask) + Send + 'static) {
        self.on_start = Box::new(callback);
    }

    /// Notification fired when a task ends, after stop is requested
    pub fn on_end(&mut self, callback: impl FnMut(&ScheduledTask) + Send + 'static) {
        self.on_end = Box::new(callback);
    }

    /// Compare the current minute with the schedule and act on a match
    ///
    /// Makes at most one transition per call.
    pub fn tick<P: PlaybackControl + ?Sized>(&mut self, player: &mut P) -> Option<Transition> {
        if !self.started {
            return None;
        }
        let now = self.clock.time_of_day();
        if self.active.is_some() {
            self.try_end(now, player)
        } else {
            self.try_start(now, player)
        }
    }

    fn try_start<P: PlaybackControl + ?Sized>(
        &mut self,
        now: TimeOfDay,
        player: &mut P,
    ) -> Option<Transition> {
        if matches!(self.cooldown, Some((_, minute)) if minute != now) {
            self.cooldown = None;
        }
        let cooldown = self.cooldown;

        let (slot, task) = self
            .schedule
            .tasks()
            .find(|(slot, task)| task.start == now && cooldown != Some((*slot, now)))
            .map(|(slot, task)| (slot, *task))?;

        info!(slot, %task, "Task started");
        player.set_repeat(task.repeat);
        player.set_shuffle(task.shuffle);
        (self.on_start)(&task);

        match task.target {
            PlayTarget::Folder(folder) => {
                if let Err(e) = player.play_folder(folder) {
                    error!(slot, folder, "Task playback failed: {e}");
                }
            }
            PlayTarget::File { folder, file } => player.play_file(folder, file),
        }

        self.active = Some(ActiveTask {
            slot,
            task,
            started_at: self.clock.now(),
        });
        Some(Transition::Started { slot })
    }

    fn try_end<P: PlaybackControl + ?Sized>(
        &mut self,
        now: TimeOfDay,
        player: &mut P,
    ) -> Option<Transition> {
        let active = self.active.as_ref()?;

        let reason = if active.task.end == now {
            EndReason::EndTime
        } else if self
            .max_play_duration
            .is_some_and(|limit| self.clock.now().duration_since(active.started_at) >= limit)
        {
            EndReason::MaxDuration
        } else {
            return None;
        };

        let ActiveTask { slot, task, .. } = self.active.take()?;
        info!(slot, %task, ?reason, "Task ended");
        player.stop();
        (self.on_end)(&task);

        self.cooldown = Some((slot, now));
        Some(Transition::Ended { slot, reason })
    }
}
