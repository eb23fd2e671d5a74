//! Volume fades as timed step sequences
//!
//! A fade issues `FADE_STEPS + 1` volume commands spaced `FADE_INTERVAL`
//! apart and completes one interval after the last one. Nothing blocks: the
//! owner polls the fade and performs whatever it yields.

use std::time::{Duration, Instant};

/// Number of ramp intervals; a fade issues one more command than this
pub const FADE_STEPS: u8 = 30;

/// Spacing between consecutive volume commands
pub const FADE_INTERVAL: Duration = Duration::from_millis(20);

/// Direction of a fade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    /// 0 up to the peak level
    In,
    /// Peak level down to 0
    Out,
}

/// What a fade wants done at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeTick {
    /// Nothing due yet
    Idle,
    /// Send this volume level to the decoder
    Step(u8),
    /// The ramp is over
    Complete,
}

/// Volume ramp in progress
#[derive(Debug, Clone)]
pub struct Fade {
    direction: FadeDirection,

    /// Target level for a fade-in, starting level for a fade-out
    peak: u8,

    /// Commands issued so far (0..=FADE_STEPS + 1)
    issued: u8,

    /// When the next step (or completion) becomes due
    next_due: Instant,

    last_level: Option<u8>,
}

impl Fade {
    /// Ramp from 0 up to `target`, first step due at `now`
    pub fn fade_in(target: u8, now: Instant) -> Self {
        Self::new(FadeDirection::In, target, now)
    }

    /// Ramp from `from` down to 0, first step due at `now`
    pub fn fade_out(from: u8, now: Instant) -> Self {
        Self::new(FadeDirection::Out, from, now)
    }

    fn new(direction: FadeDirection, peak: u8, now: Instant) -> Self {
        Self {
            direction,
            peak,
            issued: 0,
            next_due: now,
            last_level: None,
        }
    }

    /// Direction of this fade
    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    /// Last level handed out by [`Fade::poll`]
    pub fn last_level(&self) -> Option<u8> {
        self.last_level
    }

    /// Level of ramp step `step` (0..=FADE_STEPS), rounded to nearest
    pub fn level_at(&self, step: u8) -> u8 {
        let step = step.min(FADE_STEPS);
        let i = match self.direction {
            FadeDirection::In => step,
            FadeDirection::Out => FADE_STEPS - step,
        };
        let scaled = (u16::from(self.peak) * u16::from(i) * 2 + u16::from(FADE_STEPS))
            / (2 * u16::from(FADE_STEPS));
        u8::try_from(scaled).unwrap_or(u8::MAX)
    }

    /// Advance the fade to `now`
    ///
    /// Yields at most one step per call. Each step is scheduled one interval
    /// after the previous one was handed out, so late polling stretches the
    /// ramp instead of bunching commands together.
    pub fn poll(&mut self, now: Instant) -> FadeTick {
        if now < self.next_due {
            return FadeTick::Idle;
        }
        if self.issued > FADE_STEPS {
            return FadeTick::Complete;
        }

        let level = self.level_at(self.issued);
        self.issued += 1;
        self.next_due = now + FADE_INTERVAL;
        self.last_level = Some(level);
        FadeTick::Step(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Poll a fade every interval until it completes
    fn run(mut fade: Fade, start: Instant) -> Vec<u8> {
        let mut levels = Vec::new();
        let mut now = start;
        loop {
            match fade.poll(now) {
                FadeTick::Step(level) => levels.push(level),
                FadeTick::Complete => return levels,
                FadeTick::Idle => panic!("step not due on schedule"),
            }
            now += FADE_INTERVAL;
        }
    }

    #[test]
    fn fade_in_issues_31_levels() {
        let start = Instant::now();
        let levels = run(Fade::fade_in(30, start), start);

        assert_eq!(levels.len(), 31);
        assert_eq!(levels, (0..=30).collect::<Vec<u8>>());
    }

    #[test]
    fn fade_in_rounds_to_nearest() {
        let start = Instant::now();
        let levels = run(Fade::fade_in(15, start), start);

        assert_eq!(levels.first(), Some(&0));
        assert_eq!(levels[1], 1); // 0.5 rounds up
        assert_eq!(levels[2], 1);
        assert_eq!(levels[3], 2); // 1.5 rounds up
        assert_eq!(levels.last(), Some(&15));
        assert!(levels.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn fade_out_reaches_zero() {
        let start = Instant::now();
        let levels = run(Fade::fade_out(20, start), start);

        assert_eq!(levels.len(), 31);
        assert_eq!(levels.first(), Some(&20));
        assert_eq!(levels.last(), Some(&0));
        assert!(levels.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn steps_wait_for_interval() {
        let start = Instant::now();
        let mut fade = Fade::fade_in(30, start);

        assert_eq!(fade.poll(start), FadeTick::Step(0));
        assert_eq!(fade.poll(start), FadeTick::Idle);
        assert_eq!(fade.poll(start + Duration::from_millis(19)), FadeTick::Idle);
        assert_eq!(fade.poll(start + FADE_INTERVAL), FadeTick::Step(1));
    }

    #[test]
    fn late_polls_yield_one_step_each() {
        let start = Instant::now();
        let mut fade = Fade::fade_in(30, start);
        fade.poll(start);

        let late = start + Duration::from_millis(500);
        assert_eq!(fade.poll(late), FadeTick::Step(1));
        assert_eq!(fade.poll(late), FadeTick::Idle);
        assert_eq!(fade.poll(late + FADE_INTERVAL), FadeTick::Step(2));
    }

    #[test]
    fn completes_one_interval_after_last_step() {
        let start = Instant::now();
        let mut fade = Fade::fade_out(10, start);
        let mut now = start;
        for _ in 0..=FADE_STEPS {
            assert!(matches!(fade.poll(now), FadeTick::Step(_)));
            now += FADE_INTERVAL;
        }

        assert_eq!(fade.poll(now - Duration::from_millis(1)), FadeTick::Idle);
        assert_eq!(fade.poll(now), FadeTick::Complete);
        assert_eq!(fade.last_level(), Some(0));
    }

    #[test]
    fn last_level_tracks_progress() {
        let start = Instant::now();
        let mut fade = Fade::fade_in(30, start);
        assert_eq!(fade.last_level(), None);

        fade.poll(start);
        fade.poll(start + FADE_INTERVAL);
        fade.poll(start + FADE_INTERVAL * 2);
        assert_eq!(fade.last_level(), Some(2));
    }
}
