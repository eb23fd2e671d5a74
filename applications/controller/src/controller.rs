//! Control loop wiring
//!
//! Binds a player and a scheduler to one clock and drives both from a
//! periodic tick.

use crate::config::ControllerConfig;
use chime_core::{Clock, Decoder};
use chime_playback::{PlaybackControl, PlaybackObserver, PlayerService, QueueEntry};
use chime_scheduler::{TaskScheduler, Transition};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Upper bound on the shutdown fade-out
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Forwards playback notifications to the log
struct LogObserver;

impl PlaybackObserver for LogObserver {
    fn on_play(&mut self, entry: QueueEntry) {
        info!(%entry, "Now playing");
    }

    fn on_stop(&mut self) {
        info!("Playback stopped");
    }

    fn on_error(&mut self, detail: &str) {
        warn!("Player error: {detail}");
    }
}

pub struct Controller<D: Decoder, C: Clock + Clone> {
    player: PlayerService<D, C>,
    scheduler: TaskScheduler<C>,
}

impl<D: Decoder, C: Clock + Clone> Controller<D, C> {
    /// Build the player and scheduler and load the schedule
    pub fn new(decoder: D, clock: C, config: &ControllerConfig) -> Self {
        let mut player = PlayerService::new(decoder, clock.clone(), config.player.clone());
        player.set_observer(LogObserver);

        let mut scheduler = TaskScheduler::new(clock);
        scheduler.set_max_play_duration(config.max_play_duration());
        scheduler.load(&config.schedule_path);
        scheduler.on_start(|task| info!(%task, "Schedule window opened"));
        scheduler.on_end(|task| info!(%task, "Schedule window closed"));
        scheduler.start();

        Self { player, scheduler }
    }

    /// One control loop iteration
    pub fn step(&mut self) -> Option<Transition> {
        let transition = self.scheduler.tick(&mut self.player);
        self.player.update();
        transition
    }

    /// Start fading out whatever is playing
    pub fn begin_shutdown(&mut self) {
        self.player.stop();
    }

    /// Service the player only, without consulting the schedule
    pub fn drain_step(&mut self) {
        self.player.update();
    }

    pub fn is_idle(&self) -> bool {
        !self.player.is_playing()
    }

    pub fn player(&self) -> &PlayerService<D, C> {
        &self.player
    }

    pub fn scheduler(&self) -> &TaskScheduler<C> {
        &self.scheduler
    }
}

/// Run until Ctrl-C, then fade out and return
pub async fn run<D: Decoder, C: Clock + Clone>(
    mut controller: Controller<D, C>,
    tick_interval: Duration,
) -> anyhow::Result<()> {
    let mut ticker = tokio::time::interval(tick_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                controller.step();
            }
            result = &mut shutdown => {
                result?;
                break;
            }
        }
    }

    info!("Shutting down");
    controller.begin_shutdown();
    let deadline = Instant::now() + SHUTDOWN_GRACE;
    while !controller.is_idle() && Instant::now() < deadline {
        ticker.tick().await;
        controller.drain_step();
    }
    if !controller.is_idle() {
        warn!("Fade-out did not finish before exit");
    }
    Ok(())
}
