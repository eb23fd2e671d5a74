/// Controller configuration
use crate::error::{ControllerError, Result};
use chime_playback::{PlayerConfig, FADE_INTERVAL, MAX_VOLUME};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "chime.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControllerConfig {
    #[serde(default = "default_schedule_path")]
    pub schedule_path: PathBuf,

    /// Period of the control loop, at most 20 ms (one fade step per tick)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub scheduler: SchedulerSettings,

    #[serde(default = "default_decoder")]
    pub decoder: DecoderSettings,

    /// Directory holding the credential files
    #[serde(default = "default_settings_dir")]
    pub settings_dir: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SchedulerSettings {
    /// Safety cut-off for a single task, in seconds
    #[serde(default)]
    pub max_play_duration_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DecoderSettings {
    /// Directory laid out like the decoder's card (`NN/MMM*.mp3`)
    #[serde(default = "default_music_root")]
    pub music_root: PathBuf,

    /// How long a simulated track plays before it reports completion
    #[serde(default = "default_track_length_secs")]
    pub track_length_secs: u64,
}

impl ControllerConfig {
    /// Load configuration from file and environment
    ///
    /// The file is optional. Variables prefixed with `CHIME_` override it,
    /// with `__` between nested keys (`CHIME_PLAYER__VOLUME=20`).
    pub fn load(path: &Path) -> Result<Self> {
        let mut settings = config::Config::builder();

        if path.exists() {
            settings = settings.add_source(config::File::from(path.to_path_buf()));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CHIME")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ControllerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ControllerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        // One fade step per tick, so a longer tick stretches every ramp
        let max_tick = FADE_INTERVAL.as_millis();
        if self.tick_interval_ms == 0 || u128::from(self.tick_interval_ms) > max_tick {
            return Err(ControllerError::Config(format!(
                "tick_interval_ms must be between 1 and {max_tick}, got {}",
                self.tick_interval_ms
            )));
        }

        if self.player.volume > MAX_VOLUME {
            return Err(ControllerError::Config(format!(
                "player.volume must be at most {MAX_VOLUME}, got {}",
                self.player.volume
            )));
        }

        if self.player.track_count_retries == 0 {
            return Err(ControllerError::Config(
                "player.track_count_retries must be at least 1".to_string(),
            ));
        }

        if self.decoder.track_length_secs == 0 {
            return Err(ControllerError::Config(
                "decoder.track_length_secs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn max_play_duration(&self) -> Option<Duration> {
        self.scheduler.max_play_duration_secs.map(Duration::from_secs)
    }

    pub fn track_length(&self) -> Duration {
        Duration::from_secs(self.decoder.track_length_secs)
    }
}

// Default values
fn default_schedule_path() -> PathBuf {
    PathBuf::from("task.txt")
}

fn default_tick_interval_ms() -> u64 {
    10
}

fn default_decoder() -> DecoderSettings {
    DecoderSettings {
        music_root: default_music_root(),
        track_length_secs: default_track_length_secs(),
    }
}

fn default_music_root() -> PathBuf {
    PathBuf::from("./sd")
}

fn default_track_length_secs() -> u64 {
    180
}

fn default_settings_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            schedule_path: default_schedule_path(),
            tick_interval_ms: default_tick_interval_ms(),
            player: PlayerConfig::default(),
            scheduler: SchedulerSettings::default(),
            decoder: default_decoder(),
            settings_dir: default_settings_dir(),
        }
    }
}
