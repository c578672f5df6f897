//! Runtime configuration for the simulation binary.

use std::path::PathBuf;

use chrono::Duration;
use tracing::warn;

use crate::store::StoreConfig;

/// Environment variable naming the dataset file.
pub const ENV_DATA: &str = "RAIL_SIM_DATA";
/// Environment variable for the frame interval in milliseconds.
pub const ENV_TICK_MS: &str = "RAIL_SIM_TICK_MS";
/// Environment variable for simulated milliseconds per real millisecond.
pub const ENV_TIME_SCALE: &str = "RAIL_SIM_TIME_SCALE";
/// Environment variable for the number of frames to run (0 = forever).
pub const ENV_TICKS: &str = "RAIL_SIM_TICKS";

/// Configuration for the playback loop.
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// Dataset file to load and save.
    pub data_path: PathBuf,

    /// Real time between frames (milliseconds). Never zero.
    pub tick_ms: u64,

    /// Simulated time per unit of real time.
    pub time_scale: f64,

    /// Number of frames to run before exiting. Zero runs forever.
    pub max_ticks: u64,
}

impl PlaybackConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(data_path: impl Into<PathBuf>, tick_ms: u64, time_scale: f64, max_ticks: u64) -> Self {
        Self {
            data_path: data_path.into(),
            tick_ms: tick_ms.max(1),
            time_scale,
            max_ticks,
        }
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`. Unparseable values are logged and
    /// the default kept.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DATA).filter(|p| !p.is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(ms) = parse(&lookup, ENV_TICK_MS, |ms: &u64| *ms > 0) {
            config.tick_ms = ms;
        }
        if let Some(scale) = parse(&lookup, ENV_TIME_SCALE, |s: &f64| s.is_finite() && *s >= 0.0) {
            config.time_scale = scale;
        }
        if let Some(ticks) = parse(&lookup, ENV_TICKS, |_: &u64| true) {
            config.max_ticks = ticks;
        }

        config
    }

    /// Returns the frame interval as a std Duration, for the timer.
    pub fn tick(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_ms)
    }

    /// Simulated time that passes in one frame.
    pub fn sim_step(&self) -> Duration {
        Duration::milliseconds((self.tick_ms as f64 * self.time_scale).round() as i64)
    }

    /// Whether the loop should stop after `ticks` frames.
    pub fn is_done(&self, ticks: u64) -> bool {
        self.max_ticks != 0 && ticks >= self.max_ticks
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.data_path.clone())
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            data_path: StoreConfig::default().path,
            tick_ms: 100,
            time_scale: 60.0,
            max_ticks: 0,
        }
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    valid: impl Fn(&T) -> bool,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => Some(value),
        _ => {
            warn!(key, value = %raw, "Ignoring invalid setting");
            None
        }
    }
}
