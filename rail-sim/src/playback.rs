//! Playback clock.
//!
//! Supplies the simulation time the scheduler is queried with. The clock is
//! advanced once per rendering tick by the wall-clock time that elapsed;
//! while paused it holds still.

use std::fmt;

use chrono::Duration;

use crate::domain::{RailSystemData, Timestamp};

/// Simulation time with play/pause and replay.
///
/// # Examples
///
/// ```
/// use rail_sim::domain::Timestamp;
/// use rail_sim::playback::PlaybackClock;
/// use chrono::Duration;
///
/// let mut clock = PlaybackClock::new(Timestamp::from_millis(1_000));
/// clock.advance(Duration::milliseconds(250));
/// assert_eq!(clock.current(), Timestamp::from_millis(1_250));
///
/// clock.toggle_play();
/// clock.advance(Duration::milliseconds(250));
/// assert_eq!(clock.current(), Timestamp::from_millis(1_250));
///
/// clock.reset();
/// assert_eq!(clock.current(), Timestamp::from_millis(1_000));
/// assert!(clock.is_playing());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackClock {
    current: Timestamp,
    base: Timestamp,
    playing: bool,
}

impl PlaybackClock {
    /// A playing clock starting at `base`.
    pub fn new(base: Timestamp) -> Self {
        Self {
            current: base,
            base,
            playing: true,
        }
    }

    /// A clock anchored at the first departure in `data`, or at `now` when
    /// nothing is scheduled.
    pub fn for_dataset(data: &RailSystemData, now: Timestamp) -> Self {
        Self::new(data.earliest_departure().unwrap_or(now))
    }

    pub fn current(&self) -> Timestamp {
        self.current
    }

    pub fn base(&self) -> Timestamp {
        self.base
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Move time forward by `delta` if playing.
    pub fn advance(&mut self, delta: Duration) {
        if self.playing {
            self.current = self.current + delta;
        }
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Jump back to the base time and start playing.
    pub fn reset(&mut self) {
        self.current = self.base;
        self.playing = true;
    }

    /// Scrub to `t`, keeping the play state.
    pub fn seek(&mut self, t: Timestamp) {
        self.current = t;
    }
}

impl fmt::Display for PlaybackClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.playing { "playing" } else { "paused" };
        write!(f, "{} ({state})", self.current)
    }
}
