//! Time utilities for dealgate
//!
//! Cooldowns are measured on the host's game clock, which is a plain count
//! of seconds. Wall-clock time is only used to timestamp output.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::ops::Add;
use std::time::Instant;

/// A point on the host's game clock, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameTime(f64);

impl GameTime {
    pub const ZERO: GameTime = GameTime(0.0);

    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }

    /// Seconds from `now` until `self`. Negative once `self` has passed.
    pub fn seconds_until(&self, now: GameTime) -> f64 {
        self.0 - now.0
    }
}

impl Add<f64> for GameTime {
    type Output = GameTime;

    fn add(self, rhs: f64) -> Self::Output {
        GameTime(self.0 + rhs)
    }
}

/// Maps a monotonic clock onto game time, starting at zero.
///
/// Hosts with their own game clock should construct [`GameTime`] directly.
#[derive(Debug, Clone, Copy)]
pub struct GameClock {
    origin: Instant,
}

impl GameClock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now(&self) -> GameTime {
        GameTime(self.origin.elapsed().as_secs_f64())
    }
}

/// Get the current local wall-clock time.
pub fn now() -> DateTime<Local> {
    Local::now()
}

/// Format a DateTime for display with full date and time.
pub fn format_datetime_full(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}
