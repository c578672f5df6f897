//! Simulation timestamps.
//!
//! Schedules and the playback clock share one time axis: milliseconds since
//! the Unix epoch. Stored datasets written by older tools may carry
//! fractional milliseconds (leg durations computed from distances), so
//! deserialization accepts floats and rounds them.

use std::fmt;
use std::ops::{Add, Sub};

use chrono::{DateTime, Duration, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// A point on the simulation time axis, in milliseconds since the Unix epoch.
///
/// # Examples
///
/// ```
/// use rail_sim::domain::Timestamp;
/// use chrono::Duration;
///
/// let t = Timestamp::from_millis(1_700_000_000_000);
/// assert_eq!(t.to_string(), "14/11/2023 22:13:20.0");
///
/// let later = t + Duration::seconds(90);
/// assert_eq!(later.signed_duration_since(t), Duration::seconds(90));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }

    /// Convert to a calendar time. `None` if outside chrono's range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// Duration from `earlier` to `self` (negative if `earlier` is later).
    ///
    /// Saturates at the range of [`Duration`], which is symmetric and so
    /// stops one millisecond short of `i64::MIN`.
    pub fn signed_duration_since(self, earlier: Timestamp) -> Duration {
        Duration::milliseconds(self.0.saturating_sub(earlier.0).max(-i64::MAX))
    }

    /// Add a duration, returning `None` on overflow.
    pub fn checked_add(self, d: Duration) -> Option<Self> {
        self.0.checked_add(d.num_milliseconds()).map(Self)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    /// Saturates at the ends of the axis.
    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0.saturating_add(rhs.num_milliseconds()))
    }
}

impl Sub<Duration> for Timestamp {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        Self(self.0.saturating_sub(rhs.num_milliseconds()))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}

impl fmt::Display for Timestamp {
    /// `dd/mm/YYYY HH:MM:SS.d` in UTC, with tenths of a second.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => {
                let tenths = self.0.rem_euclid(1000) / 100;
                write!(f, "{}.{}", dt.format("%d/%m/%Y %H:%M:%S"), tenths)
            }
            None => write!(f, "{}ms", self.0),
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MillisVisitor;

        impl Visitor<'_> for MillisVisitor {
            type Value = Timestamp;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("milliseconds since the Unix epoch")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Timestamp, E> {
                Ok(Timestamp(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Timestamp, E> {
                i64::try_from(v)
                    .map(Timestamp)
                    .map_err(|_| E::custom("timestamp out of range"))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Timestamp, E> {
                if !v.is_finite() || v.abs() >= i64::MAX as f64 {
                    return Err(E::custom("timestamp out of range"));
                }
                Ok(Timestamp(v.round() as i64))
            }
        }

        deserializer.deserialize_any(MillisVisitor)
    }
}
