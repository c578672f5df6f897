//! Scheduled trips and their legs.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{DomainError, Timestamp, TrackId};

/// Identifier of a [`Trip`], e.g. `ISL-1000`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(String);

impl TripId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TripId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One timed traversal of part of a track, between two labelled points.
///
/// The endpoints are labels, not indices: the direction of travel falls out
/// of where the labels sit on the track, so the same track serves legs in
/// both directions.
///
/// # Invariants
///
/// - `arrival > departure`
///
/// Whether the labels exist on the track is not checked here; a leg whose
/// references do not resolve is simply never visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripLeg {
    pub track_id: TrackId,
    #[serde(rename = "fromStationId")]
    pub from_station: String,
    #[serde(rename = "toStationId")]
    pub to_station: String,
    departure_time: Timestamp,
    arrival_time: Timestamp,
}

fn check_times(departure: Timestamp, arrival: Timestamp) -> Result<(), DomainError> {
    if arrival <= departure {
        return Err(DomainError::InvalidLeg("arrival must be after departure"));
    }
    Ok(())
}

impl TripLeg {
    /// Construct a leg, validating its timing.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidLeg`] if `arrival <= departure`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rail_sim::domain::{Timestamp, TripLeg};
    ///
    /// let leg = TripLeg::new(
    ///     "track_ISL",
    ///     "ISL_CEN",
    ///     "ISL_ADM",
    ///     Timestamp::from_millis(1_000),
    ///     Timestamp::from_millis(2_000),
    /// )
    /// .unwrap();
    /// assert_eq!(leg.duration().num_milliseconds(), 1_000);
    ///
    /// assert!(TripLeg::new(
    ///     "track_ISL",
    ///     "ISL_CEN",
    ///     "ISL_ADM",
    ///     Timestamp::from_millis(2_000),
    ///     Timestamp::from_millis(2_000),
    /// )
    /// .is_err());
    /// ```
    pub fn new(
        track_id: impl Into<TrackId>,
        from_station: impl Into<String>,
        to_station: impl Into<String>,
        departure: Timestamp,
        arrival: Timestamp,
    ) -> Result<Self, DomainError> {
        check_times(departure, arrival)?;
        Ok(Self {
            track_id: track_id.into(),
            from_station: from_station.into(),
            to_station: to_station.into(),
            departure_time: departure,
            arrival_time: arrival,
        })
    }

    pub fn departure_time(&self) -> Timestamp {
        self.departure_time
    }

    pub fn arrival_time(&self) -> Timestamp {
        self.arrival_time
    }

    /// Change the timing, keeping the old one if the new one is invalid.
    pub fn set_times(&mut self, departure: Timestamp, arrival: Timestamp) -> Result<(), DomainError> {
        check_times(departure, arrival)?;
        self.departure_time = departure;
        self.arrival_time = arrival;
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.arrival_time.signed_duration_since(self.departure_time)
    }

    /// True if `t` lies within `[departure, arrival]`, inclusive at both ends.
    pub fn is_active_at(&self, t: Timestamp) -> bool {
        self.departure_time <= t && t <= self.arrival_time
    }
}

/// A scheduled train's full journey.
///
/// Legs are expected not to overlap in time, but this is not enforced.
/// When they do, the scheduler uses the first matching leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(rename = "trainId")]
    id: TripId,
    #[serde(default)]
    legs: Vec<TripLeg>,
}

impl Trip {
    /// A trip with no legs yet.
    pub fn new(id: impl Into<TripId>) -> Self {
        Self {
            id: id.into(),
            legs: Vec::new(),
        }
    }

    pub fn with_legs(id: impl Into<TripId>, legs: Vec<TripLeg>) -> Self {
        Self {
            id: id.into(),
            legs,
        }
    }

    pub fn id(&self) -> &TripId {
        &self.id
    }

    /// Renaming goes through the dataset, which keeps ids unique.
    pub(super) fn set_id(&mut self, id: TripId) {
        self.id = id;
    }

    pub fn legs(&self) -> &[TripLeg] {
        &self.legs
    }

    pub fn push_leg(&mut self, leg: TripLeg) {
        self.legs.push(leg);
    }

    pub fn remove_leg(&mut self, index: usize) -> Result<TripLeg, DomainError> {
        self.check_index(index)?;
        Ok(self.legs.remove(index))
    }

    /// Mutable access to one leg, for retiming or re-pointing it.
    pub fn leg_mut(&mut self, index: usize) -> Result<&mut TripLeg, DomainError> {
        self.check_index(index)?;
        Ok(&mut self.legs[index])
    }

    fn check_index(&self, index: usize) -> Result<(), DomainError> {
        if index < self.legs.len() {
            Ok(())
        } else {
            Err(DomainError::LegIndexOutOfRange {
                index,
                len: self.legs.len(),
            })
        }
    }

    /// Earliest departure over all legs.
    pub fn first_departure(&self) -> Option<Timestamp> {
        self.legs.iter().map(TripLeg::departure_time).min()
    }

    /// Latest arrival over all legs.
    pub fn last_arrival(&self) -> Option<Timestamp> {
        self.legs.iter().map(TripLeg::arrival_time).max()
    }
}
