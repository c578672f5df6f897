//! The rail system dataset: every track and every trip.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{DomainError, Timestamp, TrackGeometry, TrackId, Trip, TripId, TripLeg};

/// Root aggregate of tracks and trips.
///
/// Owned by the application for its lifetime and handed by reference to the
/// scheduler (read-only) and to edit operations (mutable). Tracks are kept in
/// a sorted map so that saved files are stable across runs.
///
/// The serialized shape is `{"tracks": {id: track}, "trips": [trip]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RailSystemData {
    #[serde(default)]
    tracks: BTreeMap<TrackId, TrackGeometry>,
    #[serde(default)]
    trips: Vec<Trip>,
}

impl RailSystemData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> impl Iterator<Item = &TrackGeometry> {
        self.tracks.values()
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn find_track(&self, id: &TrackId) -> Option<&TrackGeometry> {
        self.tracks.get(id)
    }

    /// Index of `label` on track `track_id`. `None` if either is missing.
    pub fn find_point_index(&self, track_id: &TrackId, label: &str) -> Option<usize> {
        self.find_track(track_id)?.find_point_index(label)
    }

    pub fn find_trip(&self, id: &TripId) -> Option<&Trip> {
        self.trips.iter().find(|t| t.id() == id)
    }

    /// Earliest departure across every leg of every trip.
    pub fn earliest_departure(&self) -> Option<Timestamp> {
        self.trips.iter().filter_map(Trip::first_departure).min()
    }

    // === Track edits ===

    pub fn add_track(&mut self, track: TrackGeometry) -> Result<(), DomainError> {
        if self.tracks.contains_key(track.id()) {
            return Err(DomainError::DuplicateTrack(track.id().clone()));
        }
        self.tracks.insert(track.id().clone(), track);
        Ok(())
    }

    /// Remove a track. Legs on it become unresolvable.
    pub fn remove_track(&mut self, id: &TrackId) -> Result<TrackGeometry, DomainError> {
        self.tracks
            .remove(id)
            .ok_or_else(|| DomainError::UnknownTrack(id.clone()))
    }

    /// Mutable access for point edits; the track guards its own invariants.
    pub fn track_mut(&mut self, id: &TrackId) -> Result<&mut TrackGeometry, DomainError> {
        self.tracks
            .get_mut(id)
            .ok_or_else(|| DomainError::UnknownTrack(id.clone()))
    }

    // === Trip edits ===

    pub fn add_trip(&mut self, trip: Trip) -> Result<(), DomainError> {
        if self.find_trip(trip.id()).is_some() {
            return Err(DomainError::DuplicateTrip(trip.id().clone()));
        }
        self.trips.push(trip);
        Ok(())
    }

    pub fn remove_trip(&mut self, id: &TripId) -> Result<Trip, DomainError> {
        let index = self
            .trips
            .iter()
            .position(|t| t.id() == id)
            .ok_or_else(|| DomainError::UnknownTrip(id.clone()))?;
        Ok(self.trips.remove(index))
    }

    pub fn trip_mut(&mut self, id: &TripId) -> Result<&mut Trip, DomainError> {
        self.trips
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or_else(|| DomainError::UnknownTrip(id.clone()))
    }

    /// Change a trip's id, rejecting ids already in use by another trip.
    pub fn rename_trip(&mut self, id: &TripId, new_id: TripId) -> Result<(), DomainError> {
        if &new_id != id && self.find_trip(&new_id).is_some() {
            return Err(DomainError::DuplicateTrip(new_id));
        }
        self.trip_mut(id)?.set_id(new_id);
        Ok(())
    }

    pub fn add_leg(&mut self, trip: &TripId, leg: TripLeg) -> Result<(), DomainError> {
        self.trip_mut(trip)?.push_leg(leg);
        Ok(())
    }

    pub fn remove_leg(&mut self, trip: &TripId, index: usize) -> Result<TripLeg, DomainError> {
        self.trip_mut(trip)?.remove_leg(index)
    }

    pub fn set_leg_times(
        &mut self,
        trip: &TripId,
        index: usize,
        departure: Timestamp,
        arrival: Timestamp,
    ) -> Result<(), DomainError> {
        self.trip_mut(trip)?.leg_mut(index)?.set_times(departure, arrival)
    }

    /// Point a leg at another track. The endpoints are kept as they are.
    pub fn set_leg_track(&mut self, trip: &TripId, index: usize, track: TrackId) -> Result<(), DomainError> {
        if !self.tracks.contains_key(&track) {
            return Err(DomainError::UnknownTrack(track));
        }
        self.trip_mut(trip)?.leg_mut(index)?.track_id = track;
        Ok(())
    }

    pub fn set_leg_endpoints(
        &mut self,
        trip: &TripId,
        index: usize,
        from_station: impl Into<String>,
        to_station: impl Into<String>,
    ) -> Result<(), DomainError> {
        let leg = self.trip_mut(trip)?.leg_mut(index)?;
        leg.from_station = from_station.into();
        leg.to_station = to_station.into();
        Ok(())
    }

    // === Consistency ===

    /// Report every invariant violation, without changing anything.
    ///
    /// Edits made through this type cannot introduce duplicate labels or
    /// inverted legs, but data loaded from storage can contain them, and
    /// edits can legitimately leave legs pointing at removed stations.
    pub fn validate(&self) -> Vec<DomainError> {
        let mut issues = Vec::new();

        for (key, track) in &self.tracks {
            if key != track.id() {
                issues.push(DomainError::TrackKeyMismatch {
                    key: key.clone(),
                    id: track.id().clone(),
                });
            }
            for label in track.duplicate_labels() {
                issues.push(DomainError::DuplicateLabel {
                    track: key.clone(),
                    label,
                });
            }
        }

        let mut seen_trips = HashSet::new();
        for trip in &self.trips {
            if !seen_trips.insert(trip.id()) {
                issues.push(DomainError::DuplicateTrip(trip.id().clone()));
            }
            for leg in trip.legs() {
                if leg.arrival_time() <= leg.departure_time() {
                    issues.push(DomainError::InvalidLeg("arrival must be after departure"));
                }
                let Some(track) = self.find_track(&leg.track_id) else {
                    issues.push(DomainError::UnknownTrack(leg.track_id.clone()));
                    continue;
                };
                for label in [&leg.from_station, &leg.to_station] {
                    if track.find_point_index(label).is_none() {
                        issues.push(DomainError::UnknownStation {
                            track: leg.track_id.clone(),
                            label: label.clone(),
                        });
                    }
                }
            }
        }

        issues
    }
}
