//! Default dataset generation.
//!
//! Turns a [`Network`] into a [`RailSystemData`]: each line becomes one
//! track named `track_<LINE>` with a point per station, plus a batch of
//! forward trips and a batch of backward trips over the same track.
//!
//! Running times come from straight-line distance between stations at a
//! fixed speed, stretched by a detour factor; each train waits at every
//! intermediate station for the dwell time.

mod config;
mod network;

pub use config::GeneratorConfig;
pub use network::{Line, LineKind, Network, NetworkBuilder, Station, hong_kong_metro};

use chrono::Duration;
use tracing::{debug, info, warn};

use crate::domain::{
    DomainError, RailSystemData, Timestamp, TrackGeometry, TrackId, TrackPoint, Trip, TripLeg,
};
use crate::geometry::{Coordinate, CoordinateTransform, Wgs84ToGcj02};

/// Rough metres per degree, treating lng/lat as a plane.
const METRES_PER_DEGREE: f64 = 111_000.0;

/// Track id used for a line.
pub fn track_id_for(line: &Line) -> TrackId {
    TrackId::new(format!("track_{}", line.id))
}

/// Generate tracks and trips for every line in `network`.
///
/// The first forward train on each line leaves at `start`. Lines or trips
/// that cannot be represented (for example because a running time overflows
/// the timestamp range) are skipped with a warning.
pub fn generate(
    network: &Network,
    config: &GeneratorConfig,
    transform: &dyn CoordinateTransform,
    start: Timestamp,
) -> RailSystemData {
    let mut data = RailSystemData::new();

    for line in network.lines() {
        if let Err(e) = add_line(&mut data, line, config, transform, start) {
            warn!(line = %line.id, error = %e, "Skipping line");
        }
    }

    info!(
        tracks = data.tracks().count(),
        trips = data.trips().len(),
        "Generated dataset"
    );
    data
}

/// The built-in Hong Kong network, shifted into GCJ-02.
pub fn default_dataset(start: Timestamp) -> RailSystemData {
    generate(
        &hong_kong_metro(),
        &GeneratorConfig::default(),
        &Wgs84ToGcj02,
        start,
    )
}

fn add_line(
    data: &mut RailSystemData,
    line: &Line,
    config: &GeneratorConfig,
    transform: &dyn CoordinateTransform,
    start: Timestamp,
) -> Result<(), DomainError> {
    let track_id = track_id_for(line);
    let stops: Vec<(&str, Coordinate)> = line
        .stations
        .iter()
        .map(|s| (s.id.as_str(), transform.transform(s.location)))
        .collect();

    let path = stops
        .iter()
        .map(|&(id, location)| TrackPoint::station(location, id))
        .collect();
    let track = TrackGeometry::new(track_id.clone(), path)?.with_color(line.color.clone());
    data.add_track(track)?;

    let headway = match line.kind {
        LineKind::Urban => config.urban_headway(),
        LineKind::Suburban => config.suburban_headway(),
    };
    let reversed: Vec<(&str, Coordinate)> = stops.iter().rev().copied().collect();

    for i in 0..config.trips_per_direction {
        let serial = 1000 + i;
        let offset = headway * i as i32;

        let forward = format!("{}-{serial}", line.id);
        let departs = start + offset;
        push_trip(data, &forward, &track_id, &stops, departs, config);

        let backward = format!("{}-R{serial}", line.id);
        let departs = start + config.reverse_offset() + offset;
        push_trip(data, &backward, &track_id, &reversed, departs, config);
    }

    debug!(line = %line.id, stations = stops.len(), "Generated line");
    Ok(())
}

fn push_trip(
    data: &mut RailSystemData,
    trip_id: &str,
    track_id: &TrackId,
    stops: &[(&str, Coordinate)],
    departs: Timestamp,
    config: &GeneratorConfig,
) {
    let result = build_legs(track_id, stops, departs, config)
        .and_then(|legs| data.add_trip(Trip::with_legs(trip_id, legs)));
    if let Err(e) = result {
        warn!(trip = trip_id, error = %e, "Skipping trip");
    }
}

fn build_legs(
    track_id: &TrackId,
    stops: &[(&str, Coordinate)],
    departs: Timestamp,
    config: &GeneratorConfig,
) -> Result<Vec<TripLeg>, DomainError> {
    let mut legs = Vec::with_capacity(stops.len().saturating_sub(1));
    let mut t = departs;

    for pair in stops.windows(2) {
        let (from, from_at) = pair[0];
        let (to, to_at) = pair[1];
        let metres = from_at.distance(to_at) * METRES_PER_DEGREE;
        let arrives = t + config.running_time(metres);

        legs.push(TripLeg::new(track_id.clone(), from, to, t, arrives)?);
        t = arrives + config.dwell();
    }
    Ok(legs)
}

/// Time between a train leaving its first station and reaching its last.
pub fn journey_time(trip: &Trip) -> Option<Duration> {
    Some(trip.last_arrival()?.signed_duration_since(trip.first_departure()?))
}
