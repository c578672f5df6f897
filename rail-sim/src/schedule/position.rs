//! Leg selection, sub-path extraction and interpolation.

use tracing::{debug, trace};

use crate::domain::{RailSystemData, Timestamp, TrackGeometry, Trip, TripLeg};
use crate::geometry::{Coordinate, Pose, interpolate};

/// Where one train is at a given moment.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainPosition<'a> {
    pub trip: &'a Trip,
    /// Index of the leg being travelled.
    pub leg_index: usize,
    pub pose: Pose,
}

/// The leg `trip` is on at time `t`, with its index.
///
/// Windows are inclusive at both ends. If legs overlap, the first one in
/// leg order wins.
pub fn active_leg(trip: &Trip, t: Timestamp) -> Option<(usize, &TripLeg)> {
    trip.legs().iter().enumerate().find(|(_, leg)| leg.is_active_at(t))
}

/// Fraction of `leg` completed at time `t`, clamped to `[0, 1]`.
///
/// Legs with no duration count as already arrived.
pub fn leg_progress(leg: &TripLeg, t: Timestamp) -> f64 {
    let total = leg.duration().num_milliseconds();
    if total <= 0 {
        return 1.0;
    }
    let elapsed = t.signed_duration_since(leg.departure_time()).num_milliseconds();
    (elapsed as f64 / total as f64).clamp(0.0, 1.0)
}

/// The points of `track` between the stations `from` and `to`, ordered in
/// the direction of travel.
///
/// When `from` sits later on the track than `to`, the stored slice is
/// reversed so that it still starts at `from`. Identical endpoints give a
/// single point. Returns `None` if either label is missing.
///
/// # Examples
///
/// ```
/// use rail_sim::domain::{TrackGeometry, TrackPoint};
/// use rail_sim::geometry::Coordinate;
/// use rail_sim::schedule::sub_path;
///
/// let track = TrackGeometry::new(
///     "t",
///     vec![
///         TrackPoint::station(Coordinate::new(0.0, 0.0), "A"),
///         TrackPoint::new(Coordinate::new(1.0, 0.0)),
///         TrackPoint::station(Coordinate::new(2.0, 0.0), "B"),
///     ],
/// )
/// .unwrap();
///
/// let back = sub_path(&track, "B", "A").unwrap();
/// assert_eq!(back.first(), Some(&Coordinate::new(2.0, 0.0)));
/// assert_eq!(back.last(), Some(&Coordinate::new(0.0, 0.0)));
/// ```
pub fn sub_path(track: &TrackGeometry, from: &str, to: &str) -> Option<Vec<Coordinate>> {
    let from_idx = track.find_point_index(from)?;
    let to_idx = track.find_point_index(to)?;
    let path = track.path();

    let points = if from_idx <= to_idx {
        path[from_idx..=to_idx].iter().map(|p| p.location).collect()
    } else {
        path[to_idx..=from_idx].iter().rev().map(|p| p.location).collect()
    };
    Some(points)
}

/// Position and heading of `trip` at time `t`.
///
/// Returns `None` when the train is not on any leg (before departure,
/// dwelling between legs, or finished), and when the active leg cannot be
/// resolved against `data`. Neither case is an error.
pub fn position_at(trip: &Trip, data: &RailSystemData, t: Timestamp) -> Option<Pose> {
    locate(trip, data, t).map(|(_, pose)| pose)
}

/// Positions of every visible train at time `t`.
///
/// This is the per-frame poll: one call per tick, trains in dataset order.
pub fn positions_at(data: &RailSystemData, t: Timestamp) -> Vec<TrainPosition<'_>> {
    data.trips()
        .iter()
        .filter_map(|trip| {
            locate(trip, data, t).map(|(leg_index, pose)| TrainPosition {
                trip,
                leg_index,
                pose,
            })
        })
        .collect()
}

fn locate(trip: &Trip, data: &RailSystemData, t: Timestamp) -> Option<(usize, Pose)> {
    let Some((leg_index, leg)) = active_leg(trip, t) else {
        trace!(trip = %trip.id(), "No active leg");
        return None;
    };
    let progress = leg_progress(leg, t);

    let Some(track) = data.find_track(&leg.track_id) else {
        debug!(trip = %trip.id(), leg = leg_index, track = %leg.track_id, "Leg refers to unknown track");
        return None;
    };

    let Some(points) = sub_path(track, &leg.from_station, &leg.to_station) else {
        debug!(
            trip = %trip.id(),
            leg = leg_index,
            track = %leg.track_id,
            from = %leg.from_station,
            to = %leg.to_station,
            "Leg endpoint not found on track"
        );
        return None;
    };

    let pose = match points.as_slice() {
        // Both endpoints on the same point: stationary, no direction
        [only] => Pose::new(*only, 0.0),
        _ => interpolate(&points, progress)?,
    };
    Some((leg_index, pose))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::TrackPoint;
    use proptest::prelude::*;

    fn make_track(n: usize) -> TrackGeometry {
        let points = (0..n)
            .map(|i| TrackPoint::station(Coordinate::new(i as f64 * 10.0, (i % 2) as f64), format!("S{i}")))
            .collect();
        TrackGeometry::new("t", points).unwrap()
    }

    proptest! {
        /// Reversing the endpoints reverses the sub-path
        #[test]
        fn reverse_is_mirror(n in 2usize..12, a in 0usize..12, b in 0usize..12) {
            let track = make_track(n);
            let (a, b) = (a % n, b % n);
            let forward = sub_path(&track, &format!("S{a}"), &format!("S{b}")).unwrap();
            let mut backward = sub_path(&track, &format!("S{b}"), &format!("S{a}")).unwrap();
            backward.reverse();
            prop_assert_eq!(forward.len(), a.abs_diff(b) + 1);
            prop_assert_eq!(forward, backward);
        }

        /// Sub-paths always start at `from` and end at `to`
        #[test]
        fn sub_path_endpoints(n in 2usize..12, a in 0usize..12, b in 0usize..12) {
            let track = make_track(n);
            let (a, b) = (a % n, b % n);
            let points = sub_path(&track, &format!("S{a}"), &format!("S{b}")).unwrap();
            prop_assert_eq!(points[0], track.path()[a].location);
            prop_assert_eq!(points[points.len() - 1], track.path()[b].location);
        }

        /// Progress stays within [0, 1] for any query time
        #[test]
        fn progress_bounded(dep in -1_000_000i64..1_000_000, dur in 1i64..1_000_000, t in -3_000_000i64..3_000_000) {
            let leg = TripLeg::new("t", "A", "B", Timestamp::from_millis(dep), Timestamp::from_millis(dep + dur)).unwrap();
            let p = leg_progress(&leg, Timestamp::from_millis(t));
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }
}
