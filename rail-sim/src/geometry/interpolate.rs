//! Arc-length interpolation along a polyline.

use super::Coordinate;

/// A position on a path together with the direction of travel there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Coordinate,
    /// Direction of travel in radians, counter-clockwise from the +x axis.
    pub heading: f64,
}

impl Pose {
    pub fn new(position: Coordinate, heading: f64) -> Self {
        Self { position, heading }
    }
}

/// Total length of a polyline. Zero for fewer than two points.
pub fn path_length(path: &[Coordinate]) -> f64 {
    path.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Find the point a fraction `t` of the way along `path`, by arc length.
///
/// `t` is expected in `[0, 1]` but is not clamped; callers that need
/// clamping (the scheduler does) apply it themselves. Values below zero
/// extrapolate backwards along the first segment and values above one land
/// on the final point.
///
/// Returns `None` for paths with fewer than two points. A path whose points
/// all coincide has zero length; it yields its first point with heading `0`
/// rather than an error.
///
/// # Examples
///
/// ```
/// use rail_sim::geometry::{Coordinate, interpolate};
///
/// let path = [
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(100.0, 0.0),
///     Coordinate::new(100.0, 100.0),
/// ];
///
/// let pose = interpolate(&path, 0.75).unwrap();
/// assert_eq!(pose.position, Coordinate::new(100.0, 50.0));
/// assert!((pose.heading - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
pub fn interpolate(path: &[Coordinate], t: f64) -> Option<Pose> {
    if path.len() < 2 {
        return None;
    }

    let target = path_length(path) * t;
    let mut walked = 0.0;

    for w in path.windows(2) {
        let (from, to) = (w[0], w[1]);
        let delta = to - from;
        let segment = delta.length();

        if walked + segment >= target {
            // Zero-length segments only match when the target sits exactly
            // on their start; stay there instead of dividing by zero.
            let frac = if segment > 0.0 {
                (target - walked) / segment
            } else {
                0.0
            };
            let position = if frac >= 1.0 { to } else { from.lerp(to, frac) };
            return Some(Pose::new(position, delta.y.atan2(delta.x)));
        }
        walked += segment;
    }

    // Rounding (or t > 1) left the target beyond the accumulated length.
    let last = path[path.len() - 1];
    let prev = path[path.len() - 2];
    let delta = last - prev;
    Some(Pose::new(last, delta.y.atan2(delta.x)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn corner() -> Vec<Coordinate> {
        vec![c(0.0, 0.0), c(100.0, 0.0), c(100.0, 100.0)]
    }

    #[test]
    fn length_of_straight_line() {
        assert_eq!(path_length(&[c(0.0, 0.0), c(10.0, 0.0)]), 10.0);
    }

    #[test]
    fn length_of_multi_segment_line() {
        assert_eq!(path_length(&[c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0)]), 20.0);
    }

    #[test]
    fn length_of_short_paths_is_zero() {
        assert_eq!(path_length(&[]), 0.0);
        assert_eq!(path_length(&[c(3.0, 4.0)]), 0.0);
    }

    #[test]
    fn empty_and_single_point_are_absent() {
        assert!(interpolate(&[], 0.5).is_none());
        assert!(interpolate(&[c(1.0, 1.0)], 0.0).is_none());
        assert!(interpolate(&[c(1.0, 1.0)], 1.0).is_none());
    }

    #[test]
    fn start_point_at_zero() {
        let pose = interpolate(&corner(), 0.0).unwrap();
        assert_eq!(pose.position, c(0.0, 0.0));
        assert_eq!(pose.heading, 0.0);
    }

    #[test]
    fn end_point_at_one() {
        let pose = interpolate(&corner(), 1.0).unwrap();
        assert_eq!(pose.position, c(100.0, 100.0));
        assert!((pose.heading - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn midpoint_lands_on_corner_with_first_heading() {
        // Target length 100 is reached exactly at the end of the first
        // segment, so that segment's heading wins.
        let pose = interpolate(&corner(), 0.5).unwrap();
        assert_eq!(pose.position, c(100.0, 0.0));
        assert_eq!(pose.heading, 0.0);
    }

    #[test]
    fn three_quarters_is_halfway_up_second_segment() {
        let pose = interpolate(&corner(), 0.75).unwrap();
        assert_eq!(pose.position, c(100.0, 50.0));
        assert!((pose.heading - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn heading_points_backwards_on_reversed_segment() {
        let pose = interpolate(&[c(10.0, 0.0), c(0.0, 0.0)], 0.5).unwrap();
        assert_eq!(pose.position, c(5.0, 0.0));
        assert!((pose.heading - PI).abs() < 1e-12);
    }

    #[test]
    fn degenerate_path_returns_first_point_heading_zero() {
        let path = [c(7.0, 7.0), c(7.0, 7.0), c(7.0, 7.0)];
        for t in [0.0, 0.3, 1.0] {
            let pose = interpolate(&path, t).unwrap();
            assert_eq!(pose.position, c(7.0, 7.0));
            assert_eq!(pose.heading, 0.0);
        }
    }

    #[test]
    fn zero_length_segment_in_middle_is_skipped() {
        let path = [c(0.0, 0.0), c(10.0, 0.0), c(10.0, 0.0), c(10.0, 10.0)];
        let pose = interpolate(&path, 0.75).unwrap();
        assert_eq!(pose.position, c(10.0, 5.0));
        assert!((pose.heading - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn beyond_one_falls_back_to_last_point() {
        let pose = interpolate(&corner(), 1.5).unwrap();
        assert_eq!(pose.position, c(100.0, 100.0));
        assert!((pose.heading - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn negative_t_is_not_clamped() {
        let pose = interpolate(&[c(0.0, 0.0), c(10.0, 0.0)], -0.5).unwrap();
        assert_eq!(pose.position, c(-5.0, 0.0));
    }
}
