//! Catmull-Rom smoothing of sparse control points.
//!
//! This is a display-side utility. The scheduler never re-smooths: it walks
//! whatever points a track stores, linearly.

use super::Coordinate;

/// Evaluate a uniform Catmull-Rom segment between `p1` and `p2`.
fn catmull_rom(p0: Coordinate, p1: Coordinate, p2: Coordinate, p3: Coordinate, t: f64) -> Coordinate {
    let t2 = t * t;
    let t3 = t2 * t;
    (p1 * 2.0
        + (p2 - p0) * t
        + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2
        + (p3 - p0 + (p1 - p2) * 3.0) * t3)
        * 0.5
}

/// Densify `points` with a Catmull-Rom spline passing through every one of
/// them.
///
/// Each original segment contributes `subdivisions` samples, so an open path
/// of `N` points yields `(N - 1) * subdivisions + 1` points and a closed one
/// yields `N * subdivisions + 1` (ending back on the first point). Every
/// control point appears verbatim in the output; in particular the first and
/// last points of an open path are preserved exactly.
///
/// Inputs with fewer than two points, or `subdivisions == 0`, are returned
/// unchanged.
pub fn smooth(points: &[Coordinate], subdivisions: usize, closed: bool) -> Vec<Coordinate> {
    let n = points.len();
    if n < 2 || subdivisions == 0 {
        return points.to_vec();
    }

    let segments = if closed { n } else { n - 1 };
    let mut out = Vec::with_capacity(segments * subdivisions + 1);

    let at = |i: isize| -> Coordinate {
        if closed {
            points[i.rem_euclid(n as isize) as usize]
        } else if i < 0 {
            // Mirrored phantom before the start
            points[0] * 2.0 - points[1]
        } else if i as usize >= n {
            points[n - 1] * 2.0 - points[n - 2]
        } else {
            points[i as usize]
        }
    };

    for seg in 0..segments as isize {
        let (p0, p1, p2, p3) = (at(seg - 1), at(seg), at(seg + 1), at(seg + 2));
        out.push(p1);
        for i in 1..subdivisions {
            let t = i as f64 / subdivisions as f64;
            out.push(catmull_rom(p0, p1, p2, p3, t));
        }
    }

    out.push(if closed { points[0] } else { points[n - 1] });
    out
}
