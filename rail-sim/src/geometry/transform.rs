//! Datum conversion for raw station coordinates.
//!
//! Map providers in mainland China and Hong Kong expect GCJ-02 coordinates
//! rather than the WGS84 values a GPS or open dataset provides. Coordinates
//! are `x = longitude`, `y = latitude`, in degrees.

use std::f64::consts::PI;

use super::Coordinate;

/// Semi-major axis of the Krasovsky 1940 ellipsoid.
const SEMI_MAJOR_AXIS: f64 = 6_378_245.0;

/// First eccentricity squared of the Krasovsky 1940 ellipsoid.
const ECCENTRICITY_SQ: f64 = 0.006_693_421_622_965_943_23;

/// A pure, deterministic conversion between coordinate systems.
pub trait CoordinateTransform {
    fn transform(&self, c: Coordinate) -> Coordinate;
}

/// Leaves coordinates untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl CoordinateTransform for Identity {
    fn transform(&self, c: Coordinate) -> Coordinate {
        c
    }
}

/// WGS84 → GCJ-02 ("Mars coordinates").
///
/// Points outside the China bounding box are returned unchanged.
///
/// # Examples
///
/// ```
/// use rail_sim::geometry::{Coordinate, CoordinateTransform, Wgs84ToGcj02};
///
/// let london = Coordinate::new(-0.1276, 51.5072);
/// assert_eq!(Wgs84ToGcj02.transform(london), london);
///
/// let central = Coordinate::new(114.1582, 22.2820);
/// let shifted = Wgs84ToGcj02.transform(central);
/// assert!(shifted.distance(central) > 0.001);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Wgs84ToGcj02;

impl CoordinateTransform for Wgs84ToGcj02 {
    fn transform(&self, c: Coordinate) -> Coordinate {
        let (lng, lat) = (c.x, c.y);
        if out_of_china(lng, lat) {
            return c;
        }

        let d_lat = offset_lat(lng - 105.0, lat - 35.0);
        let d_lng = offset_lng(lng - 105.0, lat - 35.0);

        let rad_lat = lat / 180.0 * PI;
        let magic = 1.0 - ECCENTRICITY_SQ * rad_lat.sin().powi(2);
        let sqrt_magic = magic.sqrt();

        let d_lat = (d_lat * 180.0)
            / ((SEMI_MAJOR_AXIS * (1.0 - ECCENTRICITY_SQ)) / (magic * sqrt_magic) * PI);
        let d_lng = (d_lng * 180.0) / (SEMI_MAJOR_AXIS / sqrt_magic * rad_lat.cos() * PI);

        Coordinate::new(lng + d_lng, lat + d_lat)
    }
}

fn out_of_china(lng: f64, lat: f64) -> bool {
    !(72.004..=137.8347).contains(&lng) || !(0.8293..=55.8271).contains(&lat)
}

fn offset_lat(x: f64, y: f64) -> f64 {
    let mut ret = -100.0 + 2.0 * x + 3.0 * y + 0.2 * y * y + 0.1 * x * y + 0.2 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (y * PI).sin() + 40.0 * (y / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (160.0 * (y / 12.0 * PI).sin() + 320.0 * (y * PI / 30.0).sin()) * 2.0 / 3.0;
    ret
}

fn offset_lng(x: f64, y: f64) -> f64 {
    let mut ret = 300.0 + x + 2.0 * y + 0.1 * x * x + 0.1 * x * y + 0.1 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (x * PI).sin() + 40.0 * (x / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (150.0 * (x / 12.0 * PI).sin() + 300.0 * (x / 30.0 * PI).sin()) * 2.0 / 3.0;
    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_identity() {
        let c = Coordinate::new(114.1582, 22.2820);
        assert_eq!(Identity.transform(c), c);
    }

    #[test]
    fn outside_china_unchanged() {
        for c in [
            Coordinate::new(-0.1276, 51.5072),
            Coordinate::new(139.6917, 35.6895),
            Coordinate::new(100.0, -5.0),
        ] {
            assert_eq!(Wgs84ToGcj02.transform(c), c);
        }
    }

    #[test]
    fn hong_kong_shift_is_a_few_hundred_metres() {
        // Central station: the GCJ-02 offset in Hong Kong is roughly
        // +0.005 lng / -0.0027 lat.
        let wgs = Coordinate::new(114.1582, 22.2820);
        let gcj = Wgs84ToGcj02.transform(wgs);

        let d_lng = gcj.x - wgs.x;
        let d_lat = gcj.y - wgs.y;
        assert!(d_lng > 0.003 && d_lng < 0.007, "d_lng = {d_lng}");
        assert!(d_lat < -0.001 && d_lat > -0.004, "d_lat = {d_lat}");
    }

    #[test]
    fn deterministic() {
        let c = Coordinate::new(116.397, 39.908);
        assert_eq!(Wgs84ToGcj02.transform(c), Wgs84ToGcj02.transform(c));
    }
}
