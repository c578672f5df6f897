//! Planar coordinate type.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A position on the plane.
///
/// Units are whatever the consumer projected into; the simulation only
/// relies on Euclidean distance being meaningful. On the wire a coordinate
/// is a two-element array `[x, y]`, matching the stored `[lng, lat]` pairs.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another coordinate.
    pub fn distance(self, other: Coordinate) -> f64 {
        (other - self).length()
    }

    /// Length of this coordinate treated as a vector from the origin.
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Linear interpolation towards `other` (`t = 0` is `self`).
    pub fn lerp(self, other: Coordinate, t: f64) -> Coordinate {
        Coordinate::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.x, c.y]
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl Add for Coordinate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Coordinate::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coordinate {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Coordinate::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Coordinate {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Coordinate::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn lerp_endpoints() {
        let a = Coordinate::new(1.0, 2.0);
        let b = Coordinate::new(5.0, -2.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Coordinate::new(3.0, 0.0));
    }

    #[test]
    fn serializes_as_array() {
        let c = Coordinate::new(114.1278, 22.2812);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "[114.1278,22.2812]");

        let back: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(serde_json::from_str::<Coordinate>("[1.0]").is_err());
        assert!(serde_json::from_str::<Coordinate>("[1.0, 2.0, 3.0]").is_err());
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", Coordinate::new(1.0, 2.5)), "(1, 2.5)");
    }
}
