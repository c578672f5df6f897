//! Planar geometry used by the simulation.
//!
//! Everything in here is a pure function of its inputs: no state, no
//! allocation beyond the returned values, and no knowledge of tracks or
//! schedules. The scheduler builds on [`interpolate`]; display consumers
//! build on [`smooth`].

mod coordinate;
mod interpolate;
mod smooth;
mod transform;

pub use coordinate::Coordinate;
pub use interpolate::{Pose, interpolate, path_length};
pub use smooth::smooth;
pub use transform::{CoordinateTransform, Identity, Wgs84ToGcj02};
