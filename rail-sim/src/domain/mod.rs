//! Domain types for the rail simulation.
//!
//! This module contains the data model: track geometries with their named
//! stations, trips made of timed legs, and the dataset that owns them all.
//! Constructors and edit operations enforce the invariants that can be
//! checked locally (unique labels per track, legs that end after they
//! start); cross-references between legs and tracks are allowed to dangle
//! and are reported by [`RailSystemData::validate`].

mod dataset;
mod error;
mod time;
mod track;
mod trip;

pub use dataset::RailSystemData;
pub use error::DomainError;
pub use time::Timestamp;
pub use track::{TrackGeometry, TrackId, TrackPoint};
pub use trip::{Trip, TripId, TripLeg};
