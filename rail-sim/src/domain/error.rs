//! Domain error types.
//!
//! These errors represent rejected edits and data inconsistencies in the
//! rail dataset. They are distinct from storage/IO errors. Note that the
//! scheduler never returns them: an unresolvable leg simply has no position.

use super::{TrackId, TripId};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A label is already used by another point on the same track
    #[error("track {track} already has a point labelled {label:?}")]
    DuplicateLabel { track: TrackId, label: String },

    /// A track with this id already exists
    #[error("track {0} already exists")]
    DuplicateTrack(TrackId),

    /// A trip with this id already exists
    #[error("trip {0} already exists")]
    DuplicateTrip(TripId),

    /// No track with this id
    #[error("unknown track {0}")]
    UnknownTrack(TrackId),

    /// No trip with this id
    #[error("unknown trip {0}")]
    UnknownTrip(TripId),

    /// A leg refers to a label its track does not contain
    #[error("track {track} has no point labelled {label:?}")]
    UnknownStation { track: TrackId, label: String },

    /// Point index is out of bounds for the track
    #[error("point index {index} out of range for track of {len} points")]
    PointIndexOutOfRange { index: usize, len: usize },

    /// Leg index is out of bounds for the trip
    #[error("leg index {index} out of range for trip of {len} legs")]
    LegIndexOutOfRange { index: usize, len: usize },

    /// Invalid leg construction (e.g., arrival before departure)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// A track is stored under a key that differs from its own id
    #[error("track {id} is stored under key {key}")]
    TrackKeyMismatch { key: TrackId, id: TrackId },
}
