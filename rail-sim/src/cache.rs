//! Cache of smoothed track polylines for display.
//!
//! Smoothing a track is cheap but not free, and every frame draws every
//! track. Results are cached per track id and must be invalidated when the
//! track is edited.

use std::sync::Arc;

use moka::sync::Cache as MokaCache;
use tracing::trace;

use crate::domain::{TrackGeometry, TrackId};
use crate::geometry::{Coordinate, smooth};

/// Smoothed polyline for one track.
pub type SmoothedPath = Arc<Vec<Coordinate>>;

/// Configuration for the track cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached tracks.
    pub max_capacity: u64,

    /// Samples per original segment.
    pub subdivisions: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 1000,
            subdivisions: 8,
        }
    }
}

/// Smoothed track paths keyed by track id.
pub struct TrackCache {
    paths: MokaCache<TrackId, SmoothedPath>,
    subdivisions: usize,
}

impl TrackCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let paths = MokaCache::builder().max_capacity(config.max_capacity).build();

        Self {
            paths,
            subdivisions: config.subdivisions,
        }
    }

    /// The smoothed path for `track`, computing it on a miss.
    pub fn get_or_smooth(&self, track: &TrackGeometry) -> SmoothedPath {
        self.paths.get_with(track.id().clone(), || {
            trace!(track = %track.id(), points = track.len(), "Smoothing track");
            Arc::new(smooth(&track.coordinates(), self.subdivisions, false))
        })
    }

    /// Cached path for `id`, without computing anything.
    pub fn get(&self, id: &TrackId) -> Option<SmoothedPath> {
        self.paths.get(id)
    }

    /// Forget one track, after it has been edited or removed.
    pub fn invalidate(&self, id: &TrackId) {
        self.paths.invalidate(id);
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.paths.invalidate_all();
    }
}
