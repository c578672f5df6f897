//! Single-file JSON dataset store.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::error::StoreError;
use crate::domain::RailSystemData;

/// Default dataset file, relative to the working directory.
pub const DEFAULT_PATH: &str = "rail_data.json";

/// Configuration for the dataset store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the dataset file.
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}

/// Reads and writes the dataset file.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    config: StoreConfig,
}

impl DatasetStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Get the dataset file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Read and parse the dataset file.
    pub fn load(&self) -> Result<RailSystemData, StoreError> {
        let path = &self.config.path;
        let contents = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })
    }

    /// Load the dataset, falling back to `generate()` if the file is missing
    /// or unreadable.
    ///
    /// Loaded data is checked with [`RailSystemData::validate`]; problems are
    /// logged but the data is used as-is, since the scheduler tolerates
    /// unresolvable references.
    pub fn load_or_default(&self, generate: impl FnOnce() -> RailSystemData) -> RailSystemData {
        match self.load() {
            Ok(data) => {
                let issues = data.validate();
                for issue in &issues {
                    warn!(path = %self.path().display(), issue = %issue, "Dataset problem");
                }
                info!(
                    path = %self.path().display(),
                    tracks = data.tracks().count(),
                    trips = data.trips().len(),
                    issues = issues.len(),
                    "Loaded dataset"
                );
                data
            }
            Err(e) if e.is_not_found() => {
                debug!(path = %self.path().display(), "No saved dataset, generating default");
                generate()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load dataset, generating default");
                generate()
            }
        }
    }

    /// Write the dataset as pretty-printed JSON.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, data: &RailSystemData) -> Result<(), StoreError> {
        let path = &self.config.path;
        let io_err = |source| StoreError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(data).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)?;

        debug!(path = %path.display(), "Saved dataset");
        Ok(())
    }
}
