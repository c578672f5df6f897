//! JSON persistence for the rail dataset.
//!
//! The whole dataset lives in one file. Loading is forgiving: a missing or
//! corrupt file falls back to a generated dataset so the application always
//! has something to show.

mod error;
mod file;

pub use error::StoreError;
pub use file::{DatasetStore, StoreConfig};
