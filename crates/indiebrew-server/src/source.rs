//! Where raw place listings come from.
//!
//! Handlers only see [`PlaceSource`]. The shipped implementation serves a
//! JSON snapshot loaded once at startup.

use std::path::Path;

use indiebrew_core::{Coordinates, RawPlace};
use indiebrew_ranker::distance_between;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("place provider returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("failed to read places snapshot {path}: {source}")]
    SnapshotIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse places snapshot: {0}")]
    SnapshotParse(#[source] serde_json::Error),
}

/// Supplies raw places around a point.
///
/// Implementations report failures as [`SourceError`]; callers surface them
/// and never retry.
pub trait PlaceSource: Send + Sync {
    /// Places within `radius_m` metres of `origin`, in provider order.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the provider cannot answer.
    fn nearby(&self, origin: Coordinates, radius_m: u32) -> Result<Vec<RawPlace>, SourceError>;
}

/// In-memory places read from a JSON array of provider records.
#[derive(Debug, Clone, Default)]
pub struct SnapshotPlaceSource {
    places: Vec<RawPlace>,
}

impl SnapshotPlaceSource {
    #[must_use]
    pub fn new(places: Vec<RawPlace>) -> Self {
        Self { places }
    }

    /// Reads and parses a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::SnapshotIo` if the file cannot be read and
    /// `SourceError::SnapshotParse` if it is not a JSON array of places.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path).map_err(|e| SourceError::SnapshotIo {
            path: path.display().to_string(),
            source: e,
        })?;
        let places: Vec<RawPlace> =
            serde_json::from_str(&content).map_err(SourceError::SnapshotParse)?;
        Ok(Self::new(places))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl PlaceSource for SnapshotPlaceSource {
    fn nearby(&self, origin: Coordinates, radius_m: u32) -> Result<Vec<RawPlace>, SourceError> {
        let radius = f64::from(radius_m);
        let places = self
            .places
            .iter()
            .filter(|place| match place.location {
                // Records without usable coordinates are passed through.
                Some(location) if location.is_finite() && origin.is_finite() => {
                    distance_between(origin, location) <= radius
                }
                _ => true,
            })
            .cloned()
            .collect();
        Ok(places)
    }
}
