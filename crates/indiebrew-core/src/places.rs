//! Place records flowing through the ranking pipeline.
//!
//! [`RawPlace`] is what the upstream geosearch provider hands us; it is never
//! mutated. [`RankedResult`] is built once per request by the assembler and
//! serialized straight to the caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Search radius used when the caller does not supply one, in metres.
pub const DEFAULT_RADIUS_M: u32 = 5_000;
/// Smallest radius the upstream provider accepts, in metres.
pub const MIN_RADIUS_M: u32 = 1;
/// Largest radius the upstream provider accepts, in metres.
pub const MAX_RADIUS_M: u32 = 50_000;
/// Hard cap on the number of results returned for one search.
pub const MAX_RESULTS: usize = 60;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns `true` when both components are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// A place record as returned by the upstream geosearch provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlace {
    /// Provider-assigned identifier, stable per physical venue.
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub ratings_count: Option<u32>,
    /// Vicinity or formatted address, whichever the provider returned.
    #[serde(default)]
    pub address: Option<String>,
    /// `None` means the provider did not report opening hours.
    #[serde(default)]
    pub open_now: Option<bool>,
    #[serde(default)]
    pub location: Option<Coordinates>,
}

impl RawPlace {
    /// Returns the trimmed display name, or `None` when it is absent or blank.
    #[must_use]
    pub fn usable_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// A place that survived classification, annotated for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    pub id: String,
    pub name: String,
    pub rating: Option<f64>,
    pub ratings_count: Option<u32>,
    pub address: Option<String>,
    pub open_now: Option<bool>,
    pub location: Option<Coordinates>,
    /// Great-circle distance from the search origin, rounded to whole metres.
    /// Absent when either endpoint has no coordinates.
    pub distance_meters: Option<u32>,
    /// Maps deep link for this place.
    pub external_link: String,
}

/// Ordering applied by the ranker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankStrategy {
    /// Nearest first.
    Distance,
    /// Distance tier first, then rating-weighted quality score.
    #[default]
    Composite,
}

impl fmt::Display for RankStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankStrategy::Distance => write!(f, "distance"),
            RankStrategy::Composite => write!(f, "composite"),
        }
    }
}

impl FromStr for RankStrategy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(RankStrategy::Distance),
            "composite" => Ok(RankStrategy::Composite),
            _ => Err(CoreError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Presentation-time ordering applied after ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayOrder {
    /// Keep the ranker's order.
    #[default]
    Ranked,
    /// Highest rated first.
    Rating,
}

impl fmt::Display for DisplayOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayOrder::Ranked => write!(f, "ranked"),
            DisplayOrder::Rating => write!(f, "rating"),
        }
    }
}

impl FromStr for DisplayOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ranked" => Ok(DisplayOrder::Ranked),
            "rating" => Ok(DisplayOrder::Rating),
            _ => Err(CoreError::UnknownDisplayOrder(s.to_string())),
        }
    }
}

/// Clamp a caller-supplied radius to the provider's accepted range.
///
/// Non-finite input falls back to [`DEFAULT_RADIUS_M`].
#[must_use]
pub fn clamp_radius_m(raw: f64) -> u32 {
    if !raw.is_finite() {
        return DEFAULT_RADIUS_M;
    }
    let clamped = raw
        .round()
        .clamp(f64::from(MIN_RADIUS_M), f64::from(MAX_RADIUS_M));
    // Clamped into [MIN_RADIUS_M, MAX_RADIUS_M] above, so the cast is exact.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let radius = clamped as u32;
    radius
}
