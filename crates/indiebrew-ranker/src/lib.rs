//! Chain filtering and ranking for nearby coffee search results.
//!
//! [`normalize`] is re-exported from `indiebrew-core`.
//!
//! Everything in this crate is synchronous and pure: the same input always
//! produces the same output, and no function here can fail.

pub mod assemble;
pub mod classify;
pub mod geo;
pub mod link;
pub mod rank;
pub mod relevance;

pub use assemble::{assemble, AssembleOptions, Assembler};
pub use classify::{ChainClassifier, ChainVerdict};
pub use geo::{distance_between, distance_meters, rounded_meters, EARTH_RADIUS_M};
pub use indiebrew_core::normalize;
pub use link::maps_link;
pub use rank::{compare_rating_first, rank, sort_for_display, UNKNOWN_DISTANCE};
pub use relevance::RelevanceFilter;
