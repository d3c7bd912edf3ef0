//! `rank` command: run the assembly pipeline over a snapshot file.

use std::path::PathBuf;

use anyhow::Context;
use indiebrew_core::{ClassifierLists, Coordinates, DisplayOrder, RankStrategy, RankedResult, RawPlace};
use indiebrew_ranker::{sort_for_display, AssembleOptions, Assembler};

#[derive(Debug, Clone)]
pub(crate) struct RankRequest {
    pub lat: f64,
    pub lng: f64,
    pub input: PathBuf,
    pub strategy: RankStrategy,
    pub max_results: usize,
    pub coffee_only: bool,
    pub sort: DisplayOrder,
}

/// Reads `request.input` and returns the ranked, display-ordered results.
///
/// # Errors
///
/// Returns an error if the origin is out of range or the input file cannot
/// be read or parsed.
pub(crate) fn run_rank(
    lists: &ClassifierLists,
    request: &RankRequest,
) -> anyhow::Result<Vec<RankedResult>> {
    let origin = Coordinates::new(request.lat, request.lng);
    if !origin.is_finite() || origin.lat.abs() > 90.0 || origin.lng.abs() > 180.0 {
        anyhow::bail!(
            "origin ({}, {}) is not a valid latitude/longitude",
            request.lat,
            request.lng
        );
    }

    let content = std::fs::read_to_string(&request.input)
        .with_context(|| format!("failed to read {}", request.input.display()))?;
    let raw_places: Vec<RawPlace> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse places from {}", request.input.display()))?;

    let options = AssembleOptions {
        strategy: request.strategy,
        max_results: request.max_results,
        require_coffee_hint: request.coffee_only,
    };
    let mut results = Assembler::new(lists).assemble(&raw_places, origin, &options);
    sort_for_display(&mut results, request.sort);

    tracing::info!(
        input = %request.input.display(),
        received = raw_places.len(),
        returned = results.len(),
        "ranked snapshot"
    );

    Ok(results)
}
