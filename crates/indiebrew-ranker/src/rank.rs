//! Ordering of assembled results.
//!
//! All orderings here are stable: results with equal keys keep their input
//! order. Every result gets a position, including those with no distance or
//! rating.

use std::cmp::Ordering;

use indiebrew_core::{DisplayOrder, RankStrategy, RankedResult};

/// Sort key standing in for an unknown distance.
///
/// `u32::MAX` metres is over 200 times Earth's half-circumference, so no
/// computed distance can equal it and unknown distances always sort last.
pub const UNKNOWN_DISTANCE: u32 = u32::MAX;

/// Upper bounds (exclusive) of the composite strategy's distance tiers.
/// Anything at or past the last bound, or unknown, lands in the final tier.
const TIER_BOUNDS_M: [u32; 3] = [500, 1_200, 2_500];

fn distance_key(result: &RankedResult) -> u32 {
    result.distance_meters.unwrap_or(UNKNOWN_DISTANCE)
}

/// Tier index for a distance: 0 (<500 m) through 3 (>=2500 m or unknown).
#[must_use]
pub fn distance_tier(distance_meters: Option<u32>) -> usize {
    let distance = distance_meters.unwrap_or(UNKNOWN_DISTANCE);
    TIER_BOUNDS_M
        .iter()
        .position(|&bound| distance < bound)
        .unwrap_or(TIER_BOUNDS_M.len())
}

fn finite_rating(rating: Option<f64>) -> f64 {
    rating.filter(|r| r.is_finite()).unwrap_or(0.0)
}

/// `2 * rating + log10(ratings_count + 1)`, with missing values as zero.
#[must_use]
pub fn quality_score(rating: Option<f64>, ratings_count: Option<u32>) -> f64 {
    let count = f64::from(ratings_count.unwrap_or(0));
    2.0 * finite_rating(rating) + (count + 1.0).log10()
}

fn compare_distance(a: &RankedResult, b: &RankedResult) -> Ordering {
    distance_key(a).cmp(&distance_key(b))
}

fn compare_composite(a: &RankedResult, b: &RankedResult) -> Ordering {
    let score_a = quality_score(a.rating, a.ratings_count);
    let score_b = quality_score(b.rating, b.ratings_count);

    distance_tier(a.distance_meters)
        .cmp(&distance_tier(b.distance_meters))
        .then_with(|| score_b.total_cmp(&score_a))
        .then_with(|| compare_distance(a, b))
}

/// Rating descending, then rating count descending, then nearest first.
///
/// This is the presentation layer's "top rated" order, applied over an
/// already ranked and truncated list.
#[must_use]
pub fn compare_rating_first(a: &RankedResult, b: &RankedResult) -> Ordering {
    finite_rating(b.rating)
        .total_cmp(&finite_rating(a.rating))
        .then_with(|| {
            b.ratings_count
                .unwrap_or(0)
                .cmp(&a.ratings_count.unwrap_or(0))
        })
        .then_with(|| compare_distance(a, b))
}

/// Orders `results` according to `strategy`.
#[must_use]
pub fn rank(mut results: Vec<RankedResult>, strategy: RankStrategy) -> Vec<RankedResult> {
    match strategy {
        RankStrategy::Distance => results.sort_by(compare_distance),
        RankStrategy::Composite => results.sort_by(compare_composite),
    }
    results
}

/// Re-sorts ranked results in place for display.
pub fn sort_for_display(results: &mut [RankedResult], order: DisplayOrder) {
    match order {
        DisplayOrder::Ranked => {}
        DisplayOrder::Rating => results.sort_by(compare_rating_first),
    }
}

#[cfg(test)]
#[path = "rank_test.rs"]
mod tests;
