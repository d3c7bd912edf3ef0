//! Raw provider records to the final, ordered result list.
//!
//! Pipeline: dedupe by id, drop unnamed, drop chains, optionally drop
//! non-coffee names, annotate distance and deep link, rank, truncate.

use std::collections::HashSet;

use indiebrew_core::{ClassifierLists, Coordinates, RankStrategy, RankedResult, RawPlace, MAX_RESULTS};

use crate::classify::ChainClassifier;
use crate::geo::{distance_between, rounded_meters};
use crate::link::maps_link;
use crate::rank::rank;
use crate::relevance::RelevanceFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssembleOptions {
    pub strategy: RankStrategy,
    pub max_results: usize,
    /// Drop places whose name carries no coffee hint. Only worth enabling
    /// when the upstream query is not already restricted to coffee venues.
    pub require_coffee_hint: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            strategy: RankStrategy::default(),
            max_results: MAX_RESULTS,
            require_coffee_hint: false,
        }
    }
}

#[derive(Debug, Default)]
struct AssembleStats {
    received: usize,
    duplicates: usize,
    unnamed: usize,
    chains: usize,
    irrelevant: usize,
}

/// Holds the classifier and relevance filter built from one set of lists.
///
/// Build once at startup and share; [`Assembler::assemble`] takes `&self`.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    classifier: ChainClassifier,
    relevance: RelevanceFilter,
}

impl Assembler {
    #[must_use]
    pub fn new(lists: &ClassifierLists) -> Self {
        Self {
            classifier: ChainClassifier::new(lists),
            relevance: RelevanceFilter::new(lists),
        }
    }

    #[must_use]
    pub fn classifier(&self) -> &ChainClassifier {
        &self.classifier
    }

    #[must_use]
    pub fn relevance(&self) -> &RelevanceFilter {
        &self.relevance
    }

    /// Builds the ordered, de-duplicated, capped result list.
    ///
    /// `raw_places` is never modified. When `origin` is not finite no
    /// distances are computed and every result sorts as unknown distance.
    #[must_use]
    pub fn assemble(
        &self,
        raw_places: &[RawPlace],
        origin: Coordinates,
        options: &AssembleOptions,
    ) -> Vec<RankedResult> {
        let mut stats = AssembleStats {
            received: raw_places.len(),
            ..AssembleStats::default()
        };
        let origin = origin.is_finite().then_some(origin);

        let mut seen_ids: HashSet<&str> = HashSet::with_capacity(raw_places.len());
        let mut results = Vec::with_capacity(raw_places.len());

        for place in raw_places {
            // First occurrence wins, even if it is later filtered out.
            if !seen_ids.insert(place.id.as_str()) {
                stats.duplicates += 1;
                continue;
            }

            let Some(name) = place.usable_name() else {
                stats.unnamed += 1;
                continue;
            };

            if self.classifier.is_chain(name) {
                stats.chains += 1;
                continue;
            }

            if options.require_coffee_hint && !self.relevance.looks_like_coffee_venue(name) {
                stats.irrelevant += 1;
                continue;
            }

            let distance_meters = match (origin, place.location) {
                (Some(origin), Some(target)) if target.is_finite() => {
                    Some(rounded_meters(distance_between(origin, target)))
                }
                _ => None,
            };

            results.push(RankedResult {
                id: place.id.clone(),
                // Classification uses the trimmed name; results keep the source text.
                name: place.name.clone().unwrap_or_default(),
                rating: place.rating,
                ratings_count: place.ratings_count,
                address: place.address.clone(),
                open_now: place.open_now,
                location: place.location,
                distance_meters,
                external_link: maps_link(&place.id),
            });
        }

        let mut ranked = rank(results, options.strategy);
        ranked.truncate(options.max_results);

        tracing::debug!(
            received = stats.received,
            duplicates = stats.duplicates,
            unnamed = stats.unnamed,
            chains = stats.chains,
            irrelevant = stats.irrelevant,
            returned = ranked.len(),
            strategy = %options.strategy,
            "assembled nearby results"
        );

        ranked
    }
}

/// [`Assembler::assemble`] with the built-in classifier lists.
#[must_use]
pub fn assemble(
    raw_places: &[RawPlace],
    origin: Coordinates,
    options: &AssembleOptions,
) -> Vec<RankedResult> {
    Assembler::default().assemble(raw_places, origin, options)
}

#[cfg(test)]
#[path = "assemble_test.rs"]
mod tests;
