//! Chain and franchise detection from business names.
//!
//! A name is a chain when it contains a listed brand, subject to the
//! ambiguous-brand rule, or when it follows a numbered-outlet naming pattern
//! such as `"#4021"` or `"Store 112"`.

use std::sync::LazyLock;

use indiebrew_core::{normalize, ClassifierLists};
use regex::Regex;

/// `#` followed by a number of two or more digits. Matched against the raw
/// name because normalization removes `#`.
static OUTLET_HASH_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\s*[0-9]{2,}").expect("valid regex"));

static OUTLET_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:store|location)\b").expect("valid regex"));

static STANDALONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]{2,}\b").expect("valid regex"));

/// Why a name was or was not classified as a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainVerdict {
    /// Contains an unambiguous listed brand.
    KnownBrand(String),
    /// Contains an ambiguous brand together with one of its corroborating terms.
    CorroboratedBrand { brand: String, term: String },
    /// Contains only ambiguous brands, none of them corroborated.
    AmbiguousUncorroborated(String),
    /// No brand matched, but the name follows a numbered-outlet pattern.
    NumberedOutlet,
    Independent,
}

impl ChainVerdict {
    #[must_use]
    pub fn is_chain(&self) -> bool {
        matches!(
            self,
            ChainVerdict::KnownBrand(_)
                | ChainVerdict::CorroboratedBrand { .. }
                | ChainVerdict::NumberedOutlet
        )
    }

    /// Short machine-readable label, used in CLI output and logs.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            ChainVerdict::KnownBrand(_) => "known_brand",
            ChainVerdict::CorroboratedBrand { .. } => "corroborated_brand",
            ChainVerdict::AmbiguousUncorroborated(_) => "ambiguous_uncorroborated",
            ChainVerdict::NumberedOutlet => "numbered_outlet",
            ChainVerdict::Independent => "independent",
        }
    }
}

#[derive(Debug, Clone)]
struct BrandPattern {
    /// Brand as written in the lists, for reporting.
    label: String,
    /// Normalized brand text matched as a substring.
    needle: String,
    /// Normalized corroborating terms; `Some` only for ambiguous brands.
    corroborating: Option<Vec<String>>,
}

/// Classifies business names as chain outlets or independents.
///
/// Brand and corroborating terms are normalized once at construction.
#[derive(Debug, Clone)]
pub struct ChainClassifier {
    brands: Vec<BrandPattern>,
}

impl Default for ChainClassifier {
    fn default() -> Self {
        Self::new(&ClassifierLists::default())
    }
}

impl ChainClassifier {
    #[must_use]
    pub fn new(lists: &ClassifierLists) -> Self {
        let brands = lists
            .chains
            .iter()
            .filter_map(|brand| {
                let needle = normalize(brand);
                if needle.is_empty() {
                    return None;
                }
                let corroborating = lists.ambiguous_entry(brand).map(|entry| {
                    entry
                        .corroborating
                        .iter()
                        .map(|term| normalize(term))
                        .filter(|term| !term.is_empty())
                        .collect()
                });
                Some(BrandPattern {
                    label: brand.clone(),
                    needle,
                    corroborating,
                })
            })
            .collect();

        Self { brands }
    }

    /// Returns `true` when `name` denotes a chain or franchise outlet.
    #[must_use]
    pub fn is_chain(&self, name: &str) -> bool {
        self.classify(name).is_chain()
    }

    /// Classifies `name` and reports which rule decided it.
    #[must_use]
    pub fn classify(&self, name: &str) -> ChainVerdict {
        let normalized = normalize(name);

        let mut corroborated: Option<(&BrandPattern, &str)> = None;
        let mut uncorroborated: Option<&BrandPattern> = None;

        for brand in &self.brands {
            if !normalized.contains(brand.needle.as_str()) {
                continue;
            }
            let Some(terms) = &brand.corroborating else {
                return ChainVerdict::KnownBrand(brand.label.clone());
            };
            match terms.iter().find(|term| normalized.contains(term.as_str())) {
                Some(term) => {
                    corroborated.get_or_insert((brand, term.as_str()));
                }
                None => {
                    uncorroborated.get_or_insert(brand);
                }
            }
        }

        if let Some((brand, term)) = corroborated {
            return ChainVerdict::CorroboratedBrand {
                brand: brand.label.clone(),
                term: term.to_string(),
            };
        }
        if let Some(brand) = uncorroborated {
            return ChainVerdict::AmbiguousUncorroborated(brand.label.clone());
        }

        if is_numbered_outlet(name, &normalized) {
            ChainVerdict::NumberedOutlet
        } else {
            ChainVerdict::Independent
        }
    }
}

fn is_numbered_outlet(name: &str, normalized: &str) -> bool {
    if OUTLET_HASH_NUMBER.is_match(name) {
        return true;
    }
    OUTLET_WORD.is_match(normalized) && STANDALONE_NUMBER.is_match(normalized)
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
