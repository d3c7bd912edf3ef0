//! Word lists driving chain classification and coffee relevance.
//!
//! The lists are plain data so they can be extended without touching the
//! classifier. Built-in defaults mirror `config/classifier.yaml`; a deployment
//! may point `INDIEBREW_LISTS_PATH` at its own copy.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;
use crate::ConfigError;

/// Brand substrings identifying chain or franchise outlets.
const DEFAULT_CHAINS: &[&str] = &[
    "starbucks",
    "dunkin",
    "tim hortons",
    "peet's coffee",
    "caribou coffee",
    "dutch bros",
    "biggby",
    "scooter's coffee",
    "costa coffee",
    "coffee bean & tea leaf",
    "gloria jean's",
    "second cup",
    "caffe nero",
    "tully's coffee",
    "black rifle coffee",
    "ziggi's coffee",
    "pj's coffee",
    "philz coffee",
    "krispy kreme",
    "panera",
    "mcdonald's",
    "7-eleven",
    "wawa",
    "sheetz",
    "speedway",
    "kwik trip",
    "casey's",
    "holiday",
];

/// `holiday` is both a fuel-station chain and an ordinary word in
/// independent names ("Holiday Coffee House").
const DEFAULT_AMBIGUOUS: &[(&str, &[&str])] = &[("holiday", &["station", "store", "gas"])];

/// `caf` covers cafe, caffe and café (the accent normalizes to a space).
const DEFAULT_COFFEE_HINTS: &[&str] = &[
    "coffee",
    "espresso",
    "caf",
    "roast",
    "cold brew",
    "brew",
    "latte",
    "cappuccino",
    "barista",
    "java",
    "kaffee",
    "koffie",
];

/// A listed brand that also appears in independent business names.
///
/// A match on `brand` alone only counts as a chain when one of the
/// `corroborating` terms is present too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbiguousBrand {
    pub brand: String,
    pub corroborating: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierLists {
    pub chains: Vec<String>,
    #[serde(default)]
    pub ambiguous: Vec<AmbiguousBrand>,
    pub coffee_hints: Vec<String>,
}

impl Default for ClassifierLists {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| (*s).to_string()).collect();
        Self {
            chains: owned(DEFAULT_CHAINS),
            ambiguous: DEFAULT_AMBIGUOUS
                .iter()
                .map(|(brand, terms)| AmbiguousBrand {
                    brand: (*brand).to_string(),
                    corroborating: owned(terms),
                })
                .collect(),
            coffee_hints: owned(DEFAULT_COFFEE_HINTS),
        }
    }
}

impl ClassifierLists {
    /// Returns the ambiguous-brand entry whose brand normalizes to the same
    /// text as `brand`.
    #[must_use]
    pub fn ambiguous_entry(&self, brand: &str) -> Option<&AmbiguousBrand> {
        let key = list_key(brand);
        self.ambiguous.iter().find(|a| list_key(&a.brand) == key)
    }
}

/// Load and validate classifier lists from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_lists(path: &Path) -> Result<ClassifierLists, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ListsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let lists: ClassifierLists =
        serde_yaml::from_str(&content).map_err(ConfigError::ListsFileParse)?;

    validate_lists(&lists)?;

    Ok(lists)
}

/// Entries are compared in the same normalized form the classifier matches
/// on, so `"7-Eleven"` and `"7 eleven"` are the same entry.
fn list_key(entry: &str) -> String {
    normalize(entry)
}

fn validate_entries(list_name: &str, entries: &[String]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for entry in entries {
        let key = list_key(entry);
        // An empty key is a substring of every name.
        if key.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{list_name} entry '{entry}' has no letters or digits"
            )));
        }
        if !seen.insert(key) {
            return Err(ConfigError::Validation(format!(
                "duplicate {list_name} entry: '{entry}'"
            )));
        }
    }
    Ok(())
}

fn validate_lists(lists: &ClassifierLists) -> Result<(), ConfigError> {
    if lists.chains.is_empty() {
        return Err(ConfigError::Validation(
            "chains list must be non-empty".to_string(),
        ));
    }
    if lists.coffee_hints.is_empty() {
        return Err(ConfigError::Validation(
            "coffee_hints list must be non-empty".to_string(),
        ));
    }

    validate_entries("chains", &lists.chains)?;
    validate_entries("coffee_hints", &lists.coffee_hints)?;

    let chain_keys: HashSet<String> = lists.chains.iter().map(|c| list_key(c)).collect();
    let mut seen_ambiguous = HashSet::new();
    for entry in &lists.ambiguous {
        let key = list_key(&entry.brand);
        if !chain_keys.contains(&key) {
            return Err(ConfigError::Validation(format!(
                "ambiguous brand '{}' is not in the chains list",
                entry.brand
            )));
        }
        if !seen_ambiguous.insert(key) {
            return Err(ConfigError::Validation(format!(
                "duplicate ambiguous brand: '{}'",
                entry.brand
            )));
        }
        if entry.corroborating.is_empty() {
            return Err(ConfigError::Validation(format!(
                "ambiguous brand '{}' needs at least one corroborating term",
                entry.brand
            )));
        }
        validate_entries("corroborating", &entry.corroborating)?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "lists_test.rs"]
mod tests;
