use indiebrew_core::AmbiguousBrand;

use super::*;

fn classifier() -> ChainClassifier {
    ChainClassifier::default()
}

// -----------------------------------------------------------------------
// Known brands
// -----------------------------------------------------------------------

#[test]
fn known_brand_with_outlet_number() {
    assert_eq!(
        classifier().classify("Starbucks #4021"),
        ChainVerdict::KnownBrand("starbucks".to_string())
    );
    assert!(classifier().is_chain("Starbucks #4021"));
}

#[test]
fn known_brand_matches_after_punctuation_normalization() {
    let c = classifier();
    assert!(c.is_chain("Peet's Coffee & Tea"));
    assert!(c.is_chain("7-Eleven"));
    assert!(c.is_chain("DUNKIN'"));
    assert!(c.is_chain("The Coffee Bean & Tea Leaf"));
}

#[test]
fn known_brand_matches_as_substring() {
    assert!(classifier().is_chain("Starbucks Reserve Roastery"));
}

// -----------------------------------------------------------------------
// Ambiguous brand
// -----------------------------------------------------------------------

#[test]
fn ambiguous_brand_without_corroboration_is_independent() {
    let verdict = classifier().classify("Holiday Coffee House");
    assert_eq!(
        verdict,
        ChainVerdict::AmbiguousUncorroborated("holiday".to_string())
    );
    assert!(!verdict.is_chain());
}

#[test]
fn ambiguous_brand_with_corroboration_is_chain() {
    let verdict = classifier().classify("Holiday Station Store #12");
    assert_eq!(
        verdict,
        ChainVerdict::CorroboratedBrand {
            brand: "holiday".to_string(),
            term: "station".to_string(),
        }
    );
    assert!(verdict.is_chain());
}

#[test]
fn ambiguous_brand_corroborated_by_gas() {
    assert!(classifier().is_chain("Holiday Gas & Go"));
}

#[test]
fn ambiguous_brand_match_skips_structural_heuristics() {
    // The brand matched, so the numbered-outlet rule is not consulted.
    assert!(!classifier().is_chain("Holiday Cafe #12"));
}

#[test]
fn unambiguous_brand_overrides_uncorroborated_ambiguous_brand() {
    assert_eq!(
        classifier().classify("Holiday Inn Starbucks"),
        ChainVerdict::KnownBrand("starbucks".to_string())
    );
}

#[test]
fn per_brand_corroboration_terms_are_respected() {
    let lists = ClassifierLists {
        chains: vec!["holiday".to_string(), "summit".to_string()],
        ambiguous: vec![
            AmbiguousBrand {
                brand: "holiday".to_string(),
                corroborating: vec!["gas".to_string()],
            },
            AmbiguousBrand {
                brand: "Summit".to_string(),
                corroborating: vec!["travel center".to_string()],
            },
        ],
        coffee_hints: vec!["coffee".to_string()],
    };
    let c = ChainClassifier::new(&lists);
    assert!(!c.is_chain("Summit Gas Coffee"));
    assert!(c.is_chain("Summit Travel-Center"));
    assert!(c.is_chain("Holiday Gas"));
    assert!(!c.is_chain("Holiday Travel Center"));
}

#[test]
fn punctuated_brand_spelling_stays_ambiguous() {
    // Unvalidated lists can still spell the brand two ways; both resolve to
    // the same ambiguous entry.
    let lists = ClassifierLists {
        chains: vec!["holiday".to_string(), "Holiday!".to_string()],
        ambiguous: vec![AmbiguousBrand {
            brand: "holiday".to_string(),
            corroborating: vec!["station".to_string()],
        }],
        coffee_hints: vec!["coffee".to_string()],
    };
    let c = ChainClassifier::new(&lists);
    assert!(!c.is_chain("Holiday Coffee House"));
    assert!(c.is_chain("Holiday Station"));
}

// -----------------------------------------------------------------------
// Structural heuristics
// -----------------------------------------------------------------------

#[test]
fn hash_number_outlet_is_chain() {
    assert_eq!(
        classifier().classify("Joe's Store #34"),
        ChainVerdict::NumberedOutlet
    );
    assert!(classifier().is_chain("Roast Co. # 101"));
}

#[test]
fn single_digit_hash_number_is_not_chain() {
    assert!(!classifier().is_chain("Coffee Shop #1"));
}

#[test]
fn spaced_hash_needs_two_digits() {
    let c = classifier();
    assert!(!c.is_chain("Coffee Shop # 7"));
    assert!(!c.is_chain("Coffee Shop #\t7"));
    assert!(c.is_chain("Bean Bar #\t42"));
    assert!(c.is_chain("Bean Bar #  42"));
}

#[test]
fn store_word_with_standalone_number_is_chain() {
    assert!(classifier().is_chain("Bean Store 112"));
    assert!(classifier().is_chain("Espresso Bar Location 07"));
}

#[test]
fn store_word_requires_two_digit_number() {
    assert!(!classifier().is_chain("Store 1 Espresso"));
    assert!(!classifier().is_chain("Location 5 Coffee"));
}

#[test]
fn number_without_store_word_is_not_chain() {
    assert!(!classifier().is_chain("Roastery 2000"));
}

#[test]
fn store_must_be_a_whole_word() {
    assert!(!classifier().is_chain("Restore 45 Cafe"));
}

#[test]
fn number_must_be_standalone() {
    assert!(!classifier().is_chain("Store 42b Espresso"));
}

// -----------------------------------------------------------------------
// Independents and purity
// -----------------------------------------------------------------------

#[test]
fn plain_independent_name() {
    assert_eq!(
        classifier().classify("Joe's Coffee"),
        ChainVerdict::Independent
    );
}

#[test]
fn empty_and_symbol_names_are_independent() {
    assert!(!classifier().is_chain(""));
    assert!(!classifier().is_chain("!!!"));
}

#[test]
fn classification_is_independent_of_call_order() {
    let c = classifier();
    let names = [
        "Starbucks #4021",
        "Holiday Coffee House",
        "Joe's Store #34",
        "Joe's Coffee",
    ];
    let forward: Vec<bool> = names.iter().map(|n| c.is_chain(n)).collect();
    let mut backward: Vec<bool> = names.iter().rev().map(|n| c.is_chain(n)).collect();
    backward.reverse();
    assert_eq!(forward, backward);
    assert_eq!(forward, vec![true, false, true, false]);
}

#[test]
fn verdict_reasons() {
    assert_eq!(ChainVerdict::NumberedOutlet.reason(), "numbered_outlet");
    assert_eq!(ChainVerdict::Independent.reason(), "independent");
    assert_eq!(
        ChainVerdict::KnownBrand("x".to_string()).reason(),
        "known_brand"
    );
}
