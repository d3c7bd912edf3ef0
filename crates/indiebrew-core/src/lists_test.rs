use std::path::Path;

use super::*;

fn lists(chains: &[&str], ambiguous: &[(&str, &[&str])], hints: &[&str]) -> ClassifierLists {
    let owned = |items: &[&str]| items.iter().map(|s| (*s).to_string()).collect();
    ClassifierLists {
        chains: owned(chains),
        ambiguous: ambiguous
            .iter()
            .map(|(brand, terms)| AmbiguousBrand {
                brand: (*brand).to_string(),
                corroborating: owned(terms),
            })
            .collect(),
        coffee_hints: owned(hints),
    }
}

#[test]
fn defaults_pass_validation() {
    assert!(validate_lists(&ClassifierLists::default()).is_ok());
}

#[test]
fn defaults_carry_single_ambiguous_brand() {
    let defaults = ClassifierLists::default();
    assert_eq!(defaults.ambiguous.len(), 1);
    let holiday = defaults.ambiguous_entry("Holiday").expect("holiday entry");
    assert_eq!(holiday.corroborating, vec!["station", "store", "gas"]);
}

#[test]
fn ambiguous_entry_missing_returns_none() {
    assert!(ClassifierLists::default()
        .ambiguous_entry("starbucks")
        .is_none());
}

#[test]
fn validate_rejects_empty_chains() {
    let err = validate_lists(&lists(&[], &[], &["coffee"])).unwrap_err();
    assert!(err.to_string().contains("chains list must be non-empty"));
}

#[test]
fn validate_rejects_empty_hints() {
    let err = validate_lists(&lists(&["starbucks"], &[], &[])).unwrap_err();
    assert!(err.to_string().contains("coffee_hints"));
}

#[test]
fn validate_rejects_entry_without_letters() {
    let err = validate_lists(&lists(&["starbucks", "#&!"], &[], &["coffee"])).unwrap_err();
    assert!(err.to_string().contains("no letters or digits"));
}

#[test]
fn validate_rejects_case_insensitive_duplicate() {
    let err = validate_lists(&lists(&["Wawa", "wawa "], &[], &["coffee"])).unwrap_err();
    assert!(err.to_string().contains("duplicate chains entry"));
}

#[test]
fn validate_rejects_duplicates_after_normalization() {
    let err = validate_lists(&lists(&["7-eleven", "7 eleven"], &[], &["coffee"])).unwrap_err();
    assert!(err.to_string().contains("duplicate chains entry: '7 eleven'"));

    let err = validate_lists(&lists(&["java", "coffee"], &[], &["Cold-Brew", "cold brew"]))
        .unwrap_err();
    assert!(err.to_string().contains("duplicate coffee_hints entry"));
}

#[test]
fn validate_rejects_punctuated_copy_of_ambiguous_brand() {
    let yaml = r#"
chains: [holiday, "Holiday!"]
ambiguous:
  - brand: holiday
    corroborating: [station, store, gas]
coffee_hints: [coffee]
"#;
    let parsed: ClassifierLists = serde_yaml::from_str(yaml).expect("parse");
    let err = validate_lists(&parsed).unwrap_err();
    assert!(err.to_string().contains("duplicate chains entry: 'Holiday!'"));
}

#[test]
fn ambiguous_entry_matches_on_normalized_brand() {
    let defaults = ClassifierLists::default();
    assert!(defaults.ambiguous_entry("Holiday!").is_some());
    assert!(defaults.ambiguous_entry("  HOLIDAY ").is_some());
}

#[test]
fn validate_rejects_ambiguous_brand_not_in_chains() {
    let err = validate_lists(&lists(
        &["starbucks"],
        &[("holiday", &["gas"])],
        &["coffee"],
    ))
    .unwrap_err();
    assert!(err.to_string().contains("not in the chains list"));
}

#[test]
fn validate_rejects_ambiguous_brand_without_terms() {
    let err = validate_lists(&lists(&["holiday"], &[("holiday", &[])], &["coffee"])).unwrap_err();
    assert!(err.to_string().contains("corroborating term"));
}

#[test]
fn yaml_without_ambiguous_section_parses() {
    let yaml = "chains: [starbucks]\ncoffee_hints: [coffee]\n";
    let parsed: ClassifierLists = serde_yaml::from_str(yaml).expect("parse");
    assert!(parsed.ambiguous.is_empty());
    assert!(validate_lists(&parsed).is_ok());
}

#[test]
fn load_lists_reports_missing_file() {
    let err = load_lists(Path::new("/definitely/not/here.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::ListsFileIo { .. }));
}

#[test]
fn shipped_lists_file_matches_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("classifier.yaml");
    assert!(
        path.exists(),
        "classifier.yaml missing at {path:?}, required for this test"
    );
    let loaded = load_lists(&path).expect("shipped classifier.yaml should load");
    assert_eq!(loaded, ClassifierLists::default());
}
