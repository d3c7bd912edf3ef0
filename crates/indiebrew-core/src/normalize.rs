//! Canonical form of free-text business names.

/// Normalizes `text` for substring comparison.
///
/// Lower-cases, replaces anything other than `a-z`, `0-9` and whitespace with
/// a space, then collapses whitespace runs and trims. Idempotent.
#[must_use]
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
