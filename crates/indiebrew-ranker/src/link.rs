//! Maps deep links for ranked places.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";

/// Everything except RFC 3986 unreserved characters is escaped.
const PLACE_ID: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Builds the maps search link for a provider place id.
#[must_use]
pub fn maps_link(place_id: &str) -> String {
    format!(
        "{MAPS_SEARCH_URL}?api=1&query=coffee&query_place_id={}",
        utf8_percent_encode(place_id, PLACE_ID)
    )
}
