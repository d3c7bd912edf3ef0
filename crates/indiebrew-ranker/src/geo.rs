//! Great-circle distance between two coordinates.

use indiebrew_core::Coordinates;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in metres between two points given in decimal degrees.
///
/// Symmetric, never negative, and exactly zero for identical points.
#[must_use]
pub fn distance_meters(origin_lat: f64, origin_lng: f64, target_lat: f64, target_lng: f64) -> f64 {
    let phi1 = origin_lat.to_radians();
    let phi2 = target_lat.to_radians();
    let d_phi = (target_lat - origin_lat).to_radians();
    let d_lambda = (target_lng - origin_lng).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Floating-point error can push `a` slightly past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// [`distance_meters`] over two [`Coordinates`].
#[must_use]
pub fn distance_between(origin: Coordinates, target: Coordinates) -> f64 {
    distance_meters(origin.lat, origin.lng, target.lat, target.lng)
}

/// Rounds a distance to whole metres for display.
///
/// No distance on Earth's surface comes near `u32::MAX` metres; out-of-range
/// or non-finite input saturates.
#[must_use]
pub fn rounded_meters(distance: f64) -> u32 {
    if !distance.is_finite() {
        return u32::MAX;
    }
    // Clamped to the u32 range first, so the cast cannot wrap.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = distance.round().clamp(0.0, f64::from(u32::MAX)) as u32;
    rounded
}
