//! Coordinate types and spherical distance helpers.
//!
//! Provides the geographic primitives shared by the extractor and the fit
//! calculator: coordinate triples, lat/lng pairs, great-circle distance and
//! longitude-wrapping bounding boxes.

mod bounds;
mod types;

pub use bounds::LatLngBounds;
pub use types::{Coordinate, LatLng};

/// Equatorial Earth radius in meters (WGS84 semi-major axis).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Wraps a longitude into the half-open range [-180, 180).
#[inline]
pub fn normalize_longitude(lng: f64) -> f64 {
    // In-range values pass through untouched so normalizing is idempotent
    if (-180.0..180.0).contains(&lng) {
        return lng;
    }
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

/// Computes the great-circle surface distance between two points.
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_M`].
///
/// # Arguments
///
/// * `from` - Start point in degrees
/// * `to` - End point in degrees
///
/// # Returns
///
/// The distance in meters, always non-negative.
#[inline]
pub fn great_circle_distance(from: LatLng, to: LatLng) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlng = (to.lng - from.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);

    // Rounding can push h a hair past 1.0 for antipodal points
    2.0 * h.sqrt().min(1.0).asin() * EARTH_RADIUS_M
}
