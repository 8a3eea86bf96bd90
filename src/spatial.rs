//! Geodesic primitives shared by every pipeline stage.

use crate::error::{CoverplanError, Result};
use crate::types::Site;
use geo::{Point, Rect, coord};

/// Earth radius in meters for haversine distance calculations
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two points in meters, by the haversine
/// formula on a sphere of radius [`EARTH_RADIUS_METERS`].
///
/// Pure and deterministic. Inputs are decimal-degree lon/lat points
/// (`x = longitude`, `y = latitude`); coordinates are not range-checked
/// here — out-of-range values yield a finite but meaningless distance.
/// Use [`validate_site`] at the input boundary instead.
///
/// # Examples
///
/// ```rust
/// use coverplan::spatial::haversine_distance;
/// use geo::Point;
///
/// let nyc = Point::new(-74.0060, 40.7128);
/// let la = Point::new(-118.2437, 34.0522);
/// let dist = haversine_distance(&nyc, &la);
/// assert!(dist > 3_900_000.0 && dist < 4_000_000.0); // ~3,936 km
/// ```
pub fn haversine_distance(p1: &Point, p2: &Point) -> f64 {
    let lat1_rad = p1.y().to_radians();
    let lat2_rad = p2.y().to_radians();
    let delta_lat = (p2.y() - p1.y()).to_radians();
    let delta_lon = (p2.x() - p1.x()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Bounding box guaranteed to contain the disk of `radius_meters` around
/// `center`, in degrees.
///
/// Used as a cheap prefilter in front of the exact haversine test.
///
/// # Algorithm
///
/// - Latitude: linear expansion (1° ≈ 111 km everywhere), clamped to ±90°
/// - Longitude: cosine-corrected expansion using the latitude closest to the
///   pole, clamped at 89.9° to avoid extreme values near the poles
///
/// # Limitations
///
/// Does NOT handle date line (180°/-180°) wrapping; the resulting longitude
/// range may exceed ±180° for large radii or polar centers. That only makes
/// the prefilter more permissive, never less, so exactness is preserved by
/// the distance check that follows.
pub fn radius_envelope(center: &Point, radius_meters: f64) -> Rect {
    // 1 degree of latitude is approximately 111km everywhere
    let lat_offset = radius_meters / 111_000.0;

    let min_y = (center.y() - lat_offset).max(-90.0);
    let max_y = (center.y() + lat_offset).min(90.0);

    // Longitude expansion depends on latitude; use the latitude closest to
    // the pole so the envelope never undershoots the disk.
    let max_abs_lat = min_y.abs().max(max_y.abs());
    let calc_lat = max_abs_lat.min(89.9);
    let lon_offset = radius_meters / (111_000.0 * calc_lat.to_radians().cos());

    Rect::new(
        coord! {
            x: center.x() - lon_offset,
            y: min_y
        },
        coord! {
            x: center.x() + lon_offset,
            y: max_y
        },
    )
}

/// Validates that a site has finite, in-range coordinates.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```rust
/// use coverplan::{Site, spatial::validate_site};
///
/// let nyc = Site::new("nyc", 40.7128, -74.0060);
/// assert!(validate_site(&nyc).is_ok());
///
/// let bad = Site::new("bad", 95.0, -74.0);
/// assert!(validate_site(&bad).is_err());
/// ```
pub fn validate_site(site: &Site) -> Result<()> {
    if !site.lng.is_finite() {
        return Err(CoverplanError::InvalidInput(format!(
            "site '{}': longitude must be finite, got: {}",
            site.id, site.lng
        )));
    }

    if !site.lat.is_finite() {
        return Err(CoverplanError::InvalidInput(format!(
            "site '{}': latitude must be finite, got: {}",
            site.id, site.lat
        )));
    }

    if !(-180.0..=180.0).contains(&site.lng) {
        return Err(CoverplanError::InvalidInput(format!(
            "site '{}': longitude out of range [-180.0, 180.0]: {}",
            site.id, site.lng
        )));
    }

    if !(-90.0..=90.0).contains(&site.lat) {
        return Err(CoverplanError::InvalidInput(format!(
            "site '{}': latitude out of range [-90.0, 90.0]: {}",
            site.id, site.lat
        )));
    }

    Ok(())
}
