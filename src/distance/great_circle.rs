//! Great-circle distance provider.
//!
//! Converts raw latitude/longitude coordinates into the integer meter
//! matrix the engine consumes. Uses the haversine formula on a spherical
//! Earth with the IUGG mean radius, truncating to whole meters.

use super::DistanceMatrix;

/// IUGG mean Earth radius, in meters.
const EARTH_RADIUS_METERS: f64 = 6_371_009.0;

/// Great-circle distance between two `(lat, lng)` points, in whole meters.
///
/// # Examples
///
/// ```
/// use fleet_router::distance::great_circle_meters;
///
/// let paris = (48.8566, 2.3522);
/// let london = (51.5074, -0.1278);
/// let d = great_circle_meters(paris, london);
/// assert!(d > 330_000 && d < 350_000);
/// ```
pub fn great_circle_meters(a: (f64, f64), b: (f64, f64)) -> i64 {
    let (lat1, lng1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lng2) = (b.0.to_radians(), b.1.to_radians());

    let dlat = lat2 - lat1;
    let dlng = lng2 - lng1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let central_angle = 2.0 * h.sqrt().asin();

    (EARTH_RADIUS_METERS * central_angle) as i64
}

/// Builds the full distance matrix for a list of `(lat, lng)` coordinates.
///
/// The result has a zero diagonal and is symmetric.
pub fn matrix_from_coordinates(coordinates: &[(f64, f64)]) -> DistanceMatrix {
    let n = coordinates.len();
    let mut matrix = DistanceMatrix::new(n);
    for i in 0..n {
        for j in (i + 1)..n {
            let d = great_circle_meters(coordinates[i], coordinates[j]);
            matrix.set(i, j, d);
            matrix.set(j, i, d);
        }
    }
    matrix
}
