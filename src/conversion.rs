use nalgebra::Vector3;

use crate::constants::{Degree, Meter, WGS84_A, WGS84_E2};

/// Prime vertical radius of curvature `N(φ) = a / sqrt(1 - e²·sin²φ)`.
///
/// Arguments
/// ---------
/// * `sin_lat`: sine of the geodetic latitude
///
/// Return
/// ------
/// * the radius in meters
#[inline]
pub fn prime_vertical_radius(sin_lat: f64) -> Meter {
    WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt()
}

/// Convert a geodetic position to the Earth-fixed Cartesian frame (ECEF) of the
/// WGS84 ellipsoid.
///
/// ```text
/// x = (N + h)·cosφ·cosλ
/// y = (N + h)·cosφ·sinλ
/// z = (N·(1 - e²) + h)·sinφ
/// ```
///
/// Inputs are not validated: a latitude outside `[-90, 90]` produces whatever
/// IEEE result the formula yields.
///
/// Arguments
/// ---------
/// * `lat`: geodetic latitude in degrees
/// * `lon`: longitude in degrees (east positive)
/// * `height`: height above the ellipsoid in meters
///
/// Return
/// ------
/// * the ECEF position in meters
#[inline]
pub fn geodetic_to_ecef(lat: Degree, lon: Degree, height: Meter) -> Vector3<f64> {
    let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
    let (sin_lon, cos_lon) = lon.to_radians().sin_cos();
    let n = prime_vertical_radius(sin_lat);

    Vector3::new(
        (n + height) * cos_lat * cos_lon,
        (n + height) * cos_lat * sin_lon,
        (n * (1.0 - WGS84_E2) + height) * sin_lat,
    )
}

/// Batched [`geodetic_to_ecef`] over parallel arrays.
///
/// Every point goes through the scalar conversion, so the output is
/// bit-identical to calling [`geodetic_to_ecef`] in a loop. The three slices are
/// zipped: extra entries in a longer slice are ignored.
///
/// Return
/// ------
/// * a flat `[x0, y0, z0, x1, y1, z1, ...]` vector
pub fn geodetic_to_ecef_batch(lats: &[Degree], lons: &[Degree], heights: &[Meter]) -> Vec<f64> {
    let mut ecef = Vec::with_capacity(3 * lats.len().min(lons.len()).min(heights.len()));
    for ((&lat, &lon), &h) in lats.iter().zip(lons).zip(heights) {
        ecef.extend_from_slice(geodetic_to_ecef(lat, lon, h).as_slice());
    }
    ecef
}
