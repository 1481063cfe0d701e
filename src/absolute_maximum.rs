//! # Time-independent maximum height
//!
//! As the Earth turns, the ecliptic pole traces a circle of polar angle ε in
//! the Earth-fixed frame (see [`crate::direction`]). For a fixed surface point
//! `p = (x, y, z)` the projection `p · e(θ)` is therefore maximized over θ in
//! closed form:
//!
//! ```text
//! h_max = sinε · √(x² + y²) ± cosε · z        (+ north, − south)
//! θ*    = atan2(−x, −y)   north
//! θ*    = atan2( x,  y)   south
//! ```
//!
//! [`find_absolute_maximum`] evaluates `h_max` once per grid cell instead of
//! sweeping every instant of a sidereal day, and reports how much higher the
//! winning cell gets than anything the bare ellipsoid can reach.
//!
//! The closed form assumes the fixed J2000 obliquity.

use std::fmt;

use itertools::Itertools;
use nalgebra::Vector3;
use serde::Serialize;
use tracing::info;

use crate::constants::{Degree, Kilometer, Meter, Radian, OBLIQUITY_J2000_DEG};
use crate::conversion::geodetic_to_ecef;
use crate::elevation::ElevationGrid;
use crate::hemisphere::Hemisphere;
use crate::peaks::identify_peak;
use crate::time::normalize_angle;

/// Latitude resolution of the bare-ellipsoid baseline sweep, in degrees.
pub const ELLIPSOID_SWEEP_STEP: Degree = 0.01;

/// Highest reachable point of a grid, over every possible instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AbsoluteMaximumResult {
    pub latitude: Degree,
    pub longitude: Degree,
    /// Stored (unclamped) elevation of the cell.
    pub elevation: Meter,
    pub height_km: Kilometer,
    /// Sidereal angle at which the maximum occurs, in `[0, 2π)`.
    pub angle: Radian,
    /// Best height reachable on the bare ellipsoid.
    pub ellipsoid_height_km: Kilometer,
    /// `height − ellipsoid height`, in meters.
    pub advantage: Meter,
    pub peak_name: Option<&'static str>,
    pub index: usize,
}

#[inline]
fn h_max(x: f64, y: f64, z: f64, sin_e: f64, cos_e: f64, z_sign: f64) -> Meter {
    sin_e * x.hypot(y) + z_sign * cos_e * z
}

fn obliquity_sin_cos() -> (f64, f64) {
    OBLIQUITY_J2000_DEG.to_radians().sin_cos()
}

/// Closed-form maximum of `position · e(θ)` over all sidereal angles θ.
pub fn closed_form_height(position: &Vector3<f64>, hemisphere: Hemisphere) -> Meter {
    let (sin_e, cos_e) = obliquity_sin_cos();
    h_max(
        position.x,
        position.y,
        position.z,
        sin_e,
        cos_e,
        hemisphere.z_sign(),
    )
}

/// Sidereal angle at which `position` reaches its closed-form maximum,
/// normalized to `[0, 2π)`.
///
/// Undefined on the rotation axis (x = y = 0), where every angle gives the
/// same height; `atan2(0, 0)` then yields 0.
pub fn maximizing_angle(position: &Vector3<f64>, hemisphere: Hemisphere) -> Radian {
    let angle = match hemisphere {
        Hemisphere::North => (-position.x).atan2(-position.y),
        Hemisphere::South => position.x.atan2(position.y),
    };
    normalize_angle(angle)
}

/// Latitude sweep of the bare ellipsoid over the hemisphere's optimum band.
///
/// `h_max` does not depend on longitude, so a single meridian is enough.
///
/// Return
/// ------
/// * `(latitude, h_max)` of the best sample; the first one wins on ties
pub fn sweep_ellipsoid_latitude(hemisphere: Hemisphere, step: Degree) -> (Degree, Meter) {
    let (sin_e, cos_e) = obliquity_sin_cos();
    let z_sign = hemisphere.z_sign();
    let (start, end) = hemisphere.optimum_band();
    let count = if step.is_finite() && step > 0.0 {
        ((end - start) / step).abs().round() as usize
    } else {
        0
    };
    let direction = (end - start).signum();

    let mut best = (start, f64::NEG_INFINITY);
    for i in 0..=count {
        let lat = start + direction * i as f64 * step;
        let p = geodetic_to_ecef(lat, 0.0, 0.0);
        let h = h_max(p.x, p.y, p.z, sin_e, cos_e, z_sign);
        if h > best.1 {
            best = (lat, h);
        }
    }
    best
}

/// Best bare-ellipsoid latitude and height at [`ELLIPSOID_SWEEP_STEP`].
pub fn ellipsoid_optimum(hemisphere: Hemisphere) -> (Degree, Meter) {
    sweep_ellipsoid_latitude(hemisphere, ELLIPSOID_SWEEP_STEP)
}

/// Closed-form height of every cell, in storage order.
fn cell_heights(
    grid: &ElevationGrid,
    hemisphere: Hemisphere,
) -> impl Iterator<Item = Meter> + '_ {
    let (sin_e, cos_e) = obliquity_sin_cos();
    let z_sign = hemisphere.z_sign();
    grid.ecef()
        .chunks_exact(3)
        .map(move |p| h_max(p[0], p[1], p[2], sin_e, cos_e, z_sign))
}

/// Best height reachable by cells at or below sea level.
///
/// Falls back to [`ellipsoid_optimum`] when every cell of the grid is land.
/// That sweep covers the hemisphere's optimum band, not the grid's own band;
/// both contain the optimal latitude, so the height is the same.
pub fn ellipsoid_baseline(grid: &ElevationGrid, hemisphere: Hemisphere) -> Meter {
    let sea_level_best = cell_heights(grid, hemisphere)
        .zip(grid.elevations())
        .filter(|&(_, &elevation)| elevation <= 0)
        .map(|(h, _)| h)
        .fold(None, |best: Option<Meter>, h| match best {
            Some(b) if b >= h => Some(b),
            _ => Some(h),
        });

    sea_level_best.unwrap_or_else(|| ellipsoid_optimum(hemisphere).1)
}

fn describe(
    grid: &ElevationGrid,
    hemisphere: Hemisphere,
    index: usize,
    height: Meter,
    baseline: Meter,
) -> AbsoluteMaximumResult {
    let latitude = grid.latitudes()[index];
    let longitude = grid.longitudes()[index];
    AbsoluteMaximumResult {
        latitude,
        longitude,
        elevation: grid.elevations()[index] as Meter,
        height_km: height / 1000.0,
        angle: maximizing_angle(&grid.position(index), hemisphere),
        ellipsoid_height_km: baseline / 1000.0,
        advantage: height - baseline,
        peak_name: identify_peak(hemisphere, latitude, longitude),
        index,
    }
}

/// Find the cell reaching the greatest height above (north) or below
/// (south) the ecliptic plane at any instant.
///
/// Two passes over the grid:
/// 1. the ellipsoid baseline, see [`ellipsoid_baseline`],
/// 2. the global closed-form maximum over every cell (first index wins ties).
///
/// Arguments
/// ---------
/// * `grid`: topographic or analytic grid
/// * `hemisphere`: which side of the plane
///
/// Return
/// ------
/// * `None` for an empty grid
pub fn find_absolute_maximum(
    grid: &ElevationGrid,
    hemisphere: Hemisphere,
) -> Option<AbsoluteMaximumResult> {
    let baseline = ellipsoid_baseline(grid, hemisphere);

    let mut best_index = None;
    let mut best_height = f64::NEG_INFINITY;
    for (i, h) in cell_heights(grid, hemisphere).enumerate() {
        if h > best_height {
            best_height = h;
            best_index = Some(i);
        }
    }

    let result = describe(grid, hemisphere, best_index?, best_height, baseline);
    info!(
        %hemisphere,
        lat = result.latitude,
        lon = result.longitude,
        elevation = result.elevation,
        height_km = result.height_km,
        angle_deg = result.angle.to_degrees(),
        advantage_m = result.advantage,
        peak = result.peak_name.unwrap_or("-"),
        "absolute maximum"
    );
    Some(result)
}

/// The `n` cells with the greatest closed-form height, highest first.
///
/// Equal heights keep storage order.
pub fn top_candidates(
    grid: &ElevationGrid,
    hemisphere: Hemisphere,
    n: usize,
) -> Vec<AbsoluteMaximumResult> {
    let baseline = ellipsoid_baseline(grid, hemisphere);
    cell_heights(grid, hemisphere)
        .enumerate()
        .sorted_by(|(_, h1), (_, h2)| h2.total_cmp(h1))
        .take(n)
        .map(|(i, h)| describe(grid, hemisphere, i, h, baseline))
        .collect()
}

impl fmt::Display for AbsoluteMaximumResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat_dir = if self.latitude < 0.0 { 'S' } else { 'N' };
        let lon_dir = if self.longitude < 0.0 { 'W' } else { 'E' };
        let rows = [
            (
                "Location",
                format!(
                    "{:.4}°{} {:.4}°{}",
                    self.latitude.abs(),
                    lat_dir,
                    self.longitude.abs(),
                    lon_dir
                ),
            ),
            ("Peak", self.peak_name.unwrap_or("-").to_string()),
            ("Elevation", format!("{:.0} m", self.elevation)),
            ("Height", format!("{:.3} km", self.height_km)),
            ("Ellipsoid best", format!("{:.3} km", self.ellipsoid_height_km)),
            ("Advantage", format!("{:+.1} m", self.advantage)),
            ("Sidereal angle", format!("{:.3}°", self.angle.to_degrees())),
        ];

        writeln!(f, "+----------------+------------------------+")?;
        for (label, value) in rows {
            writeln!(f, "| {label:<14} | {value:>22} |")?;
        }
        writeln!(f, "+----------------+------------------------+")
    }
}
