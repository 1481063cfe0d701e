//! # Apex track over one sidereal rotation
//!
//! A track is the ordered list of apex positions as the Earth makes one full
//! turn. Three sources produce the same [`TrackSample`] shape:
//!
//! - [`load_track`] / [`parse_track`] – a precomputed `track_*.bin` file,
//! - [`compute_ellipsoid_track`] – the analytic loop at the optimal
//!   bare-ellipsoid latitude, used when topography is off or missing,
//! - [`compute_apex_track`] – a sweep of a topographic grid, which is how the
//!   precomputed files are produced.
//!
//! Track file layout (little-endian):
//!
//! ```text
//! offset  size    field
//!      0     4    count (i32)
//!      4  12·n    count × (latitude f32, longitude f32, elevation f32)
//! ```

use std::fs;

use camino::Utf8Path;
use nom::{
    multi::count,
    number::complete::{le_f32, le_i32},
    sequence::tuple,
    IResult,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::absolute_maximum::sweep_ellipsoid_latitude;
use crate::apex_errors::ApexError;
use crate::constants::{Degree, Meter, DPI, OBLIQUITY_J2000_DEG};
use crate::direction::pole_direction_at_angle;
use crate::elevation::ElevationGrid;
use crate::hemisphere::Hemisphere;

/// Samples per rotation of the precomputed tracks (0.05° of sidereal angle).
pub const DEFAULT_TRACK_SAMPLES: usize = 7200;

/// Latitude resolution of the optimal-latitude scan, in degrees.
pub const OPTIMAL_LATITUDE_STEP: Degree = 0.001;

/// Half-width of the longitude window scanned around the pole's meridian.
pub const TRACK_WINDOW_DEG: Degree = 15.0;

const TRACK_RECORD_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackSample {
    pub latitude: Degree,
    pub longitude: Degree,
    pub elevation: Meter,
}

fn parse_record(input: &[u8]) -> IResult<&[u8], TrackSample> {
    let (input, (latitude, longitude, elevation)) = tuple((le_f32, le_f32, le_f32))(input)?;
    Ok((
        input,
        TrackSample {
            latitude: latitude as f64,
            longitude: longitude as f64,
            elevation: elevation as f64,
        },
    ))
}

/// Decode a track from its binary representation.
///
/// Errors
/// ------
/// * [`ApexError::TrackParsingError`] for a truncated count or a negative one
/// * [`ApexError::TrackSizeMismatch`] if the payload does not hold `count`
///   whole records
pub fn parse_track(bytes: &[u8]) -> Result<Vec<TrackSample>, ApexError> {
    let (payload, declared) = le_i32::<_, nom::error::Error<&[u8]>>(bytes)
        .map_err(|e| ApexError::TrackParsingError(e.to_string()))?;

    let expected = usize::try_from(declared)
        .map_err(|_| ApexError::TrackParsingError(format!("negative record count {declared}")))?;

    if payload.len() != expected * TRACK_RECORD_LEN {
        return Err(ApexError::TrackSizeMismatch {
            expected,
            actual: payload.len() / TRACK_RECORD_LEN,
        });
    }

    let (_, samples) = count(parse_record, expected)(payload)
        .map_err(|e| ApexError::TrackParsingError(e.to_string()))?;
    Ok(samples)
}

pub fn load_track(path: &Utf8Path) -> Result<Vec<TrackSample>, ApexError> {
    let bytes = fs::read(path)?;
    parse_track(&bytes)
}

/// Encode a track in the layout read by [`parse_track`]. Values are narrowed to `f32`.
pub fn encode_track(samples: &[TrackSample]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + TRACK_RECORD_LEN * samples.len());
    out.extend_from_slice(&(samples.len() as i32).to_le_bytes());
    for s in samples {
        for value in [s.latitude, s.longitude, s.elevation] {
            out.extend_from_slice(&(value as f32).to_le_bytes());
        }
    }
    out
}

pub fn write_track(path: &Utf8Path, samples: &[TrackSample]) -> Result<(), ApexError> {
    fs::write(path, encode_track(samples))?;
    Ok(())
}

/// Bare-ellipsoid latitude maximizing the closed-form height, scanned over
/// the optimum band at [`OPTIMAL_LATITUDE_STEP`].
pub fn optimal_ellipsoid_latitude(hemisphere: Hemisphere) -> Degree {
    sweep_ellipsoid_latitude(hemisphere, OPTIMAL_LATITUDE_STEP).0
}

/// Sidereal angle of sample `s` out of `num_samples` per rotation.
fn sample_angle(s: usize, num_samples: usize) -> f64 {
    s as f64 / num_samples as f64 * DPI
}

/// Longitude, in degrees, of the pole's horizontal component at `angle`.
fn pole_longitude(angle: f64, hemisphere: Hemisphere) -> Degree {
    let e = pole_direction_at_angle(angle, hemisphere, OBLIQUITY_J2000_DEG.to_radians());
    e.y.atan2(e.x).to_degrees()
}

/// Analytic closed loop at the optimal ellipsoid latitude.
///
/// Emits `num_samples + 1` samples so the last one closes the loop on the
/// first. `num_samples == 0` yields an empty track.
pub fn compute_ellipsoid_track(hemisphere: Hemisphere, num_samples: usize) -> Vec<TrackSample> {
    if num_samples == 0 {
        return Vec::new();
    }
    let latitude = optimal_ellipsoid_latitude(hemisphere);
    (0..=num_samples)
        .map(|s| TrackSample {
            latitude,
            longitude: pole_longitude(sample_angle(s, num_samples), hemisphere),
            elevation: 0.0,
        })
        .collect()
}

/// Sweep a topographic grid over one rotation.
///
/// For every sample angle the apex starts at the ellipsoid optimum under the
/// pole's meridian. Only land cells (elevation > 0) of the columns within
/// [`TRACK_WINDOW_DEG`] of that meridian are then tried, and a cell replaces
/// the current apex only when it stands strictly higher. Columns wrap around
/// the grid, which is meant to span the full circle.
pub fn compute_apex_track(
    grid: &ElevationGrid,
    hemisphere: Hemisphere,
    num_samples: usize,
) -> Vec<TrackSample> {
    if num_samples == 0 {
        return Vec::new();
    }

    let (ellipsoid_lat, ellipsoid_height) =
        sweep_ellipsoid_latitude(hemisphere, OPTIMAL_LATITUDE_STEP);

    let rows = grid.rows();
    let cols = grid.cols();
    let elevations = grid.elevations();

    let land_columns: Vec<bool> = (0..cols)
        .map(|col| (0..rows).any(|row| elevations[row * cols + col] > 0))
        .collect();
    debug!(
        %hemisphere,
        land_columns = land_columns.iter().filter(|&&land| land).count(),
        cols,
        "apex track sweep"
    );

    let (_, _, lon_min, _) = grid.bounds();
    let lon_step = grid.lon_step();
    let window_cols = ((TRACK_WINDOW_DEG / lon_step).ceil() as usize).min(cols);
    let span = window_cols.saturating_mul(2).saturating_add(1).min(cols);
    let window_cols = window_cols as i64;
    let obliquity = OBLIQUITY_J2000_DEG.to_radians();
    let ecef = grid.ecef();

    (0..=num_samples)
        .map(|s| {
            let e = pole_direction_at_angle(sample_angle(s, num_samples), hemisphere, obliquity);
            let pole_lon = e.y.atan2(e.x).to_degrees();

            let mut best = TrackSample {
                latitude: ellipsoid_lat,
                longitude: pole_lon,
                elevation: 0.0,
            };
            let mut best_height = ellipsoid_height;

            let center = ((pole_lon - lon_min) / lon_step).round() as i64;
            for k in 0..span as i64 {
                let col = (center - window_cols + k).rem_euclid(cols as i64) as usize;
                if !land_columns[col] {
                    continue;
                }
                for row in 0..rows {
                    let i = row * cols + col;
                    if elevations[i] <= 0 {
                        continue;
                    }
                    let h = ecef[3 * i] * e.x + ecef[3 * i + 1] * e.y + ecef[3 * i + 2] * e.z;
                    if h > best_height {
                        best_height = h;
                        best = TrackSample {
                            latitude: grid.latitudes()[i],
                            longitude: grid.longitudes()[i],
                            elevation: elevations[i] as Meter,
                        };
                    }
                }
            }
            best
        })
        .collect()
}
