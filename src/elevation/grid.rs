use nalgebra::Vector3;
use tracing::{debug, warn};

use super::corrections::{apply_peak_corrections, AppliedCorrection, PeakCorrection};
use super::dataset::ElevationDataset;
use crate::constants::{Degree, Meter};
use crate::conversion::geodetic_to_ecef_batch;

/// Longitude spacing of the analytic bare-ellipsoid grid, in degrees.
pub const ELLIPSOID_GRID_LON_STEP: Degree = 0.5;

/// Default row spacing of the analytic bare-ellipsoid grid, in degrees.
pub const DEFAULT_ELLIPSOID_LAT_STEP: Degree = 0.05;

/// Finest accepted row spacing of the analytic grid, in degrees.
pub const MIN_ELLIPSOID_LAT_STEP: Degree = 0.001;

/// Search surface built from an [`ElevationDataset`].
///
/// The grid is a flat arena indexed by cell number (row-major, south→north,
/// west→east). For every cell it keeps:
///
/// * the latitude and longitude of the cell, in degrees,
/// * the **unclamped** elevation after peak corrections (ocean floor stays
///   negative), used for reporting and for the ellipsoid baseline,
/// * the ECEF position built from the elevation **clamped to ≥ 0**, used by
///   every directional search.
///
/// `ecef.len() == 3 · lats.len() == 3 · lons.len()` always holds. A grid is
/// never mutated after [`ElevationGrid::build`]; reconfiguration replaces it
/// wholesale.
#[derive(Debug, Clone)]
pub struct ElevationGrid {
    lat_min: Degree,
    lat_max: Degree,
    lon_min: Degree,
    lon_max: Degree,
    rows: usize,
    cols: usize,
    lat_step: Degree,
    lon_step: Degree,
    elevations: Vec<i16>,
    lats: Vec<Degree>,
    lons: Vec<Degree>,
    ecef: Vec<f64>,
    applied_corrections: Vec<AppliedCorrection>,
}

impl ElevationGrid {
    /// Build the search surface of a dataset.
    ///
    /// Steps:
    /// 1. apply the peak corrections (raise-only) to the owned dataset,
    /// 2. clamp every elevation to ≥ 0 for the Cartesian surface,
    /// 3. batch-convert every cell to ECEF.
    ///
    /// Arguments
    /// ---------
    /// * `dataset`: the elevation samples, consumed
    /// * `corrections`: the hemisphere catalog, see [`super::peak_corrections`]
    pub fn build(mut dataset: ElevationDataset, corrections: &[PeakCorrection]) -> Self {
        let applied_corrections = apply_peak_corrections(&mut dataset, corrections);

        let lat_step = dataset.lat_step();
        let lon_step = dataset.lon_step();
        let count = dataset.len();

        let mut lats = Vec::with_capacity(count);
        let mut lons = Vec::with_capacity(count);
        let mut heights = Vec::with_capacity(count);
        for row in 0..dataset.rows {
            let lat = dataset.lat_min + row as f64 * lat_step;
            for col in 0..dataset.cols {
                lats.push(lat);
                lons.push(dataset.lon_min + col as f64 * lon_step);
                heights.push(dataset.elevations[row * dataset.cols + col].max(0) as Meter);
            }
        }
        let ecef = geodetic_to_ecef_batch(&lats, &lons, &heights);

        debug!(
            rows = dataset.rows,
            cols = dataset.cols,
            lat_min = dataset.lat_min,
            lat_max = dataset.lat_max,
            lon_min = dataset.lon_min,
            lon_max = dataset.lon_max,
            min_elevation = dataset.elevations.iter().min().copied(),
            max_elevation = dataset.elevations.iter().max().copied(),
            "elevation grid built"
        );

        ElevationGrid {
            lat_min: dataset.lat_min,
            lat_max: dataset.lat_max,
            lon_min: dataset.lon_min,
            lon_max: dataset.lon_max,
            rows: dataset.rows,
            cols: dataset.cols,
            lat_step,
            lon_step,
            elevations: dataset.elevations,
            lats,
            lons,
            ecef,
            applied_corrections,
        }
    }

    /// Analytic grid on the bare ellipsoid (all elevations 0).
    ///
    /// Rows are spaced by about `lat_step` between `lat_min` and `lat_max`,
    /// columns cover the full circle at [`ELLIPSOID_GRID_LON_STEP`]. Used when
    /// no elevation dataset is available or topography is disabled.
    ///
    /// A `lat_step` that is not finite or below [`MIN_ELLIPSOID_LAT_STEP`] is
    /// replaced by [`DEFAULT_ELLIPSOID_LAT_STEP`].
    pub fn ellipsoid(lat_min: Degree, lat_max: Degree, lat_step: Degree) -> Self {
        let lat_step = if lat_step.is_finite() && lat_step >= MIN_ELLIPSOID_LAT_STEP {
            lat_step
        } else {
            warn!(lat_step, "invalid ellipsoid grid step, using the default");
            DEFAULT_ELLIPSOID_LAT_STEP
        };
        let (lat_min, lat_max) = (lat_min.min(lat_max), lat_min.max(lat_max));
        let rows = (((lat_max - lat_min) / lat_step).round() as usize).saturating_add(1).max(2);
        let cols = (360.0 / ELLIPSOID_GRID_LON_STEP).round() as usize;
        let dataset = ElevationDataset {
            lat_min,
            lat_max,
            lon_min: -180.0,
            lon_max: 180.0 - ELLIPSOID_GRID_LON_STEP,
            rows,
            cols,
            elevations: vec![0; rows * cols],
        };
        ElevationGrid::build(dataset, &[])
    }

    /// Elevation of the cell nearest to `(lat, lon)`.
    ///
    /// Return
    /// ------
    /// * the stored (corrected, unclamped) elevation in meters, or `0.0`
    ///   when the query falls outside the grid
    pub fn elevation_at(&self, lat: Degree, lon: Degree) -> Meter {
        self.cell_index(lat, lon)
            .map_or(0.0, |i| self.elevations[i] as Meter)
    }

    /// Nearest cell index, same rounding rule as [`ElevationDataset::cell_index`].
    pub fn cell_index(&self, lat: Degree, lon: Degree) -> Option<usize> {
        let row = super::dataset::nearest_index((lat - self.lat_min) / self.lat_step, self.rows)?;
        let col = super::dataset::nearest_index((lon - self.lon_min) / self.lon_step, self.cols)?;
        Some(row * self.cols + col)
    }

    pub fn len(&self) -> usize {
        self.lats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lats.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn lat_step(&self) -> Degree {
        self.lat_step
    }

    pub fn lon_step(&self) -> Degree {
        self.lon_step
    }

    /// `(lat_min, lat_max, lon_min, lon_max)` in degrees.
    pub fn bounds(&self) -> (Degree, Degree, Degree, Degree) {
        (self.lat_min, self.lat_max, self.lon_min, self.lon_max)
    }

    pub fn latitudes(&self) -> &[Degree] {
        &self.lats
    }

    pub fn longitudes(&self) -> &[Degree] {
        &self.lons
    }

    /// Unclamped elevations, one per cell.
    pub fn elevations(&self) -> &[i16] {
        &self.elevations
    }

    /// Flat interleaved ECEF coordinates `[x0, y0, z0, x1, ...]`, in meters.
    pub fn ecef(&self) -> &[f64] {
        &self.ecef
    }

    /// ECEF position of one cell.
    pub fn position(&self, index: usize) -> Vector3<f64> {
        Vector3::from_column_slice(&self.ecef[3 * index..3 * index + 3])
    }

    pub fn applied_corrections(&self) -> &[AppliedCorrection] {
        &self.applied_corrections
    }
}
