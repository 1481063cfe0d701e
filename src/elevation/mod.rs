//! # Elevation datasets and search grids
//!
//! This module turns a regular latitude/longitude elevation raster into the
//! flat Cartesian arena every search runs on.
//!
//! ## Components
//!
//! - [`ElevationDataset`](crate::elevation::ElevationDataset) – bounds,
//!   dimensions and signed 16-bit samples, with the binary codec of the
//!   `etopo_*.bin` files.
//! - [`PeakCorrection`](crate::elevation::PeakCorrection) – raise-only summit
//!   fixes applied before precomputation.
//! - [`ElevationGrid`](crate::elevation::ElevationGrid) – the built surface:
//!   per-cell latitude, longitude, unclamped elevation and ECEF position.
//!
//! ## Data flow
//!
//! ```text
//! bytes ──from_bytes──▶ ElevationDataset ──build(corrections)──▶ ElevationGrid
//!                                                                   │
//!                                    search_apex / find_absolute_maximum
//! ```
//!
//! When no dataset is available, [`generate_ellipsoid_grid`] produces an
//! analytic grid on the bare ellipsoid that is searched identically.

pub mod corrections;
pub mod dataset;
pub mod grid;

pub use corrections::{
    apply_peak_corrections, peak_corrections, AppliedCorrection, PeakCorrection,
    NORTH_PEAK_CORRECTIONS,
};
pub use dataset::{DatasetHeader, ElevationDataset, DATASET_HEADER_LEN};
pub use grid::{
    ElevationGrid, DEFAULT_ELLIPSOID_LAT_STEP, ELLIPSOID_GRID_LON_STEP, MIN_ELLIPSOID_LAT_STEP,
};

use crate::constants::Degree;
use crate::hemisphere::Hemisphere;

/// Bare-ellipsoid grid over the dataset band of `hemisphere`.
///
/// Arguments
/// ---------
/// * `hemisphere`: selects the latitude band, see [`Hemisphere::dataset_band`]
/// * `lat_step`: row spacing in degrees
pub fn generate_ellipsoid_grid(hemisphere: Hemisphere, lat_step: Degree) -> ElevationGrid {
    let (lat_min, lat_max) = hemisphere.dataset_band();
    ElevationGrid::ellipsoid(lat_min, lat_max, lat_step)
}

/// Build the grid of a dataset with the correction catalog of its hemisphere.
pub fn build_hemisphere_grid(dataset: ElevationDataset, hemisphere: Hemisphere) -> ElevationGrid {
    ElevationGrid::build(dataset, peak_corrections(hemisphere))
}

#[cfg(test)]
mod elevation_test {
    use super::*;

    #[test]
    fn test_generate_ellipsoid_grid_south() {
        let grid = generate_ellipsoid_grid(Hemisphere::South, 0.25);
        let (lat_min, lat_max, lon_min, _) = grid.bounds();
        assert_eq!((lat_min, lat_max, lon_min), (-75.0, -60.0, -180.0));
        assert_eq!(grid.rows(), 61);
        assert!(grid.applied_corrections().is_empty());
    }
}
