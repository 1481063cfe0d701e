//! # Per-instant apex search
//!
//! Linear scan of a grid's precomputed ECEF coordinates for the cell with the
//! largest projection onto a direction vector, i.e. the point standing highest
//! above the plane whose pole is that direction.
//!
//! The scan is O(n) in the number of cells and allocates nothing: it reads the
//! grid's flat arrays in place, so calling it every tick costs no memory.
//! Exact ties keep the first cell in storage order (south-west first).

use std::fmt;

use nalgebra::Vector3;
use serde::Serialize;
use tracing::trace;

use crate::constants::{Degree, Kilometer, Meter};
use crate::elevation::ElevationGrid;

/// Highest cell for one direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ApexResult {
    pub latitude: Degree,
    pub longitude: Degree,
    /// Stored (unclamped) elevation of the cell.
    pub elevation: Meter,
    /// Projection of the cell position onto the direction.
    pub height_km: Kilometer,
    /// Cell index in the grid.
    pub index: usize,
}

/// Find the grid cell maximizing `position · direction`.
///
/// Arguments
/// ---------
/// * `grid`: a built [`ElevationGrid`]
/// * `direction`: target direction in the Earth-fixed frame (normally unit length)
///
/// Return
/// ------
/// * `Some(ApexResult)` for the best cell, `None` for an empty grid
pub fn search_apex(grid: &ElevationGrid, direction: &Vector3<f64>) -> Option<ApexResult> {
    let (dx, dy, dz) = (direction.x, direction.y, direction.z);

    let mut best_index = None;
    let mut best_height = f64::NEG_INFINITY;
    for (i, p) in grid.ecef().chunks_exact(3).enumerate() {
        let h = p[0] * dx + p[1] * dy + p[2] * dz;
        if h > best_height {
            best_height = h;
            best_index = Some(i);
        }
    }

    let index = best_index?;
    let result = ApexResult {
        latitude: grid.latitudes()[index],
        longitude: grid.longitudes()[index],
        elevation: grid.elevations()[index] as Meter,
        height_km: best_height / 1000.0,
        index,
    };
    trace!(
        lat = result.latitude,
        lon = result.longitude,
        height_km = result.height_km,
        "apex search"
    );
    Some(result)
}

impl fmt::Display for ApexResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat_dir = if self.latitude < 0.0 { 'S' } else { 'N' };
        let lon_dir = if self.longitude < 0.0 { 'W' } else { 'E' };
        writeln!(f, "+----------------+------------------------+")?;
        writeln!(
            f,
            "| {:<14} | {:>22} |",
            "Apex",
            format!(
                "{:.4}°{} {:.4}°{}",
                self.latitude.abs(),
                lat_dir,
                self.longitude.abs(),
                lon_dir
            )
        )?;
        writeln!(
            f,
            "| {:<14} | {:>22} |",
            "Elevation",
            format!("{:.0} m", self.elevation)
        )?;
        writeln!(
            f,
            "| {:<14} | {:>22} |",
            "Height",
            format!("{:.3} km", self.height_km)
        )?;
        writeln!(f, "+----------------+------------------------+")
    }
}

#[cfg(test)]
mod apex_search_test {
    use super::*;
    use crate::elevation::{ElevationDataset, ElevationGrid};

    #[test]
    fn test_two_cells_vertical_direction() {
        // one row below the other, (0,0,1) favours the northern cell
        let dataset =
            ElevationDataset::new(60.0, 61.0, 0.0, 1.0, 2, 2, vec![0, 0, 0, 0]).unwrap();
        let grid = ElevationGrid::build(dataset, &[]);
        let apex = search_apex(&grid, &Vector3::new(0.0, 0.0, 1.0)).unwrap();

        // both northern cells have the same z: the first in storage order wins
        assert_eq!(apex.index, 2);
        assert_eq!(apex.latitude, 61.0);
        assert_eq!(apex.longitude, 0.0);
        assert_eq!(apex.height_km, grid.position(2).z / 1000.0);
    }

    #[test]
    fn test_elevation_wins() {
        let dataset =
            ElevationDataset::new(60.0, 61.0, 0.0, 1.0, 2, 2, vec![0, 0, 0, 500]).unwrap();
        let grid = ElevationGrid::build(dataset, &[]);
        let apex = search_apex(&grid, &Vector3::new(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(apex.index, 3);
        assert_eq!(apex.elevation, 500.0);
    }

    #[test]
    fn test_reported_elevation_is_unclamped() {
        let dataset =
            ElevationDataset::new(60.0, 61.0, 0.0, 1.0, 2, 2, vec![0, 0, -40, 0]).unwrap();
        let grid = ElevationGrid::build(dataset, &[]);
        let apex = search_apex(&grid, &Vector3::new(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(apex.index, 2);
        assert_eq!(apex.elevation, -40.0);
    }

    #[test]
    fn test_direction_along_x() {
        let grid = ElevationGrid::ellipsoid(60.0, 75.0, 1.0);
        let apex = search_apex(&grid, &Vector3::new(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(apex.latitude, 60.0);
        assert_eq!(apex.longitude, 0.0);
    }

    #[test]
    fn test_display() {
        let apex = ApexResult {
            latitude: 68.9,
            longitude: -29.9,
            elevation: 3694.0,
            height_km: 6385.123456,
            index: 0,
        };
        let expected = "\
+----------------+------------------------+
| Apex           |    68.9000°N 29.9000°W |
| Elevation      |                 3694 m |
| Height         |            6385.123 km |
+----------------+------------------------+
";
        assert_eq!(format!("{apex}"), expected);
    }
}
