#![allow(dead_code)]

use camino::Utf8PathBuf;
use ecliptic_apex::constants::{DPI, OBLIQUITY_J2000_DEG};
use ecliptic_apex::direction::pole_direction_at_angle;
use ecliptic_apex::elevation::{ElevationDataset, ElevationGrid};
use ecliptic_apex::hemisphere::Hemisphere;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

/// 2 × 2 patch over east Greenland, Gunnbjorn Fjeld height in the north-east corner.
pub fn greenland_patch() -> ElevationDataset {
    ElevationDataset::new(60.0, 75.0, -40.0, -20.0, 2, 2, vec![0, 0, 0, 3694]).unwrap()
}

/// Random relief over the dataset band of `hemisphere`, a quarter of it below sea level.
pub fn random_band(hemisphere: Hemisphere, rows: usize, cols: usize, seed: u64) -> ElevationDataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let (lat_min, lat_max) = hemisphere.dataset_band();
    let elevations = (0..rows * cols)
        .map(|_| rng.random_range(-1500i16..=4500))
        .collect();
    ElevationDataset::new(lat_min, lat_max, -60.0, 30.0, rows, cols, elevations).unwrap()
}

/// Best projection of any cell over `samples` uniformly spaced sidereal angles.
pub fn brute_force_max_height(grid: &ElevationGrid, hemisphere: Hemisphere, samples: usize) -> f64 {
    let obliquity = OBLIQUITY_J2000_DEG.to_radians();
    (0..samples)
        .map(|k| {
            let e = pole_direction_at_angle(k as f64 * DPI / samples as f64, hemisphere, obliquity);
            grid.ecef()
                .chunks_exact(3)
                .map(|p| p[0] * e.x + p[1] * e.y + p[2] * e.z)
                .fold(f64::NEG_INFINITY, f64::max)
        })
        .fold(f64::NEG_INFINITY, f64::max)
}

pub fn utf8_dir(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
}
