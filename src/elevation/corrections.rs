//! Point-wise peak corrections.
//!
//! Gridded relief products smooth sharp summits away: a nunatak standing a few
//! hundred meters above the surrounding ice sheet loses most of its height at
//! 2 arc-minute resolution. The catalog below re-asserts surveyed summit
//! elevations at the nearest grid cell. A correction only ever **raises** the
//! stored value.

use tracing::info;

use super::dataset::ElevationDataset;
use crate::constants::Degree;
use crate::hemisphere::Hemisphere;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakCorrection {
    pub latitude: Degree,
    pub longitude: Degree,
    /// Surveyed summit elevation in meters.
    pub elevation: i16,
    pub name: &'static str,
}

/// Summits of east Greenland that the 2 arc-minute grid underestimates.
pub const NORTH_PEAK_CORRECTIONS: [PeakCorrection; 4] = [
    PeakCorrection {
        latitude: 66.935,
        longitude: -36.786,
        elevation: 3383,
        name: "Mont Forel",
    },
    PeakCorrection {
        latitude: 68.919,
        longitude: -29.899,
        elevation: 3694,
        name: "Gunnbjorn Fjeld",
    },
    PeakCorrection {
        latitude: 68.900,
        longitude: -29.880,
        elevation: 3683,
        name: "Dome (Watkins Range)",
    },
    PeakCorrection {
        latitude: 68.880,
        longitude: -29.850,
        elevation: 3669,
        name: "Cone (Watkins Range)",
    },
];

/// Catalog of corrections for a hemisphere. The southern band needs none.
pub fn peak_corrections(hemisphere: Hemisphere) -> &'static [PeakCorrection] {
    match hemisphere {
        Hemisphere::North => &NORTH_PEAK_CORRECTIONS,
        Hemisphere::South => &[],
    }
}

/// Record of one correction that changed the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedCorrection {
    pub name: &'static str,
    /// Row-major cell index that was raised.
    pub index: usize,
    pub previous: i16,
    pub corrected: i16,
}

/// Raise the dataset at the nearest cell of every correction whose elevation
/// exceeds the stored sample.
///
/// Corrections falling outside the grid are skipped silently. Dimensions and
/// spacing are left untouched.
///
/// Return
/// ------
/// * the corrections that actually modified the dataset, in catalog order
pub fn apply_peak_corrections(
    dataset: &mut ElevationDataset,
    corrections: &[PeakCorrection],
) -> Vec<AppliedCorrection> {
    let mut applied = Vec::new();
    for correction in corrections {
        let Some(index) = dataset.cell_index(correction.latitude, correction.longitude) else {
            continue;
        };
        let previous = dataset.elevations[index];
        if correction.elevation > previous {
            dataset.elevations[index] = correction.elevation;
            info!(
                peak = correction.name,
                lat = correction.latitude,
                lon = correction.longitude,
                previous,
                corrected = correction.elevation,
                "peak correction applied"
            );
            applied.push(AppliedCorrection {
                name: correction.name,
                index,
                previous,
                corrected: correction.elevation,
            });
        }
    }
    applied
}

#[cfg(test)]
mod corrections_test {
    use super::*;

    fn greenland_patch(top: i16) -> ElevationDataset {
        ElevationDataset::new(60.0, 75.0, -40.0, -20.0, 2, 2, vec![0, 0, 0, top]).unwrap()
    }

    #[test]
    fn test_correction_never_lowers() {
        let mut dataset = greenland_patch(4000);
        let before = dataset.clone();
        let lower = [PeakCorrection {
            latitude: 68.919,
            longitude: -29.899,
            elevation: 3694,
            name: "Gunnbjorn Fjeld",
        }];

        let applied = apply_peak_corrections(&mut dataset, &lower);
        assert!(applied.is_empty());
        assert_eq!(dataset, before);
    }

    #[test]
    fn test_correction_raises_nearest_cell() {
        let mut dataset = greenland_patch(3000);
        let applied = apply_peak_corrections(&mut dataset, &NORTH_PEAK_CORRECTIONS);

        // Mont Forel rounds to the south-west corner, the Watkins Range
        // summits all round to the north-east corner.
        assert_eq!(dataset.elevations, vec![3383, 0, 0, 3694]);
        assert_eq!(
            applied,
            vec![
                AppliedCorrection {
                    name: "Mont Forel",
                    index: 0,
                    previous: 0,
                    corrected: 3383
                },
                AppliedCorrection {
                    name: "Gunnbjorn Fjeld",
                    index: 3,
                    previous: 3000,
                    corrected: 3694
                },
            ]
        );
    }

    #[test]
    fn test_correction_outside_grid_is_skipped() {
        let mut dataset =
            ElevationDataset::new(-75.0, -60.0, -70.0, -60.0, 2, 2, vec![0, 0, 0, 0]).unwrap();
        let applied = apply_peak_corrections(&mut dataset, &NORTH_PEAK_CORRECTIONS);
        assert!(applied.is_empty());
        assert_eq!(dataset.elevations, vec![0; 4]);
    }

    #[test]
    fn test_south_catalog_is_empty() {
        assert!(peak_corrections(Hemisphere::South).is_empty());
        assert_eq!(peak_corrections(Hemisphere::North).len(), 4);
    }
}
