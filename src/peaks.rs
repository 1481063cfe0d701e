//! # Named reference peaks
//!
//! Small per-hemisphere catalogs used to put a name on a search result, and
//! to compare well-known summits against the bare-ellipsoid optimum.
//!
//! Matching is a linear scan: a peak matches when both the latitude and the
//! wraparound-aware longitude differences are below
//! [`PEAK_MATCH_TOLERANCE_DEG`]. The first match in catalog order wins; nearby
//! summits (the Watkins Range cluster) are therefore resolved by order, not by
//! distance.

use serde::Serialize;

use crate::absolute_maximum::{closed_form_height, ellipsoid_optimum};
use crate::constants::{Degree, Kilometer, Meter, PEAK_MATCH_TOLERANCE_DEG};
use crate::conversion::geodetic_to_ecef;
use crate::hemisphere::Hemisphere;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NamedPeak {
    pub latitude: Degree,
    pub longitude: Degree,
    /// Surveyed summit elevation.
    pub elevation: Meter,
    pub name: &'static str,
}

const fn peak(
    latitude: Degree,
    longitude: Degree,
    elevation: Meter,
    name: &'static str,
) -> NamedPeak {
    NamedPeak {
        latitude,
        longitude,
        elevation,
        name,
    }
}

pub const NORTH_PEAKS: [NamedPeak; 9] = [
    peak(68.919, -29.899, 3694.0, "Gunnbjorn Fjeld, Greenland"),
    peak(68.900, -29.880, 3683.0, "Dome, Watkins Range, Greenland"),
    peak(68.880, -29.850, 3669.0, "Cone, Watkins Range, Greenland"),
    peak(66.935, -36.786, 3383.0, "Mont Forel, Greenland"),
    peak(63.069, -151.007, 6190.0, "Denali, Alaska"),
    peak(60.567, -140.406, 5959.0, "Mt. Logan, Canada"),
    peak(61.637, 8.312, 2469.0, "Galdhøpiggen, Norway"),
    peak(67.903, 18.545, 2097.0, "Kebnekaise, Sweden"),
    peak(64.014, -16.677, 2110.0, "Hvannadalshnúkur, Iceland"),
];

pub const SOUTH_PEAKS: [NamedPeak; 3] = [
    peak(-66.525, -64.825, 2142.0, "Peninsula ice spine, Antarctica"),
    peak(-64.717, -62.529, 2800.0, "Mt. Français, Anvers Island"),
    peak(-78.525, -85.617, 4892.0, "Vinson Massif, Antarctica"),
];

pub fn named_peaks(hemisphere: Hemisphere) -> &'static [NamedPeak] {
    match hemisphere {
        Hemisphere::North => &NORTH_PEAKS,
        Hemisphere::South => &SOUTH_PEAKS,
    }
}

/// Longitude difference folded into `[0, 180]`.
fn longitude_gap(a: Degree, b: Degree) -> Degree {
    let gap = (a - b).abs();
    if gap > 180.0 {
        360.0 - gap
    } else {
        gap
    }
}

/// First peak of `catalog` within the matching tolerance of `(lat, lon)`.
pub fn find_peak(catalog: &[NamedPeak], lat: Degree, lon: Degree) -> Option<&NamedPeak> {
    catalog.iter().find(|p| {
        (p.latitude - lat).abs() < PEAK_MATCH_TOLERANCE_DEG
            && longitude_gap(p.longitude, lon) < PEAK_MATCH_TOLERANCE_DEG
    })
}

/// Name of the hemisphere catalog peak matching `(lat, lon)`, if any.
pub fn identify_peak(hemisphere: Hemisphere, lat: Degree, lon: Degree) -> Option<&'static str> {
    find_peak(named_peaks(hemisphere), lat, lon).map(|p| p.name)
}

/// Best height a catalog peak can reach above (or below) the ecliptic plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakReference {
    pub peak: NamedPeak,
    pub height_km: Kilometer,
    /// Height gained over the bare-ellipsoid optimum, in meters.
    pub advantage: Meter,
}

fn reference_against(
    peak: &NamedPeak,
    hemisphere: Hemisphere,
    ellipsoid_best: Meter,
) -> PeakReference {
    let position = geodetic_to_ecef(peak.latitude, peak.longitude, peak.elevation.max(0.0));
    let h = closed_form_height(&position, hemisphere);
    PeakReference {
        peak: *peak,
        height_km: h / 1000.0,
        advantage: h - ellipsoid_best,
    }
}

/// Closed-form maximum height of `peak` on the `hemisphere` side of the
/// ecliptic plane, compared with the bare-ellipsoid optimum.
pub fn reference_height(peak: &NamedPeak, hemisphere: Hemisphere) -> PeakReference {
    reference_against(peak, hemisphere, ellipsoid_optimum(hemisphere).1)
}

/// [`reference_height`] of every peak of the hemisphere catalog.
pub fn reference_heights(hemisphere: Hemisphere) -> Vec<PeakReference> {
    let (_, ellipsoid_best) = ellipsoid_optimum(hemisphere);
    named_peaks(hemisphere)
        .iter()
        .map(|p| reference_against(p, hemisphere, ellipsoid_best))
        .collect()
}

#[cfg(test)]
mod peaks_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identify_known_peak() {
        assert_eq!(
            identify_peak(Hemisphere::North, 66.94, -36.8),
            Some("Mont Forel, Greenland")
        );
        assert_eq!(
            identify_peak(Hemisphere::South, -64.7, -62.6),
            Some("Mt. Français, Anvers Island")
        );
        assert_eq!(identify_peak(Hemisphere::North, 70.0, 0.0), None);
        // catalogs are per hemisphere
        assert_eq!(identify_peak(Hemisphere::South, 66.94, -36.8), None);
    }

    #[test]
    fn test_tolerance_is_strict() {
        assert!(identify_peak(Hemisphere::North, 66.935 + 0.149, -36.786).is_some());
        assert!(identify_peak(Hemisphere::North, 66.935 + 0.151, -36.786).is_none());
        assert!(identify_peak(Hemisphere::North, 66.935, -36.786 - 0.16).is_none());
    }

    #[test]
    fn test_first_match_wins() {
        // the Dome lies within tolerance of Gunnbjorn Fjeld, listed first
        assert_eq!(
            identify_peak(Hemisphere::North, 68.900, -29.880),
            Some("Gunnbjorn Fjeld, Greenland")
        );
    }

    #[test]
    fn test_longitude_wraparound() {
        let catalog = [peak(65.0, 179.9, 100.0, "Dateline hill")];
        assert_eq!(
            find_peak(&catalog, 65.0, -179.95).map(|p| p.name),
            Some("Dateline hill")
        );
        assert_abs_diff_eq!(longitude_gap(179.9, -179.95), 0.15, epsilon = 1e-9);
        assert!(find_peak(&catalog, 65.0, -179.7).is_none());
    }

    #[test]
    fn test_reference_heights() {
        let refs = reference_heights(Hemisphere::North);
        assert_eq!(refs.len(), NORTH_PEAKS.len());

        // Mont Forel sits almost on the optimal latitude
        let forel = &refs[3];
        assert_eq!(forel.peak.name, "Mont Forel, Greenland");
        assert_abs_diff_eq!(forel.advantage, 3246.6, epsilon = 1.0);

        // 2.36° north of the optimum costs more than its 3694 m
        let gunnbjorn = &refs[0];
        assert_abs_diff_eq!(gunnbjorn.advantage, -1721.7, epsilon = 1.0);
        assert!(gunnbjorn.height_km < forel.height_km);

        // Denali is much higher but far from the optimal latitude
        let denali = refs.iter().find(|r| r.peak.name.starts_with("Denali")).unwrap();
        assert_abs_diff_eq!(denali.advantage, -5678.9, epsilon = 1.0);
        assert!(denali.height_km < gunnbjorn.height_km);
        assert_eq!(reference_height(&NORTH_PEAKS[4], Hemisphere::North), *denali);

        // the same summit seen from the other side of the plane
        let below = reference_height(&NORTH_PEAKS[0], Hemisphere::South);
        assert!(below.advantage < 0.0);
    }
}
