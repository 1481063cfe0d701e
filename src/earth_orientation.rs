use serde::{Deserialize, Serialize};

use crate::constants::{Radian, MJD, OBLIQUITY_J2000_DEG, RADSEC, T2000};

/// Compute the mean obliquity of the ecliptic at a given epoch (IAU 1976 model).
///
/// The obliquity ε is a cubic polynomial in Julian centuries since J2000,
/// evaluated with Horner's method:
///
/// ```text
/// T = (tjm - T2000) / 36525
/// ε = ((ob3·T + ob2)·T + ob1)·T + ob0
/// ```
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT scale).
///
/// Returns
/// --------
/// * Mean obliquity of the ecliptic in radians.
pub fn obleq(tjm: MJD) -> Radian {
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    let t = (tjm - T2000) / 36525.0;

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// How the tilt of the ecliptic pole is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObliquityModel {
    /// Fixed J2000 mean obliquity (23.4392911°), the value every closed-form
    /// result of the crate assumes.
    #[default]
    J2000,
    /// IAU 1976 mean obliquity of date, see [`obleq`].
    MeanOfDate,
}

impl ObliquityModel {
    /// Obliquity in radians at `tjm` (MJD, TT scale). `J2000` ignores the date.
    pub fn obliquity(&self, tjm: MJD) -> Radian {
        match self {
            ObliquityModel::J2000 => OBLIQUITY_J2000_DEG.to_radians(),
            ObliquityModel::MeanOfDate => obleq(tjm),
        }
    }
}

#[cfg(test)]
mod earth_orientation_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_obleq_at_j2000() {
        // 23°26'21.448"
        assert_abs_diff_eq!(obleq(T2000).to_degrees(), 23.4392911, epsilon = 1e-7);
    }

    #[test]
    fn test_obleq_decreases() {
        let century_later = T2000 + 36525.0;
        let drift_arcsec = (obleq(century_later) - obleq(T2000)) / RADSEC;
        assert_abs_diff_eq!(drift_arcsec, -46.815 - 0.0006 + 0.00181, epsilon = 1e-9);
    }

    #[test]
    fn test_model_selection() {
        let tjm = 60000.0;
        assert_eq!(
            ObliquityModel::J2000.obliquity(tjm),
            OBLIQUITY_J2000_DEG.to_radians()
        );
        assert_eq!(ObliquityModel::MeanOfDate.obliquity(tjm), obleq(tjm));
    }
}
