//! # Direction of the ecliptic pole in the Earth-fixed frame
//!
//! Every search projects surface points onto a unit vector: the pole of the
//! ecliptic plane, seen from the rotating Earth. In the inertial equatorial
//! frame the ecliptic north pole sits at `(0, −sinε, cosε)`; rotating it into
//! the Earth-fixed frame by the sidereal angle θ gives
//!
//! ```text
//! north:  e(θ) = (−sinε·sinθ, −sinε·cosθ,  cosε)
//! south:  e(θ) = ( sinε·sinθ,  sinε·cosθ, −cosε)
//! ```
//!
//! As the Earth turns, `e(θ)` traces a circle of polar angle ε around the
//! rotation axis. That is what makes the time-independent maximum of
//! [`crate::absolute_maximum`] a closed form.
//!
//! The [`DirectionProvider`] trait is the seam through which callers feed the
//! per-tick search. [`EclipticPole`] is the built-in provider; any
//! `Fn(&Epoch, Hemisphere) -> Vector3<f64>` closure works as well.

use hifitime::Epoch;
use nalgebra::Vector3;

use crate::constants::Radian;
use crate::earth_orientation::ObliquityModel;
use crate::hemisphere::Hemisphere;
use crate::time::sidereal_angle;

/// Source of the target direction at a given instant.
///
/// Implementations must return a unit vector in the Earth-fixed frame and
/// recompute it on every call (no caching across instants).
pub trait DirectionProvider {
    fn pole_direction(&self, epoch: &Epoch, hemisphere: Hemisphere) -> Vector3<f64>;
}

impl<F> DirectionProvider for F
where
    F: Fn(&Epoch, Hemisphere) -> Vector3<f64>,
{
    fn pole_direction(&self, epoch: &Epoch, hemisphere: Hemisphere) -> Vector3<f64> {
        self(epoch, hemisphere)
    }
}

/// Ecliptic pole direction at sidereal angle `angle` for a given obliquity.
///
/// Arguments
/// ---------
/// * `angle`: sidereal rotation angle θ in radians
/// * `hemisphere`: which pole of the ecliptic
/// * `obliquity`: ε in radians
pub fn pole_direction_at_angle(
    angle: Radian,
    hemisphere: Hemisphere,
    obliquity: Radian,
) -> Vector3<f64> {
    let (sin_e, cos_e) = obliquity.sin_cos();
    let (sin_g, cos_g) = angle.sin_cos();
    let north = Vector3::new(-sin_e * sin_g, -sin_e * cos_g, cos_e);
    match hemisphere {
        Hemisphere::North => north,
        Hemisphere::South => -north,
    }
}

/// Ecliptic pole driven by Greenwich Mean Sidereal Time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EclipticPole {
    obliquity_model: ObliquityModel,
}

impl EclipticPole {
    pub fn new(obliquity_model: ObliquityModel) -> Self {
        EclipticPole { obliquity_model }
    }

    pub fn obliquity(&self, epoch: &Epoch) -> Radian {
        self.obliquity_model.obliquity(epoch.to_mjd_tt_days())
    }
}

impl DirectionProvider for EclipticPole {
    fn pole_direction(&self, epoch: &Epoch, hemisphere: Hemisphere) -> Vector3<f64> {
        pole_direction_at_angle(sidereal_angle(epoch), hemisphere, self.obliquity(epoch))
    }
}

#[cfg(test)]
mod direction_test {
    use super::*;
    use crate::constants::OBLIQUITY_J2000_DEG;
    use approx::assert_abs_diff_eq;
    use hifitime::TimeScale;

    fn eps() -> Radian {
        OBLIQUITY_J2000_DEG.to_radians()
    }

    #[test]
    fn test_pole_at_zero_angle() {
        let e = pole_direction_at_angle(0.0, Hemisphere::North, eps());
        assert_eq!(e.x, 0.0);
        assert_abs_diff_eq!(e.y, -eps().sin(), epsilon = 1e-15);
        assert_abs_diff_eq!(e.z, eps().cos(), epsilon = 1e-15);
    }

    #[test]
    fn test_pole_is_unit_and_mirrored() {
        for i in 0..16 {
            let angle = i as f64 * 0.4;
            let n = pole_direction_at_angle(angle, Hemisphere::North, eps());
            let s = pole_direction_at_angle(angle, Hemisphere::South, eps());
            assert_abs_diff_eq!(n.norm(), 1.0, epsilon = 1e-15);
            assert_eq!(s, -n);
        }
    }

    #[test]
    fn test_ecliptic_pole_provider() {
        let pole = EclipticPole::default();
        let epoch = Epoch::from_gregorian(2024, 3, 20, 3, 6, 0, 0, TimeScale::UTC);
        let e = pole.pole_direction(&epoch, Hemisphere::North);
        assert_abs_diff_eq!(e.norm(), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(e.z, eps().cos(), epsilon = 1e-15);

        let expected = pole_direction_at_angle(sidereal_angle(&epoch), Hemisphere::North, eps());
        assert_eq!(e, expected);
    }

    #[test]
    fn test_closure_provider() {
        let fixed = |_: &Epoch, h: Hemisphere| Vector3::new(0.0, 0.0, h.z_sign());
        let epoch = Epoch::from_gregorian(2024, 1, 1, 0, 0, 0, 0, TimeScale::UTC);
        assert_eq!(
            fixed.pole_direction(&epoch, Hemisphere::South),
            Vector3::new(0.0, 0.0, -1.0)
        );
    }
}
