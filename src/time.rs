//! # Sidereal time and tick scheduling
//!
//! - [`gmst`] – Greenwich Mean Sidereal Time from a Modified Julian Date.
//! - [`sidereal_angle`] – the same angle from a [`hifitime::Epoch`].
//! - [`next_epoch_at_sidereal_angle`] – the next instant at which the Earth
//!   reaches a given sidereal angle (used to turn the absolute-maximum angle
//!   into a calendar date).
//! - [`should_recompute`] / [`RecomputeThrottle`] – the explicit contract that
//!   bounds how often the per-tick apex search runs, independent of frame rate
//!   or time multiplier.

use hifitime::{Epoch, Unit};

use crate::constants::{
    Radian, DPI, MJD, RECOMPUTE_THRESHOLD_SECONDS, SIDEREAL_DAY_SECONDS, T2000,
};

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// IAU 1982 polynomial for GMST at 0h UT1, plus the rotation accumulated
/// during the fraction of the day (scaled by the sidereal/solar day ratio).
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
pub fn gmst(tjm: MJD) -> Radian {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let day = tjm.floor();
    let t = (day - T2000) / 36525.0;

    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * (DPI / 86400.0);
    let angle = gmst0 + (tjm - day) * DPI * RAP;

    normalize_angle(angle)
}

/// Wrap an angle into `[0, 2π)`.
pub fn normalize_angle(angle: Radian) -> Radian {
    let wrapped = angle.rem_euclid(DPI);
    // rem_euclid rounds tiny negative inputs up to exactly 2π
    if wrapped >= DPI {
        0.0
    } else {
        wrapped
    }
}

/// Live sidereal angle of the Earth-fixed frame at `epoch`.
///
/// UTC stands in for UT1 (|UT1 − UTC| < 0.9 s).
pub fn sidereal_angle(epoch: &Epoch) -> Radian {
    gmst(epoch.to_mjd_utc_days())
}

/// Next instant, at or after `now`, at which the sidereal angle equals `angle`.
///
/// The remaining rotation `(angle − θ(now)) mod 2π` is converted to time using
/// one sidereal rotation period of [`SIDEREAL_DAY_SECONDS`].
///
/// Arguments
/// ---------
/// * `now`: the reference instant
/// * `angle`: target sidereal angle in radians (any value, wrapped internally)
pub fn next_epoch_at_sidereal_angle(now: &Epoch, angle: Radian) -> Epoch {
    let remaining = normalize_angle(angle - sidereal_angle(now));
    *now + (remaining / DPI * SIDEREAL_DAY_SECONDS) * Unit::Second
}

/// Whether the simulated clock moved far enough since the last search.
///
/// Return
/// ------
/// * `true` when `|current − last| ≥ threshold_seconds`; playback running
///   backwards counts as motion too.
pub fn should_recompute(last: &Epoch, current: &Epoch, threshold_seconds: f64) -> bool {
    (*current - *last).to_seconds().abs() >= threshold_seconds
}

/// Holds the instant of the last per-tick search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecomputeThrottle {
    last: Option<Epoch>,
    threshold_seconds: f64,
}

impl Default for RecomputeThrottle {
    fn default() -> Self {
        Self::new(RECOMPUTE_THRESHOLD_SECONDS)
    }
}

impl RecomputeThrottle {
    pub fn new(threshold_seconds: f64) -> Self {
        RecomputeThrottle {
            last: None,
            threshold_seconds,
        }
    }

    /// Throttle that considers a search already done at `epoch`.
    pub fn starting_at(epoch: Epoch, threshold_seconds: f64) -> Self {
        RecomputeThrottle {
            last: Some(epoch),
            threshold_seconds,
        }
    }

    /// Report whether a search is due at `current`, and if so record it.
    ///
    /// The first call always fires.
    pub fn tick(&mut self, current: Epoch) -> bool {
        let due = match &self.last {
            None => true,
            Some(last) => should_recompute(last, &current, self.threshold_seconds),
        };
        if due {
            self.last = Some(current);
        }
        due
    }

    /// Forget the last search so the next tick fires.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn last(&self) -> Option<Epoch> {
        self.last
    }
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hifitime::TimeScale;

    #[test]
    fn test_gmst() {
        let tut = 57028.478514610404;
        assert_abs_diff_eq!(gmst(tut), 4.851925725092499, epsilon = 1e-12);

        assert_abs_diff_eq!(gmst(T2000), 4.894961212789145, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_abs_diff_eq!(normalize_angle(-0.5), DPI - 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(normalize_angle(DPI + 1.0), 1.0, epsilon = 1e-15);
        assert_eq!(normalize_angle(-1e-300), 0.0);
    }

    #[test]
    fn test_next_epoch_at_sidereal_angle() {
        let now = Epoch::from_gregorian(2025, 6, 21, 12, 0, 0, 0, TimeScale::UTC);
        let current = sidereal_angle(&now);

        let target = current + 1.0;
        let next = next_epoch_at_sidereal_angle(&now, target);
        let waited = (next - now).to_seconds();
        assert_abs_diff_eq!(waited, SIDEREAL_DAY_SECONDS / DPI, epsilon = 1e-3);
        assert_abs_diff_eq!(
            sidereal_angle(&next),
            normalize_angle(target),
            epsilon = 1e-6
        );

        // an angle already passed waits for the next rotation
        let behind = next_epoch_at_sidereal_angle(&now, current - 0.1);
        let waited = (behind - now).to_seconds();
        assert!(waited > 0.9 * SIDEREAL_DAY_SECONDS);
        assert!(waited < SIDEREAL_DAY_SECONDS);
    }

    #[test]
    fn test_should_recompute() {
        let t0 = Epoch::from_gregorian(2025, 1, 1, 0, 0, 0, 0, TimeScale::UTC);
        assert!(!should_recompute(&t0, &(t0 + 4.9 * Unit::Second), 5.0));
        assert!(should_recompute(&t0, &(t0 + 5.0 * Unit::Second), 5.0));
        assert!(should_recompute(&t0, &(t0 - 6.0 * Unit::Second), 5.0));
    }

    #[test]
    fn test_throttle_fires_once_over_six_seconds() {
        let t0 = Epoch::from_gregorian(2025, 1, 1, 0, 0, 0, 0, TimeScale::UTC);
        let mut throttle = RecomputeThrottle::starting_at(t0, RECOMPUTE_THRESHOLD_SECONDS);

        let mut now = t0;
        let mut fired = Vec::new();
        for delta in [1.0, 1.0, 1.0, 1.0, 2.0] {
            now += delta * Unit::Second;
            fired.push(throttle.tick(now));
        }
        assert_eq!(fired, vec![false, false, false, false, true]);
        assert_eq!(throttle.last(), Some(now));
    }

    #[test]
    fn test_throttle_first_tick_and_reset() {
        let t0 = Epoch::from_gregorian(2025, 1, 1, 0, 0, 0, 0, TimeScale::UTC);
        let mut throttle = RecomputeThrottle::default();
        assert!(throttle.tick(t0));
        assert!(!throttle.tick(t0 + 1.0 * Unit::Second));
        throttle.reset();
        assert!(throttle.tick(t0 + 2.0 * Unit::Second));
    }
}
