//! # Constants and type aliases for the apex engine
//!
//! This module centralizes the **geodetic constants** of the WGS84 ellipsoid,
//! the **obliquity** used to orient the ecliptic plane, and the unit aliases
//! shared by every other module.
//!
//! ## Overview
//!
//! - WGS84 semi-major axis and first eccentricity squared
//! - J2000 mean obliquity of the ecliptic
//! - Sidereal rotation period and the per-tick recompute threshold
//! - Unit aliases (degrees, radians, meters, kilometers)

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, one full rotation in radians
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// WGS84 semi-major axis in meters
pub const WGS84_A: f64 = 6_378_137.0;

/// WGS84 first eccentricity squared
pub const WGS84_E2: f64 = 0.00669437999014;

/// J2000 mean obliquity of the ecliptic in degrees
pub const OBLIQUITY_J2000_DEG: f64 = 23.4392911;

/// Length of one sidereal rotation in SI seconds
pub const SIDEREAL_DAY_SECONDS: f64 = 86_164.0905;

/// Simulated time that must elapse between two per-tick apex searches
pub const RECOMPUTE_THRESHOLD_SECONDS: f64 = 5.0;

/// Half-width, in degrees, of the peak matching window in both axes
pub const PEAK_MATCH_TOLERANCE_DEG: f64 = 0.15;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
