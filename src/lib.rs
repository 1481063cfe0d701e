//! # ecliptic-apex
//!
//! Locates the point of the Earth's surface (WGS84 ellipsoid plus optional
//! topography) standing highest above, or farthest below, the ecliptic plane:
//!
//! - at a given instant, with [`apex_search::search_apex`] on a precomputed
//!   [`elevation::ElevationGrid`],
//! - over all instants, with the closed-form
//!   [`absolute_maximum::find_absolute_maximum`], together with the sidereal
//!   angle at which it happens.
//!
//! [`apex_model::ApexModel`] loads both hemispheres with graceful fallback to
//! the bare ellipsoid, and [`session::ApexSession`] drives the throttled
//! per-frame search.

pub mod absolute_maximum;
pub mod apex_errors;
pub mod apex_model;
pub mod apex_search;
pub mod config;
pub mod constants;
pub mod conversion;
pub mod data_source;
pub mod direction;
pub mod earth_orientation;
pub mod elevation;
pub mod hemisphere;
pub mod peaks;
pub mod session;
pub mod time;
pub mod track;
