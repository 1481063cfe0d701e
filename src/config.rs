//! # Engine configuration
//!
//! [`ApexConfig`] names the binary assets of each hemisphere and the few
//! numeric knobs of the engine. It is plain serde data, so it can be built in
//! code, read from a JSON file, or pointed at a data directory holding the
//! conventional file names:
//!
//! ```text
//! etopo_60N_75N_2min.bin   north elevation dataset
//! etopo_60S_75S_2min.bin   south elevation dataset
//! track_north.bin          north precomputed track
//! track_south.bin          south precomputed track
//! ```
//!
//! Every source is optional; a missing one makes the model fall back to the
//! analytic ellipsoid grid or track for that hemisphere.

use std::fs;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::apex_errors::ApexError;
use crate::constants::{Degree, RECOMPUTE_THRESHOLD_SECONDS};
use crate::data_source::DataSource;
use crate::elevation::MIN_ELLIPSOID_LAT_STEP;
use crate::hemisphere::{Hemisphere, HemisphereSet};
use crate::track::DEFAULT_TRACK_SAMPLES;

pub use crate::elevation::DEFAULT_ELLIPSOID_LAT_STEP;

/// Assets of one hemisphere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HemisphereSources {
    pub dataset: Option<DataSource>,
    pub track: Option<DataSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApexConfig {
    pub sources: HemisphereSet<HemisphereSources>,
    pub recompute_threshold_seconds: f64,
    /// Samples per rotation of the analytic fallback track.
    pub track_samples: usize,
    pub ellipsoid_lat_step: Degree,
}

impl Default for ApexConfig {
    fn default() -> Self {
        ApexConfig {
            sources: HemisphereSet::default(),
            recompute_threshold_seconds: RECOMPUTE_THRESHOLD_SECONDS,
            track_samples: DEFAULT_TRACK_SAMPLES,
            ellipsoid_lat_step: DEFAULT_ELLIPSOID_LAT_STEP,
        }
    }
}

/// Conventional file name of the elevation dataset of a hemisphere.
pub fn dataset_file_name(hemisphere: Hemisphere) -> &'static str {
    match hemisphere {
        Hemisphere::North => "etopo_60N_75N_2min.bin",
        Hemisphere::South => "etopo_60S_75S_2min.bin",
    }
}

/// Conventional file name of the precomputed track of a hemisphere.
pub fn track_file_name(hemisphere: Hemisphere) -> &'static str {
    match hemisphere {
        Hemisphere::North => "track_north.bin",
        Hemisphere::South => "track_south.bin",
    }
}

impl ApexConfig {
    /// Default settings with all four assets expected in `dir`.
    pub fn with_data_dir(dir: &Utf8Path) -> Self {
        ApexConfig {
            sources: HemisphereSet::from_fn(|h| HemisphereSources {
                dataset: Some(DataSource::File(dir.join(dataset_file_name(h)))),
                track: Some(DataSource::File(dir.join(track_file_name(h)))),
            }),
            ..ApexConfig::default()
        }
    }

    /// Check the numeric settings.
    ///
    /// Errors
    /// ------
    /// * [`ApexError::InvalidConfigValue`] if `ellipsoid_lat_step` is not
    ///   finite or below [`MIN_ELLIPSOID_LAT_STEP`], or if
    ///   `recompute_threshold_seconds` is not finite or negative.
    pub fn validate(&self) -> Result<(), ApexError> {
        let step = self.ellipsoid_lat_step;
        if !step.is_finite() || step < MIN_ELLIPSOID_LAT_STEP {
            return Err(ApexError::InvalidConfigValue {
                field: "ellipsoid_lat_step",
                value: step,
            });
        }
        let threshold = self.recompute_threshold_seconds;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ApexError::InvalidConfigValue {
                field: "recompute_threshold_seconds",
                value: threshold,
            });
        }
        Ok(())
    }

    /// Parse and [`validate`](ApexConfig::validate) a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ApexError> {
        let config: ApexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Utf8Path) -> Result<Self, ApexError> {
        let json = fs::read_to_string(path)?;
        ApexConfig::from_json_str(&json)
    }
}
