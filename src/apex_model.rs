//! # Both hemispheres, loaded once
//!
//! [`ApexModel`] owns everything the searches run on: for each hemisphere the
//! topographic grid (when its dataset loaded), the analytic ellipsoid grid,
//! the precomputed track (when it loaded) and the analytic track.
//!
//! Loading never fails as a whole. Each dataset and each track is read on its
//! own; a failure is logged and that asset alone falls back to its analytic
//! counterpart.
//!
//! ```rust, no_run
//! use camino::Utf8Path;
//! use ecliptic_apex::apex_model::ApexModel;
//! use ecliptic_apex::config::ApexConfig;
//! use ecliptic_apex::hemisphere::Hemisphere;
//!
//! let model = ApexModel::load(&ApexConfig::with_data_dir(Utf8Path::new("public/data")));
//! if let Some(best) = model.absolute_maximum(Hemisphere::North, true) {
//!     println!("{best}");
//! }
//! ```

use nalgebra::Vector3;
use tracing::{info, warn};

use crate::absolute_maximum::{find_absolute_maximum, AbsoluteMaximumResult};
use crate::apex_errors::ApexError;
use crate::apex_search::{search_apex, ApexResult};
use crate::config::ApexConfig;
use crate::constants::{Degree, Meter};
use crate::data_source::DataSource;
use crate::elevation::{
    build_hemisphere_grid, generate_ellipsoid_grid, ElevationDataset, ElevationGrid,
};
use crate::hemisphere::{Hemisphere, HemisphereSet};
use crate::track::{compute_ellipsoid_track, parse_track, TrackSample};

/// Grids and tracks of one hemisphere.
#[derive(Debug, Clone)]
struct HemisphereData {
    topography: Option<ElevationGrid>,
    ellipsoid: ElevationGrid,
    track: Option<Vec<TrackSample>>,
    ellipsoid_track: Vec<TrackSample>,
}

impl HemisphereData {
    fn analytic(hemisphere: Hemisphere, config: &ApexConfig) -> Self {
        HemisphereData {
            topography: None,
            ellipsoid: generate_ellipsoid_grid(hemisphere, config.ellipsoid_lat_step),
            track: None,
            ellipsoid_track: compute_ellipsoid_track(hemisphere, config.track_samples),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApexModel {
    hemispheres: HemisphereSet<HemisphereData>,
    recompute_threshold_seconds: f64,
}

/// Read and decode an elevation dataset.
pub fn load_dataset(source: &DataSource) -> Result<ElevationDataset, ApexError> {
    ElevationDataset::from_bytes(&source.read_bytes()?)
}

/// Read and decode a precomputed track.
pub fn load_track_source(source: &DataSource) -> Result<Vec<TrackSample>, ApexError> {
    parse_track(&source.read_bytes()?)
}

/// Turn a load result into an optional asset, logging the failure.
fn or_degrade<T>(
    result: Result<T, ApexError>,
    hemisphere: Hemisphere,
    kind: &str,
    source: &DataSource,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                %hemisphere,
                kind,
                %source,
                error = %err,
                "load failed, falling back to the analytic ellipsoid"
            );
            None
        }
    }
}

impl ApexModel {
    /// Load every configured asset, degrading per hemisphere and per asset.
    pub fn load(config: &ApexConfig) -> Self {
        let mut model = ApexModel::analytic(config);

        for hemisphere in Hemisphere::ALL {
            let sources = &config.sources[hemisphere];

            if let Some(source) = &sources.dataset {
                let dataset = or_degrade(load_dataset(source), hemisphere, "dataset", source);
                model.hemispheres[hemisphere].topography =
                    dataset.map(|d| build_hemisphere_grid(d, hemisphere));
            }
            if let Some(source) = &sources.track {
                model.hemispheres[hemisphere].track =
                    or_degrade(load_track_source(source), hemisphere, "track", source);
            }

            let data = &model.hemispheres[hemisphere];
            info!(
                %hemisphere,
                topography = data.topography.as_ref().map(ElevationGrid::len),
                track = data.track.as_ref().map(Vec::len),
                "hemisphere ready"
            );
        }
        model
    }

    /// Model with no topography and no precomputed track.
    pub fn analytic(config: &ApexConfig) -> Self {
        ApexModel {
            hemispheres: HemisphereSet::from_fn(|h| HemisphereData::analytic(h, config)),
            recompute_threshold_seconds: config.recompute_threshold_seconds,
        }
    }

    /// Replace the topography of a hemisphere with an already decoded dataset.
    pub fn with_dataset(mut self, hemisphere: Hemisphere, dataset: ElevationDataset) -> Self {
        self.hemispheres[hemisphere].topography = Some(build_hemisphere_grid(dataset, hemisphere));
        self
    }

    /// Replace the precomputed track of a hemisphere.
    pub fn with_track(mut self, hemisphere: Hemisphere, track: Vec<TrackSample>) -> Self {
        self.hemispheres[hemisphere].track = Some(track);
        self
    }

    pub fn has_topography(&self, hemisphere: Hemisphere) -> bool {
        self.hemispheres[hemisphere].topography.is_some()
    }

    pub fn has_precomputed_track(&self, hemisphere: Hemisphere) -> bool {
        self.hemispheres[hemisphere].track.is_some()
    }

    pub fn recompute_threshold_seconds(&self) -> f64 {
        self.recompute_threshold_seconds
    }

    /// The grid searched for `hemisphere`: topographic when requested and
    /// loaded, the analytic ellipsoid otherwise.
    pub fn grid(&self, hemisphere: Hemisphere, topography: bool) -> &ElevationGrid {
        let data = &self.hemispheres[hemisphere];
        match &data.topography {
            Some(grid) if topography => grid,
            _ => &data.ellipsoid,
        }
    }

    /// The track drawn for `hemisphere`: the precomputed one when topography
    /// is requested and the track loaded, the analytic loop otherwise.
    pub fn track(&self, hemisphere: Hemisphere, topography: bool) -> &[TrackSample] {
        let data = &self.hemispheres[hemisphere];
        match &data.track {
            Some(track) if topography => track,
            _ => &data.ellipsoid_track,
        }
    }

    /// Elevation under `(lat, lon)` in the topographic grid, 0 when there is
    /// none or the point falls outside it.
    pub fn elevation_at(&self, hemisphere: Hemisphere, lat: Degree, lon: Degree) -> Meter {
        self.hemispheres[hemisphere]
            .topography
            .as_ref()
            .map_or(0.0, |grid| grid.elevation_at(lat, lon))
    }

    pub fn search(
        &self,
        hemisphere: Hemisphere,
        topography: bool,
        direction: &Vector3<f64>,
    ) -> Option<ApexResult> {
        search_apex(self.grid(hemisphere, topography), direction)
    }

    pub fn absolute_maximum(
        &self,
        hemisphere: Hemisphere,
        topography: bool,
    ) -> Option<AbsoluteMaximumResult> {
        find_absolute_maximum(self.grid(hemisphere, topography), hemisphere)
    }
}
