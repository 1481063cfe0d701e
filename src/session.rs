//! # Driver state for a running display
//!
//! An external clock calls [`ApexSession::tick`] once per frame with the
//! simulated instant. The session decides whether the per-instant search is
//! due (see [`RecomputeThrottle`]), and keeps the time-independent absolute
//! maximum cached until the hemisphere or the topography toggle changes.
//!
//! The session holds no timers or callbacks; it only reacts to the calls it
//! receives.

use hifitime::Epoch;
use tracing::debug;

use crate::absolute_maximum::AbsoluteMaximumResult;
use crate::apex_model::ApexModel;
use crate::apex_search::ApexResult;
use crate::direction::DirectionProvider;
use crate::hemisphere::Hemisphere;
use crate::time::{next_epoch_at_sidereal_angle, RecomputeThrottle};
use crate::track::TrackSample;

#[derive(Debug, Clone)]
pub struct ApexSession {
    model: ApexModel,
    hemisphere: Hemisphere,
    topography: bool,
    throttle: RecomputeThrottle,
    absolute_maximum: Option<AbsoluteMaximumResult>,
    last_apex: Option<ApexResult>,
}

impl ApexSession {
    pub fn new(model: ApexModel, hemisphere: Hemisphere, topography: bool) -> Self {
        let throttle = RecomputeThrottle::new(model.recompute_threshold_seconds());
        let absolute_maximum = model.absolute_maximum(hemisphere, topography);
        ApexSession {
            model,
            hemisphere,
            topography,
            throttle,
            absolute_maximum,
            last_apex: None,
        }
    }

    pub fn model(&self) -> &ApexModel {
        &self.model
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    pub fn topography(&self) -> bool {
        self.topography
    }

    /// Switch hemisphere and/or topography.
    ///
    /// On an actual change the absolute maximum is recomputed, the last apex
    /// is dropped and the next tick searches immediately.
    ///
    /// Return
    /// ------
    /// * `true` when the configuration changed
    pub fn configure(&mut self, hemisphere: Hemisphere, topography: bool) -> bool {
        if hemisphere == self.hemisphere && topography == self.topography {
            return false;
        }
        debug!(%hemisphere, topography, "session reconfigured");
        self.hemisphere = hemisphere;
        self.topography = topography;
        self.absolute_maximum = self.model.absolute_maximum(hemisphere, topography);
        self.last_apex = None;
        self.throttle.reset();
        true
    }

    /// Per-frame entry point.
    ///
    /// Arguments
    /// ---------
    /// * `epoch`: current simulated instant
    /// * `provider`: source of the pole direction, queried only when a search runs
    ///
    /// Return
    /// ------
    /// * `Some(apex)` when a search ran on this tick, `None` when it was throttled
    pub fn tick<P: DirectionProvider>(
        &mut self,
        epoch: Epoch,
        provider: &P,
    ) -> Option<ApexResult> {
        if !self.throttle.tick(epoch) {
            return None;
        }
        let direction = provider.pole_direction(&epoch, self.hemisphere);
        let apex = self.model.search(self.hemisphere, self.topography, &direction);
        self.last_apex = apex;
        apex
    }

    /// Result of the most recent search, kept across throttled ticks.
    pub fn last_apex(&self) -> Option<&ApexResult> {
        self.last_apex.as_ref()
    }

    pub fn absolute_maximum(&self) -> Option<&AbsoluteMaximumResult> {
        self.absolute_maximum.as_ref()
    }

    /// Next instant, from `now`, at which the absolute maximum occurs.
    pub fn next_absolute_maximum(&self, now: &Epoch) -> Option<Epoch> {
        self.absolute_maximum
            .as_ref()
            .map(|best| next_epoch_at_sidereal_angle(now, best.angle))
    }

    pub fn track(&self) -> &[TrackSample] {
        self.model.track(self.hemisphere, self.topography)
    }
}
