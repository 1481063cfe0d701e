//! # Target hemisphere
//!
//! The engine runs the same search twice: once for the point that gets highest
//! **above** the ecliptic plane (north, toward the ecliptic north pole) and once
//! for the point that gets farthest **below** it (south, toward the ecliptic
//! south pole). Every operation takes the hemisphere explicitly; there is no
//! "current hemisphere" state anywhere in the crate.
//!
//! [`HemisphereSet`] stores one value per hemisphere and is indexed by
//! [`Hemisphere`], which is how the façade keeps its pair of grids and tracks.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::constants::Degree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    pub const ALL: [Hemisphere; 2] = [Hemisphere::North, Hemisphere::South];

    /// Sign applied to the `cos(ε)·z` term of the closed-form height.
    pub fn z_sign(self) -> f64 {
        match self {
            Hemisphere::North => 1.0,
            Hemisphere::South => -1.0,
        }
    }

    /// Latitude band covered by the elevation datasets and by the analytic
    /// fallback grid, as `(lat_min, lat_max)`.
    pub fn dataset_band(self) -> (Degree, Degree) {
        match self {
            Hemisphere::North => (60.0, 75.0),
            Hemisphere::South => (-75.0, -60.0),
        }
    }

    /// Latitude band bracketing the bare-ellipsoid optimum, as `(start, end)`.
    pub fn optimum_band(self) -> (Degree, Degree) {
        match self {
            Hemisphere::North => (64.0, 69.0),
            Hemisphere::South => (-69.0, -64.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Hemisphere::North => "north",
            Hemisphere::South => "south",
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One value per hemisphere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HemisphereSet<T> {
    pub north: T,
    pub south: T,
}

impl<T> HemisphereSet<T> {
    pub fn new(north: T, south: T) -> Self {
        HemisphereSet { north, south }
    }

    /// Build both entries from the same constructor.
    pub fn from_fn(mut f: impl FnMut(Hemisphere) -> T) -> Self {
        HemisphereSet {
            north: f(Hemisphere::North),
            south: f(Hemisphere::South),
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(Hemisphere, T) -> U) -> HemisphereSet<U> {
        HemisphereSet {
            north: f(Hemisphere::North, self.north),
            south: f(Hemisphere::South, self.south),
        }
    }
}

impl<T> Index<Hemisphere> for HemisphereSet<T> {
    type Output = T;

    fn index(&self, hemisphere: Hemisphere) -> &T {
        match hemisphere {
            Hemisphere::North => &self.north,
            Hemisphere::South => &self.south,
        }
    }
}

impl<T> IndexMut<Hemisphere> for HemisphereSet<T> {
    fn index_mut(&mut self, hemisphere: Hemisphere) -> &mut T {
        match hemisphere {
            Hemisphere::North => &mut self.north,
            Hemisphere::South => &mut self.south,
        }
    }
}

#[cfg(test)]
mod hemisphere_test {
    use super::*;

    #[test]
    fn test_hemisphere_set_indexing() {
        let mut set = HemisphereSet::from_fn(|h| h.label().to_string());
        assert_eq!(set[Hemisphere::North], "north");
        assert_eq!(set[Hemisphere::South], "south");

        set[Hemisphere::South].push('!');
        assert_eq!(set.south, "south!");

        let lengths = set.map(|_, s| s.len());
        assert_eq!(lengths, HemisphereSet::new(5, 6));
    }

    #[test]
    fn test_bands_are_mirrored() {
        let (n_min, n_max) = Hemisphere::North.dataset_band();
        let (s_min, s_max) = Hemisphere::South.dataset_band();
        assert_eq!((n_min, n_max), (-s_max, -s_min));

        let (n_start, n_end) = Hemisphere::North.optimum_band();
        let (s_start, s_end) = Hemisphere::South.optimum_band();
        assert_eq!((n_start, n_end), (-s_end, -s_start));
    }
}
