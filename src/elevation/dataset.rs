//! Binary elevation dataset codec.
//!
//! Layout (all little-endian):
//!
//! ```text
//! offset  size  field
//!      0     4  lat_min  (f32)
//!      4     4  lat_max  (f32)
//!      8     4  lon_min  (f32)
//!     12     4  lon_max  (f32)
//!     16     4  rows     (i32)
//!     20     4  cols     (i32)
//!     24  2·n   elevations (i16), row-major, south→north, west→east
//! ```
//!
//! with `n = rows · cols`. Decoding fails when the payload does not hold
//! exactly `n` samples.

use std::fs;

use camino::Utf8Path;
use nom::{
    multi::count,
    number::complete::{le_f32, le_i16, le_i32},
    IResult,
};

use crate::apex_errors::ApexError;
use crate::constants::Degree;

/// Size in bytes of the fixed dataset header.
pub const DATASET_HEADER_LEN: usize = 24;

/// Raw 24-byte header, as stored on disk.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct DatasetHeader {
    pub lat_min: f32,
    pub lat_max: f32,
    pub lon_min: f32,
    pub lon_max: f32,
    pub rows: i32,
    pub cols: i32,
}

impl DatasetHeader {
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, lat_min) = le_f32(input)?;
        let (input, lat_max) = le_f32(input)?;
        let (input, lon_min) = le_f32(input)?;
        let (input, lon_max) = le_f32(input)?;
        let (input, rows) = le_i32(input)?;
        let (input, cols) = le_i32(input)?;
        Ok((
            input,
            DatasetHeader {
                lat_min,
                lat_max,
                lon_min,
                lon_max,
                rows,
                cols,
            },
        ))
    }
}

/// A regular latitude/longitude elevation grid for one hemisphere band.
///
/// Samples are stored row-major, rows running south to north and columns west
/// to east. Every constructor checks `rows · cols == elevations.len()` and
/// finite, strictly increasing bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationDataset {
    pub(crate) lat_min: Degree,
    pub(crate) lat_max: Degree,
    pub(crate) lon_min: Degree,
    pub(crate) lon_max: Degree,
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) elevations: Vec<i16>,
}

impl ElevationDataset {
    /// Build a dataset, checking its dimensions against the sample count.
    ///
    /// Errors
    /// ------
    /// * [`ApexError::InvalidGridDimensions`] if `rows` or `cols` is below 2
    ///   (the grid spacing would be undefined).
    /// * [`ApexError::InvalidGridBounds`] if a bound is not finite or a
    ///   maximum does not exceed its minimum.
    /// * [`ApexError::DatasetSizeMismatch`] if `rows · cols != elevations.len()`.
    pub fn new(
        lat_min: Degree,
        lat_max: Degree,
        lon_min: Degree,
        lon_max: Degree,
        rows: usize,
        cols: usize,
        elevations: Vec<i16>,
    ) -> Result<Self, ApexError> {
        if rows < 2 || cols < 2 {
            return Err(ApexError::InvalidGridDimensions {
                rows: rows as i64,
                cols: cols as i64,
            });
        }
        let finite = [lat_min, lat_max, lon_min, lon_max]
            .iter()
            .all(|b| b.is_finite());
        if !finite || lat_max <= lat_min || lon_max <= lon_min {
            return Err(ApexError::InvalidGridBounds {
                lat_min,
                lat_max,
                lon_min,
                lon_max,
            });
        }
        if rows * cols != elevations.len() {
            return Err(ApexError::DatasetSizeMismatch {
                expected: rows * cols,
                actual: elevations.len(),
            });
        }
        Ok(ElevationDataset {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
            rows,
            cols,
            elevations,
        })
    }

    pub fn len(&self) -> usize {
        self.elevations.len()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(lat_min, lat_max, lon_min, lon_max)` in degrees.
    pub fn bounds(&self) -> (Degree, Degree, Degree, Degree) {
        (self.lat_min, self.lat_max, self.lon_min, self.lon_max)
    }

    /// Samples in storage order.
    pub fn elevations(&self) -> &[i16] {
        &self.elevations
    }

    pub fn is_empty(&self) -> bool {
        self.elevations.is_empty()
    }

    pub fn lat_step(&self) -> Degree {
        (self.lat_max - self.lat_min) / (self.rows - 1) as f64
    }

    pub fn lon_step(&self) -> Degree {
        (self.lon_max - self.lon_min) / (self.cols - 1) as f64
    }

    /// Index of the cell nearest to `(lat, lon)`, or `None` outside the grid.
    ///
    /// Row and column are obtained by rounding `(lat - lat_min) / lat_step` and
    /// `(lon - lon_min) / lon_step` to the nearest integer.
    pub fn cell_index(&self, lat: Degree, lon: Degree) -> Option<usize> {
        let row = nearest_index((lat - self.lat_min) / self.lat_step(), self.rows)?;
        let col = nearest_index((lon - self.lon_min) / self.lon_step(), self.cols)?;
        Some(row * self.cols + col)
    }

    /// Decode a dataset from its binary representation.
    ///
    /// Errors
    /// ------
    /// * [`ApexError::DatasetParsingError`] if the header is truncated.
    /// * [`ApexError::InvalidGridDimensions`] for negative or degenerate dimensions.
    /// * [`ApexError::InvalidGridBounds`] for NaN, infinite or collapsed bounds.
    /// * [`ApexError::DatasetSizeMismatch`] if the payload does not hold `rows · cols` samples.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ApexError> {
        let (payload, header) = DatasetHeader::parse(bytes)
            .map_err(|e| ApexError::DatasetParsingError(e.to_string()))?;

        if header.rows < 2 || header.cols < 2 {
            return Err(ApexError::InvalidGridDimensions {
                rows: header.rows as i64,
                cols: header.cols as i64,
            });
        }

        let expected = header.rows as usize * header.cols as usize;
        if payload.len() != 2 * expected {
            return Err(ApexError::DatasetSizeMismatch {
                expected,
                actual: payload.len() / 2,
            });
        }

        let (_, elevations) = count(le_i16::<_, nom::error::Error<&[u8]>>, expected)(payload)
            .map_err(|e| ApexError::DatasetParsingError(e.to_string()))?;

        ElevationDataset::new(
            header.lat_min as f64,
            header.lat_max as f64,
            header.lon_min as f64,
            header.lon_max as f64,
            header.rows as usize,
            header.cols as usize,
            elevations,
        )
    }

    /// Encode the dataset in the binary layout read by [`ElevationDataset::from_bytes`].
    ///
    /// Bounds are narrowed to `f32`.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(DATASET_HEADER_LEN + 2 * self.elevations.len());
        for bound in [self.lat_min, self.lat_max, self.lon_min, self.lon_max] {
            out.extend_from_slice(&(bound as f32).to_le_bytes());
        }
        out.extend_from_slice(&(self.rows as i32).to_le_bytes());
        out.extend_from_slice(&(self.cols as i32).to_le_bytes());
        for e in &self.elevations {
            out.extend_from_slice(&e.to_le_bytes());
        }
        out
    }

    pub fn read(path: &Utf8Path) -> Result<Self, ApexError> {
        let bytes = fs::read(path)?;
        ElevationDataset::from_bytes(&bytes)
    }

    pub fn write(&self, path: &Utf8Path) -> Result<(), ApexError> {
        fs::write(path, self.encode())?;
        Ok(())
    }
}

/// Round a fractional grid coordinate and keep it only if it lands in `[0, len)`.
pub(crate) fn nearest_index(fractional: f64, len: usize) -> Option<usize> {
    let idx = fractional.round();
    if !idx.is_finite() || idx < 0.0 || idx >= len as f64 {
        return None;
    }
    Some(idx as usize)
}
