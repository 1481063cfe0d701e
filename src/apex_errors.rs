use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApexError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Error during the elevation dataset parsing: {0}")]
    DatasetParsingError(String),

    #[error("Elevation payload holds {actual} samples, header announces {expected}")]
    DatasetSizeMismatch { expected: usize, actual: usize },

    #[error("Invalid elevation grid dimensions: {rows} rows × {cols} cols")]
    InvalidGridDimensions { rows: i64, cols: i64 },

    #[error("Invalid elevation grid bounds: lat [{lat_min}, {lat_max}], lon [{lon_min}, {lon_max}]")]
    InvalidGridBounds {
        lat_min: f64,
        lat_max: f64,
        lon_min: f64,
        lon_max: f64,
    },

    #[error("Error during the track file parsing: {0}")]
    TrackParsingError(String),

    #[error("Track payload holds {actual} records, header announces {expected}")]
    TrackSizeMismatch { expected: usize, actual: usize },

    #[error("Remote data source requested but the download feature is disabled: {0}")]
    DownloadDisabled(String),

    #[cfg(feature = "download")]
    #[error("HTTP reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(#[from] serde_json::Error),

    #[error("Invalid configuration value for {field}: {value}")]
    InvalidConfigValue { field: &'static str, value: f64 },
}

impl PartialEq for ApexError {
    fn eq(&self, other: &Self) -> bool {
        use ApexError::*;
        match (self, other) {
            // wrapped errors are not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,
            #[cfg(feature = "download")]
            (ReqwestError(_), ReqwestError(_)) => true,
            (ConfigError(_), ConfigError(_)) => true,

            (DatasetParsingError(a), DatasetParsingError(b)) => a == b,
            (
                DatasetSizeMismatch {
                    expected: e1,
                    actual: a1,
                },
                DatasetSizeMismatch {
                    expected: e2,
                    actual: a2,
                },
            ) => e1 == e2 && a1 == a2,
            (
                InvalidGridDimensions { rows: r1, cols: c1 },
                InvalidGridDimensions { rows: r2, cols: c2 },
            ) => r1 == r2 && c1 == c2,
            (
                InvalidGridBounds {
                    lat_min: a1,
                    lat_max: b1,
                    lon_min: c1,
                    lon_max: d1,
                },
                InvalidGridBounds {
                    lat_min: a2,
                    lat_max: b2,
                    lon_min: c2,
                    lon_max: d2,
                },
            ) => a1 == a2 && b1 == b2 && c1 == c2 && d1 == d2,
            (TrackParsingError(a), TrackParsingError(b)) => a == b,
            (
                TrackSizeMismatch {
                    expected: e1,
                    actual: a1,
                },
                TrackSizeMismatch {
                    expected: e2,
                    actual: a2,
                },
            ) => e1 == e2 && a1 == a2,
            (DownloadDisabled(a), DownloadDisabled(b)) => a == b,
            (
                InvalidConfigValue {
                    field: f1,
                    value: v1,
                },
                InvalidConfigValue {
                    field: f2,
                    value: v2,
                },
            ) => f1 == f2 && v1 == v2,

            _ => false,
        }
    }
}
