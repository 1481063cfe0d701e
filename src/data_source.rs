use std::fmt;
use std::fs;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::apex_errors::ApexError;

/// Where a binary asset (elevation dataset or track) comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    File(Utf8PathBuf),
    /// HTTP(S) resource, fetched only with the `download` feature.
    Url(String),
}

impl DataSource {
    /// Read the whole asset into memory.
    ///
    /// Return
    /// ------
    /// * the raw bytes
    /// * [`ApexError::IoError`] for an unreadable file
    /// * [`ApexError::DownloadDisabled`] for a URL when the crate is built
    ///   without the `download` feature
    pub fn read_bytes(&self) -> Result<Vec<u8>, ApexError> {
        debug!(source = %self, "reading data source");
        match self {
            DataSource::File(path) => Ok(fs::read(path)?),
            DataSource::Url(url) => fetch(url),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{path}"),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

impl From<Utf8PathBuf> for DataSource {
    fn from(path: Utf8PathBuf) -> Self {
        DataSource::File(path)
    }
}

/// Download a binary asset.
///
/// The core is synchronous: a current-thread runtime is spun up for the
/// duration of the request.
#[cfg(feature = "download")]
fn fetch(url: &str) -> Result<Vec<u8>, ApexError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(async {
        let response = reqwest::get(url).await?.error_for_status()?;
        let bytes = response.bytes().await?;
        debug!(url, len = bytes.len(), "downloaded");
        Ok::<_, ApexError>(bytes.to_vec())
    })
}

#[cfg(not(feature = "download"))]
fn fetch(url: &str) -> Result<Vec<u8>, ApexError> {
    Err(ApexError::DownloadDisabled(url.to_string()))
}

#[cfg(test)]
mod data_source_test {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[1, 2, 3]).unwrap();
        let path = Utf8PathBuf::from_path_buf(file.path().to_path_buf()).unwrap();

        assert_eq!(DataSource::from(path).read_bytes().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_file() {
        let source = DataSource::File(Utf8PathBuf::from("/nonexistent/etopo.bin"));
        assert!(matches!(source.read_bytes(), Err(ApexError::IoError(_))));
    }

    #[test]
    #[cfg(not(feature = "download"))]
    fn test_url_without_download_feature() {
        let source = DataSource::Url("https://example.org/track_north.bin".into());
        assert_eq!(
            source.read_bytes(),
            Err(ApexError::DownloadDisabled(
                "https://example.org/track_north.bin".into()
            ))
        );
    }

    #[test]
    fn test_serde_form() {
        let source: DataSource =
            serde_json::from_str(r#"{"file": "data/track_south.bin"}"#).unwrap();
        assert_eq!(source, DataSource::File("data/track_south.bin".into()));
        assert_eq!(
            serde_json::to_string(&DataSource::Url("https://host/a.bin".into())).unwrap(),
            r#"{"url":"https://host/a.bin"}"#
        );
    }
}
