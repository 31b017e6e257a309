//! Storage key value object
//!
//! Object path under which one ingestion run is written, derived from the
//! UTC instant of the run.
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use domain::value_objects::StorageKey;
//!
//! let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
//! let key = StorageKey::for_instant(at);
//! assert_eq!(key.as_str(), "raw/2024/03/07/openmeteo_20240307T090502Z.csv");
//! ```

use chrono::{DateTime, Utc};
use std::fmt;

/// Blob key of the form `raw/YYYY/MM/DD/openmeteo_YYYYMMDDTHHMMSSZ.csv`
///
/// Keys have second granularity, so two runs within the same UTC second
/// map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Top-level folder for raw ingests
    pub const PREFIX: &'static str = "raw";

    /// File name stem preceding the timestamp
    pub const FILE_STEM: &'static str = "openmeteo";

    /// File extension
    pub const EXTENSION: &'static str = "csv";

    /// Content type the object is stored with
    pub const CONTENT_TYPE: &'static str = "text/csv";

    /// Derive the key for a run at the given instant
    ///
    /// The same instant drives both the date folder and the file name.
    #[must_use]
    pub fn for_instant(at: DateTime<Utc>) -> Self {
        Self(format!(
            "{}/{}/{}_{}.{}",
            Self::PREFIX,
            at.format("%Y/%m/%d"),
            Self::FILE_STEM,
            at.format("%Y%m%dT%H%M%SZ"),
            Self::EXTENSION
        ))
    }

    /// Get the key as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dated folder part, e.g. `2024/03/07`
    #[must_use]
    pub fn date_path(&self) -> &str {
        let rest = self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0);
        let rest = rest.trim_start_matches('/');
        rest.rsplit_once('/').map_or(rest, |(folder, _)| folder)
    }

    /// File name part, e.g. `openmeteo_20240307T090502Z.csv`
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0.rsplit_once('/').map_or(&self.0, |(_, name)| name)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
