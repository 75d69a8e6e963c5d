#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Public WiFi catalog loader.
//!
//! Reads a delimited export of public WiFi access points, maps its
//! source-specific headers onto the six semantic fields of a
//! [`WifiRecord`] via a [`profile::HeaderProfile`], fills absent network
//! names and operators with [`UNKNOWN_SENTINEL`], and drops any row whose
//! coordinates do not coerce to finite numbers.
//!
//! Loading is a pure function of the file contents and the
//! [`LoadOptions`], so results can be memoized by the caller with a
//! [`cache::CatalogCache`].

pub mod cache;
pub mod decode;
pub mod loader;
pub mod profile;
pub mod progress;

use std::path::{Path, PathBuf};

use thiserror::Error;
use wifi_map_catalog_models::{TextEncoding, WifiRecord};

pub use wifi_map_catalog_models::UNKNOWN_SENTINEL;

/// Default header profile used when none is specified.
pub const DEFAULT_PROFILE: &str = "public_wifi_kr";

/// Errors that abort a catalog load. No partial catalog is produced.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The catalog path does not exist.
    #[error("Catalog file not found: {}", .path.display())]
    FileNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The file bytes are not valid in the declared encoding.
    #[error("Could not decode {} as {encoding}", .path.display())]
    Decode {
        /// Path that was requested.
        path: PathBuf,
        /// Encoding the caller declared for the file.
        encoding: TextEncoding,
    },

    /// The header row lacks columns the profile requires.
    #[error("Missing expected columns: {}", .missing.join(", "))]
    Schema {
        /// Source header names that were not found.
        missing: Vec<String>,
    },

    /// No header profile is registered under the requested id.
    #[error("Unknown header profile: {id}")]
    UnknownProfile {
        /// The requested profile id.
        id: String,
    },

    /// I/O error other than a missing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The delimited text is structurally malformed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// A data row has more fields than the header, or too few to reach
    /// its coordinate columns (typically an unterminated quote).
    #[error("Malformed row at line {line}: {fields} fields, header has {expected}")]
    Malformed {
        /// 1-based line on which the row starts.
        line: u64,
        /// Number of fields read.
        fields: usize,
        /// Number of header fields.
        expected: usize,
    },
}

/// Everything that determines the outcome of a load besides the file
/// contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Path of the catalog file.
    pub path: PathBuf,
    /// Declared text encoding of the file.
    pub encoding: TextEncoding,
    /// Header profile id (see [`profile::all_profiles`]).
    pub profile: String,
    /// Keep only rows whose region column equals this value.
    pub region: Option<String>,
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl LoadOptions {
    /// Creates options for a UTF-8, comma-delimited file using the
    /// [`DEFAULT_PROFILE`] and no region filter.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            encoding: TextEncoding::Utf8,
            profile: DEFAULT_PROFILE.to_string(),
            region: None,
            delimiter: b',',
        }
    }

    /// Sets the declared text encoding.
    #[must_use]
    pub const fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the header profile id.
    #[must_use]
    pub fn with_profile(mut self, profile: &str) -> Self {
        profile.clone_into(&mut self.profile);
        self
    }

    /// Restricts the catalog to rows in the given region.
    #[must_use]
    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    /// Sets the field delimiter (e.g. `b'\t'` for TSV exports).
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// A loaded, immutable catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    /// Surviving records in file order.
    pub records: Vec<WifiRecord>,
    /// Options the catalog was loaded with.
    pub options: LoadOptions,
    /// Rows dropped because a coordinate was missing or non-numeric.
    pub dropped_rows: usize,
    /// Rows skipped by the region filter.
    pub outside_region: usize,
}

impl Catalog {
    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Loads the records of a catalog file with the [`DEFAULT_PROFILE`] and no
/// region filter.
///
/// # Errors
///
/// Returns [`LoadError::FileNotFound`] if the path does not exist,
/// [`LoadError::Decode`] if the bytes are not valid `encoding`, and
/// [`LoadError::Schema`] if expected header fields are missing.
pub fn load(path: &Path, encoding: TextEncoding) -> Result<Vec<WifiRecord>, LoadError> {
    let options = LoadOptions::new(path).with_encoding(encoding);
    let catalog = loader::load_catalog(&options, &progress::NullProgress)?;
    Ok(catalog.records)
}
