#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Public WiFi access point records and coordinate types.
//!
//! A [`WifiRecord`] is one row of a public WiFi catalog after header
//! normalization. Records are immutable once loaded and always carry
//! numeric WGS84 coordinates: rows that fail coordinate coercion never
//! become records.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Placeholder written into `ssid` and `provider` when the source cell is
/// empty.
pub const UNKNOWN_SENTINEL: &str = "Unknown";

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude in degrees.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// One physical public WiFi access point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WifiRecord {
    /// Zero-based position of the data row in the source file (header
    /// excluded). Dropped rows leave gaps.
    pub id: usize,
    /// Network name, or [`UNKNOWN_SENTINEL`] when absent.
    pub ssid: String,
    /// Network operator, or [`UNKNOWN_SENTINEL`] when absent.
    pub provider: String,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Installation site name (e.g. a station or park).
    pub place_name: String,
    /// Free-form detail address of the installation site.
    pub detail_address: String,
}

impl WifiRecord {
    /// Returns the record's position as a [`Coordinate`].
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Whether the SSID was missing in the source file.
    #[must_use]
    pub fn has_unknown_ssid(&self) -> bool {
        is_unknown_ssid(&self.ssid)
    }
}

/// Whether an SSID value means "no network name": empty, or exactly
/// [`UNKNOWN_SENTINEL`] (case-sensitive).
#[must_use]
pub fn is_unknown_ssid(ssid: &str) -> bool {
    ssid.is_empty() || ssid == UNKNOWN_SENTINEL
}

/// Text encoding a catalog file is declared to be written in.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum TextEncoding {
    /// UTF-8 (a leading byte-order mark is tolerated).
    #[default]
    #[serde(rename = "utf-8", alias = "utf8")]
    #[strum(to_string = "utf-8", serialize = "utf8", ascii_case_insensitive)]
    Utf8,
    /// Windows code page 949, the legacy 8-bit Korean encoding (a superset
    /// of EUC-KR).
    #[serde(rename = "cp949", alias = "euc-kr")]
    #[strum(to_string = "cp949", serialize = "euc-kr", ascii_case_insensitive)]
    Cp949,
}
