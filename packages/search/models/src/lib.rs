#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types for radius queries over a WiFi catalog.
//!
//! A [`QueryResult`] borrows the matched records from the loaded catalog.
//! It can be flattened into [`ResultRow`]s for a tabular view or into a
//! [`MapOverlay`] for a marker map; rendering either is up to the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use wifi_map_catalog_models::{Coordinate, WifiRecord};
use wifi_map_security_models::{ColorTag, SecurityAssessment, SecurityTier};

/// How matches are ordered.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum SortMode {
    /// Highest score first, then nearest first.
    #[default]
    #[strum(serialize = "security")]
    #[serde(rename = "security")]
    BySecurity,
    /// Nearest first.
    #[strum(serialize = "distance")]
    #[serde(rename = "distance")]
    ByDistance,
}

impl SortMode {
    /// Human-readable description for menus.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BySecurity => "Safety first (recommended)",
            Self::ByDistance => "Nearest first",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::BySecurity, Self::ByDistance]
    }
}

/// One record within the query radius.
#[derive(Debug, Clone, Serialize)]
pub struct Match<'a> {
    /// The matched record.
    pub record: &'a WifiRecord,
    /// Geodesic distance from the query origin in meters.
    pub distance_m: f64,
    /// Security classification of the record.
    pub assessment: SecurityAssessment,
}

/// The outcome of one radius query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult<'a> {
    /// Reference point of the query.
    pub origin: Coordinate,
    /// Inclusive search radius in meters.
    pub radius_m: f64,
    /// Ordering applied to `matches`.
    pub sort_mode: SortMode,
    /// Records with `distance_m <= radius_m`, ordered by `sort_mode`.
    pub matches: Vec<Match<'a>>,
}

/// One row of the tabular view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    /// Installation site name.
    pub place_name: String,
    /// Security status label.
    pub label: &'static str,
    /// Network name.
    pub ssid: String,
    /// Distance in meters, rounded to one decimal.
    pub distance_m: f64,
    /// Detail address.
    pub detail_address: String,
    /// Network operator.
    pub provider: String,
    /// Tier behind `label`, for colouring the status cell.
    pub tier: SecurityTier,
}

/// A marker for one matched access point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    /// Marker position.
    pub coordinate: Coordinate,
    /// Icon colour.
    pub color_tag: ColorTag,
    /// Short hover text.
    pub tooltip: String,
    /// Click-through text.
    pub popup: String,
}

/// Everything a map renderer needs to draw one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOverlay {
    /// Query origin marker position.
    pub origin: Coordinate,
    /// Radius of the circle drawn around the origin, in meters.
    pub radius_m: f64,
    /// One marker per match, in result order.
    pub markers: Vec<MapMarker>,
}

/// Rounds a distance to one decimal place for display.
#[must_use]
pub fn round_distance(distance_m: f64) -> f64 {
    (distance_m * 10.0).round() / 10.0
}

impl Match<'_> {
    /// Flattens the match into a table row.
    #[must_use]
    pub fn to_row(&self) -> ResultRow {
        ResultRow {
            place_name: self.record.place_name.clone(),
            label: self.assessment.label,
            ssid: self.record.ssid.clone(),
            distance_m: round_distance(self.distance_m),
            detail_address: self.record.detail_address.clone(),
            provider: self.record.provider.clone(),
            tier: self.assessment.tier,
        }
    }

    /// Builds the map marker for the match.
    #[must_use]
    pub fn to_marker(&self) -> MapMarker {
        let place = &self.record.place_name;
        let label = self.assessment.label;
        MapMarker {
            coordinate: self.record.coordinate(),
            color_tag: self.assessment.color_tag,
            tooltip: format!("{place} ({label})"),
            popup: format!("{place} / SSID: {} / status: {label}", self.record.ssid),
        }
    }
}

impl QueryResult<'_> {
    /// Number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether nothing was within the radius.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Table rows in result order.
    #[must_use]
    pub fn table_rows(&self) -> Vec<ResultRow> {
        self.matches.iter().map(Match::to_row).collect()
    }

    /// Map overlay for the query.
    #[must_use]
    pub fn map_overlay(&self) -> MapOverlay {
        MapOverlay {
            origin: self.origin,
            radius_m: self.radius_m,
            markers: self.matches.iter().map(Match::to_marker).collect(),
        }
    }

    /// Number of matches per tier.
    #[must_use]
    pub fn summary(&self) -> BTreeMap<SecurityTier, usize> {
        let mut counts = BTreeMap::new();
        for m in &self.matches {
            *counts.entry(m.assessment.tier).or_insert(0) += 1;
        }
        counts
    }
}
