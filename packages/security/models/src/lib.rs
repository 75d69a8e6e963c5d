#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Security tier types for public WiFi access points.
//!
//! A [`SecurityTier`] is a coarse trust estimate derived from an access
//! point's network name and operator. Each tier has a fixed score used for
//! ranking, a human-readable label, and a [`ColorTag`] hint for map
//! markers.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Discrete security classification of an access point.
#[derive(
    Debug,
    Clone,
    Copy,
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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityTier {
    /// Network name indicates an encrypted network.
    Safe,
    /// Named network with no strong signal either way.
    Moderate,
    /// Network name indicates an open or guest network.
    Open,
    /// No network name, but a major carrier operates it.
    UnknownLikelyModerate,
    /// No network name and no recognised carrier.
    UnknownLikelyLow,
}

impl SecurityTier {
    /// Ranking score; higher is more trusted.
    #[must_use]
    pub const fn score(self) -> u8 {
        match self {
            Self::Safe => 3,
            Self::Moderate | Self::UnknownLikelyModerate => 2,
            Self::Open => 1,
            Self::UnknownLikelyLow => 0,
        }
    }

    /// Human-readable status label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Safe => "secure (encrypted)",
            Self::Moderate => "general (verify manually)",
            Self::Open => "caution (open network)",
            Self::UnknownLikelyModerate => "no SSID info (assumed: moderate)",
            Self::UnknownLikelyLow => "no SSID info (assumed: low)",
        }
    }

    /// Marker colour for this tier.
    #[must_use]
    pub const fn color_tag(self) -> ColorTag {
        match self {
            Self::Safe => ColorTag::Green,
            Self::Moderate => ColorTag::Orange,
            Self::Open => ColorTag::Red,
            Self::UnknownLikelyModerate | Self::UnknownLikelyLow => ColorTag::Gray,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Safe,
            Self::Moderate,
            Self::Open,
            Self::UnknownLikelyModerate,
            Self::UnknownLikelyLow,
        ]
    }
}

/// Presentation hint for markers and status cells.
#[derive(
    Debug,
    Clone,
    Copy,
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColorTag {
    /// Secure networks.
    Green,
    /// Networks to verify manually.
    Orange,
    /// Open networks.
    Red,
    /// Networks without an SSID.
    Gray,
}

/// The classification of one access point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SecurityAssessment {
    /// Assigned tier.
    pub tier: SecurityTier,
    /// Ranking score (see [`SecurityTier::score`]).
    pub score: u8,
    /// Human-readable status.
    pub label: &'static str,
    /// Marker colour.
    pub color_tag: ColorTag,
}

impl From<SecurityTier> for SecurityAssessment {
    fn from(tier: SecurityTier) -> Self {
        Self {
            tier,
            score: tier.score(),
            label: tier.label(),
            color_tag: tier.color_tag(),
        }
    }
}
