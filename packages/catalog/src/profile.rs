//! Compile-time registry of catalog header profiles.
//!
//! Public WiFi exports name their columns differently depending on who
//! published them. Each profile is a TOML file under `profiles/` that maps
//! the source header names onto the semantic fields of a `WifiRecord`.

use serde::Deserialize;

use crate::LoadError;

/// A header naming scheme for one family of catalog files.
#[derive(Debug, Clone, Deserialize)]
pub struct HeaderProfile {
    /// Unique identifier (e.g., `"public_wifi_kr"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Source header names for each field.
    pub columns: ColumnMapping,
}

/// Source header names for the fields of a `WifiRecord`.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMapping {
    /// Network name column.
    pub ssid: String,
    /// Network operator column.
    pub provider: String,
    /// WGS84 latitude column.
    pub latitude: String,
    /// WGS84 longitude column.
    pub longitude: String,
    /// Installation site name column.
    pub place_name: String,
    /// Installation detail address column.
    pub detail_address: String,
    /// Province/city column used by the region filter. Optional in both
    /// the profile and the file.
    #[serde(default)]
    pub region: Option<String>,
}

impl ColumnMapping {
    /// Header names that must be present in the file, in field order.
    #[must_use]
    pub fn required(&self) -> [&str; 6] {
        [
            self.ssid.as_str(),
            self.provider.as_str(),
            self.latitude.as_str(),
            self.longitude.as_str(),
            self.place_name.as_str(),
            self.detail_address.as_str(),
        ]
    }
}

// ── Compile-time embedded TOML files ────────────────────────────────

const PROFILE_TOMLS: &[(&str, &str)] = &[
    (
        "public_wifi_kr",
        include_str!("../profiles/public_wifi_kr.toml"),
    ),
    ("normalized", include_str!("../profiles/normalized.toml")),
];

#[cfg(test)]
const EXPECTED_PROFILE_COUNT: usize = 2;

/// Returns every registered header profile.
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time guarantee
/// since the configs are embedded).
#[must_use]
pub fn all_profiles() -> Vec<HeaderProfile> {
    PROFILE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse header profile '{name}': {e}"))
        })
        .collect()
}

/// Looks up a header profile by id.
///
/// # Errors
///
/// Returns [`LoadError::UnknownProfile`] if no profile has that id.
pub fn find_profile(id: &str) -> Result<HeaderProfile, LoadError> {
    all_profiles()
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| LoadError::UnknownProfile { id: id.to_string() })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn loads_all_profiles() {
        assert_eq!(all_profiles().len(), EXPECTED_PROFILE_COUNT);
    }

    #[test]
    fn profile_ids_are_unique_and_match_registry_names() {
        let mut seen = BTreeSet::new();
        for ((name, _), profile) in PROFILE_TOMLS.iter().zip(all_profiles()) {
            assert_eq!(*name, profile.id);
            assert!(seen.insert(profile.id.clone()), "Duplicate id {}", profile.id);
        }
    }

    #[test]
    fn required_columns_are_non_empty() {
        for profile in all_profiles() {
            for column in profile.columns.required() {
                assert!(!column.is_empty(), "Profile {} has empty column", profile.id);
            }
        }
    }

    #[test]
    fn finds_default_profile() {
        let profile = find_profile(crate::DEFAULT_PROFILE).unwrap();
        assert_eq!(profile.columns.latitude, "WGS84위도");
        assert_eq!(profile.columns.region.as_deref(), Some("설치시도명"));
    }

    #[test]
    fn rejects_unknown_profile() {
        let err = find_profile("nope").unwrap_err();
        assert!(matches!(err, LoadError::UnknownProfile { id } if id == "nope"));
    }
}
