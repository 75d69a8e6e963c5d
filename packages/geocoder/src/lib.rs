#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Free-text place geocoding for the wifi map.
//!
//! Resolves what a user types into a search box ("강남역", "홍대입구") to
//! a single best-match coordinate. Lookups are unreliable by nature, so
//! every failure is returned as a [`LookupFailure`] and the caller decides
//! what to fall back to.
//!
//! Providers are configured via TOML files in `services/` and loaded from
//! the [`service_registry`].

pub mod nominatim;
pub mod service_registry;

use std::future::Future;

use thiserror::Error;
use wifi_map_catalog_models::Coordinate;

/// A resolved place.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    /// Best-match position.
    pub coordinate: Coordinate,
    /// Canonical address returned by the provider, if any.
    pub display_address: Option<String>,
}

/// Why a lookup produced no coordinate.
#[derive(Debug, Error)]
pub enum LookupFailure {
    /// The query was empty after trimming.
    #[error("Empty place query")]
    EmptyQuery,

    /// The provider returned no match.
    #[error("No match for '{query}'")]
    NotFound {
        /// The query that was sent.
        query: String,
    },

    /// HTTP request failed (including timeouts).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,
}

/// A provider that resolves free-text place descriptions.
pub trait Geocoder: Send + Sync {
    /// Resolves `query` to its best match.
    ///
    /// # Errors
    ///
    /// Returns [`LookupFailure`] if the query is empty, nothing matches, or
    /// the provider cannot be reached or understood.
    fn geocode(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<GeocodedPlace, LookupFailure>> + Send;

    /// Returns the provider name for log messages.
    fn name(&self) -> &str;
}

/// Prefixes a place query with a region qualifier (e.g. `"서울"`) so that
/// ambiguous names resolve inside the region.
#[must_use]
pub fn qualify_query(region: Option<&str>, place: &str) -> String {
    let place = place.trim();
    match region.map(str::trim) {
        Some(region) if !region.is_empty() => format!("{region} {place}"),
        _ => place.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_region() {
        assert_eq!(qualify_query(Some("서울"), "강남역"), "서울 강남역");
    }

    #[test]
    fn skips_blank_or_absent_region() {
        assert_eq!(qualify_query(None, " 홍대입구 "), "홍대입구");
        assert_eq!(qualify_query(Some("  "), "홍대입구"), "홍대입구");
    }
}
