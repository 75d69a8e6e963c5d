//! Dashboard configuration.
//!
//! The Seoul configuration in `config/seoul.toml` is embedded at compile
//! time; `--config` replaces it with a file of the same shape.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use wifi_map_catalog::{DEFAULT_PROFILE, LoadOptions};
use wifi_map_catalog_models::{Coordinate, TextEncoding};
use wifi_map_search::SortMode;

const DEFAULT_CONFIG: &str = include_str!("../config/seoul.toml");

/// Errors from reading or applying the dashboard configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config is not valid TOML or has the wrong shape.
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The radius bounds are inconsistent.
    #[error("Invalid radius bounds: need {min_m} <= {default_m} <= {max_m}")]
    InvalidBounds {
        /// Lower bound.
        min_m: u32,
        /// Default radius.
        default_m: u32,
        /// Upper bound.
        max_m: u32,
    },

    /// A requested radius is outside the configured bounds.
    #[error("Radius {radius_m} m is outside the allowed range {min_m}-{max_m} m")]
    RadiusOutOfBounds {
        /// Requested radius.
        radius_m: u32,
        /// Lower bound.
        min_m: u32,
        /// Upper bound.
        max_m: u32,
    },
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Where and how to load the catalog.
    pub catalog: CatalogConfig,
    /// Query defaults and limits.
    pub search: SearchConfig,
    /// Origin used when a place cannot be geocoded.
    pub fallback: FallbackOrigin,
}

/// Catalog source settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Path of the catalog CSV, relative to the working directory.
    pub path: PathBuf,
    /// Declared text encoding.
    #[serde(default)]
    pub encoding: TextEncoding,
    /// Header profile id.
    #[serde(default = "default_profile")]
    pub profile: String,
    /// Keep only rows in this region.
    #[serde(default)]
    pub region: Option<String>,
}

fn default_profile() -> String {
    DEFAULT_PROFILE.to_string()
}

/// Query settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Geocoding service id (see the geocoder service registry).
    pub geocoder: String,
    /// Qualifier prefixed to every place query.
    #[serde(default)]
    pub query_region: Option<String>,
    /// Place used when the user enters nothing.
    pub default_place: String,
    /// Initial ordering.
    #[serde(default)]
    pub default_sort: SortMode,
    /// Allowed search radius.
    pub radius: RadiusBounds,
}

/// Inclusive radius limits in meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RadiusBounds {
    /// Smallest allowed radius.
    pub min_m: u32,
    /// Largest allowed radius.
    pub max_m: u32,
    /// Radius offered by default.
    pub default_m: u32,
}

impl RadiusBounds {
    /// Returns `radius_m` if it lies within the bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RadiusOutOfBounds`] otherwise.
    pub fn check(self, radius_m: u32) -> Result<u32, ConfigError> {
        if radius_m < self.min_m || radius_m > self.max_m {
            return Err(ConfigError::RadiusOutOfBounds {
                radius_m,
                min_m: self.min_m,
                max_m: self.max_m,
            });
        }
        Ok(radius_m)
    }
}

/// A named fallback position.
#[derive(Debug, Clone, Deserialize)]
pub struct FallbackOrigin {
    /// Display name.
    pub name: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl FallbackOrigin {
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl DashboardConfig {
    /// Parses and validates a config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the TOML is malformed or the radius
    /// bounds are inconsistent.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::de::from_str(text)?;
        let RadiusBounds {
            min_m,
            max_m,
            default_m,
        } = config.search.radius;
        if !(min_m <= default_m && default_m <= max_m) {
            return Err(ConfigError::InvalidBounds {
                min_m,
                default_m,
                max_m,
            });
        }
        Ok(config)
    }

    /// Loads the config from `path`, or the embedded Seoul config when
    /// `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Self::parse(DEFAULT_CONFIG);
        };
        log::debug!("Loading dashboard config from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Loader options for the configured catalog.
    #[must_use]
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::new(&self.catalog.path)
            .with_encoding(self.catalog.encoding)
            .with_profile(&self.catalog.profile)
            .with_region(self.catalog.region.clone())
    }
}
