//! One user's query session: catalog cache, geocoder, and fallback policy.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use wifi_map_catalog::{Catalog, LoadError, cache::CatalogCache, progress::ProgressCallback};
use wifi_map_catalog_models::Coordinate;
use wifi_map_geocoder::{Geocoder, qualify_query};
use wifi_map_search::{MapOverlay, ResultRow, SortMode, search};
use wifi_map_security_models::SecurityTier;

use crate::config::{ConfigError, DashboardConfig};

/// Errors that abort a single query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The request violates the dashboard config.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The catalog could not be loaded.
    #[error("Could not load WiFi data: {0}")]
    Load(#[from] LoadError),
}

/// Where a query was centred.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedOrigin {
    /// Coordinate used as the query origin.
    pub coordinate: Coordinate,
    /// Address reported by the geocoder, if the lookup succeeded.
    pub display_address: Option<String>,
    /// Set when the fallback origin was substituted.
    pub warning: Option<String>,
}

/// Everything produced by one query, detached from the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    /// Place text as entered.
    pub place: String,
    /// Resolved query origin.
    pub origin: ResolvedOrigin,
    /// Search radius in meters.
    pub radius_m: u32,
    /// Ordering of `rows`.
    pub sort_mode: SortMode,
    /// Records in the catalog that was searched.
    pub catalog_size: usize,
    /// Matches in result order.
    pub rows: Vec<ResultRow>,
    /// Marker map for the matches.
    pub overlay: MapOverlay,
    /// Number of matches per tier.
    pub summary: BTreeMap<SecurityTier, usize>,
}

pub struct Session<G> {
    config: DashboardConfig,
    cache: CatalogCache,
    geocoder: G,
}

impl<G: Geocoder> Session<G> {
    #[must_use]
    pub fn new(config: DashboardConfig, geocoder: G) -> Self {
        Self {
            config,
            cache: CatalogCache::new(),
            geocoder,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Loads the configured catalog, reusing the cached copy if the file
    /// is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the catalog cannot be loaded.
    pub fn catalog(&mut self, progress: &dyn ProgressCallback) -> Result<Arc<Catalog>, LoadError> {
        let options = self.config.load_options();
        self.cache.get_or_load(&options, progress)
    }

    /// Geocodes `place`, substituting the fallback origin on any failure.
    pub async fn resolve_origin(&self, place: &str) -> ResolvedOrigin {
        let query = qualify_query(self.config.search.query_region.as_deref(), place);

        match self.geocoder.geocode(&query).await {
            Ok(found) => {
                log::info!("Resolved '{query}' to {}", found.coordinate);
                ResolvedOrigin {
                    coordinate: found.coordinate,
                    display_address: found.display_address,
                    warning: None,
                }
            }
            Err(failure) => {
                let fallback = &self.config.fallback;
                log::warn!(
                    "{} lookup for '{query}' failed ({failure}); using {}",
                    self.geocoder.name(),
                    fallback.name
                );
                ResolvedOrigin {
                    coordinate: fallback.coordinate(),
                    display_address: None,
                    warning: Some(format!(
                        "Could not find '{place}', showing {} instead",
                        fallback.name
                    )),
                }
            }
        }
    }

    /// Runs one query: load the catalog, resolve the origin, then filter
    /// and rank the records within `radius_m`.
    ///
    /// A blank `place` uses the configured default place.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Config`] if `radius_m` is outside the
    /// configured bounds and [`QueryError::Load`] if the catalog cannot be
    /// loaded. Geocoding failures are not errors.
    pub async fn run_query(
        &mut self,
        place: &str,
        radius_m: u32,
        sort_mode: SortMode,
        progress: &dyn ProgressCallback,
    ) -> Result<QueryReport, QueryError> {
        let radius_m = self.config.search.radius.check(radius_m)?;
        let catalog = self.catalog(progress)?;

        let place = match place.trim() {
            "" => self.config.search.default_place.clone(),
            trimmed => trimmed.to_string(),
        };
        let origin = self.resolve_origin(&place).await;

        let result = search(
            &catalog.records,
            origin.coordinate,
            f64::from(radius_m),
            sort_mode,
        );

        Ok(QueryReport {
            place,
            radius_m,
            sort_mode,
            catalog_size: catalog.len(),
            rows: result.table_rows(),
            overlay: result.map_overlay(),
            summary: result.summary(),
            origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use wifi_map_catalog::progress::NullProgress;
    use wifi_map_geocoder::{GeocodedPlace, LookupFailure};

    use super::*;

    const GANGNAM: Coordinate = Coordinate::new(37.4979, 127.0276);

    struct StubGeocoder {
        hit: Option<Coordinate>,
        queries: Mutex<Vec<String>>,
    }

    impl StubGeocoder {
        fn new(hit: Option<Coordinate>) -> Self {
            Self {
                hit,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    impl Geocoder for StubGeocoder {
        async fn geocode(&self, query: &str) -> Result<GeocodedPlace, LookupFailure> {
            self.queries.lock().unwrap().push(query.to_string());
            self.hit
                .map(|coordinate| GeocodedPlace {
                    coordinate,
                    display_address: Some(format!("{query}, 대한민국")),
                })
                .ok_or_else(|| LookupFailure::NotFound {
                    query: query.to_string(),
                })
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    const CSV: &str = "\
번호,설치장소명,설치장소상세,설치시도명,서비스제공사명,와이파이SSID,WGS84위도,WGS84경도
1,서울시청,1층 로비,서울특별시,KT,SEOUL_Secure,37.5665,126.9780
2,시청광장,광장,서울특별시,SKT,Free_WiFi,37.5662,126.9779
3,덕수궁,대한문,서울특별시,LGU+,,37.5658,126.9751
4,강남역,2번 출구,서울특별시,KT,iptime,37.4979,127.0276
5,부산역,광장,부산광역시,KT,SEOUL_Secure,35.1152,129.0422
";

    fn session(dir: &tempfile::TempDir, hit: Option<Coordinate>) -> Session<StubGeocoder> {
        let path = dir.path().join("wifi.csv");
        std::fs::write(&path, CSV).unwrap();
        let mut config = DashboardConfig::load(None).unwrap();
        config.catalog.path = path;
        Session::new(config, StubGeocoder::new(hit))
    }

    #[tokio::test]
    async fn geocoded_place_centres_the_query() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir, Some(GANGNAM));

        let report = session
            .run_query("강남역", 500, SortMode::BySecurity, &NullProgress)
            .await
            .unwrap();

        assert!(report.origin.warning.is_none());
        assert_eq!(report.origin.coordinate, GANGNAM);
        assert_eq!(report.catalog_size, 4);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].place_name, "강남역");
        assert_eq!(
            session.geocoder.queries.lock().unwrap().as_slice(),
            ["서울 강남역"]
        );
    }

    #[tokio::test]
    async fn lookup_failure_falls_back_to_city_hall() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir, None);

        let report = session
            .run_query("없는장소", 500, SortMode::BySecurity, &NullProgress)
            .await
            .unwrap();

        assert!(report.origin.warning.as_deref().unwrap().contains("서울시청"));
        assert_eq!(report.origin.coordinate, Coordinate::new(37.5665, 126.978));

        let places: Vec<&str> = report.rows.iter().map(|r| r.place_name.as_str()).collect();
        assert_eq!(places, ["서울시청", "덕수궁", "시청광장"]);
        assert_eq!(report.summary.get(&SecurityTier::Safe), Some(&1));
        assert_eq!(report.overlay.markers.len(), 3);
    }

    #[tokio::test]
    async fn blank_place_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir, Some(GANGNAM));

        let report = session
            .run_query("   ", 500, SortMode::ByDistance, &NullProgress)
            .await
            .unwrap();

        assert_eq!(report.place, "서울시청");
        assert_eq!(
            session.geocoder.queries.lock().unwrap().as_slice(),
            ["서울 서울시청"]
        );
    }

    #[tokio::test]
    async fn rejects_radius_outside_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir, Some(GANGNAM));

        let err = session
            .run_query("강남역", 5000, SortMode::BySecurity, &NullProgress)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            QueryError::Config(ConfigError::RadiusOutOfBounds { .. })
        ));
        assert!(session.geocoder.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_catalog_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir, Some(GANGNAM));
        session.config.catalog.path = dir.path().join("missing.csv");

        let err = session
            .run_query("강남역", 500, SortMode::BySecurity, &NullProgress)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            QueryError::Load(LoadError::FileNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn repeated_queries_reuse_the_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir, Some(GANGNAM));

        let first = session.catalog(&NullProgress).unwrap();
        let second = session.catalog(&NullProgress).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
