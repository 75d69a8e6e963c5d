#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Radius filter and ranker for public WiFi access points.
//!
//! Each query is an independent linear pass over the loaded records:
//! measure the geodesic distance from the origin, keep records within the
//! (inclusive) radius, classify them, and order them by the requested
//! [`SortMode`]. Sorting is stable, so ties keep file order.

pub mod distance;

use std::cmp::Ordering;

use wifi_map_catalog_models::{Coordinate, WifiRecord};
use wifi_map_security::classify_record;

pub use wifi_map_search_models::{
    MapMarker, MapOverlay, Match, QueryResult, ResultRow, SortMode, round_distance,
};

/// Finds every record within `radius_m` meters of `origin`.
///
/// An empty result is not an error. A `radius_m` that is negative or NaN
/// matches nothing.
#[must_use]
pub fn search(
    records: &[WifiRecord],
    origin: Coordinate,
    radius_m: f64,
    sort_mode: SortMode,
) -> QueryResult<'_> {
    let mut matches: Vec<Match<'_>> = records
        .iter()
        .filter_map(|record| {
            let distance_m = distance::geodesic_m(origin, record.coordinate());
            (distance_m <= radius_m).then(|| Match {
                record,
                distance_m,
                assessment: classify_record(record),
            })
        })
        .collect();

    sort_matches(&mut matches, sort_mode);

    log::debug!(
        "{} of {} records within {radius_m} m of {origin} (sorted {sort_mode})",
        matches.len(),
        records.len()
    );

    QueryResult {
        origin,
        radius_m,
        sort_mode,
        matches,
    }
}

/// Orders matches in place. The sort is stable.
pub fn sort_matches(matches: &mut [Match<'_>], sort_mode: SortMode) {
    match sort_mode {
        SortMode::BySecurity => matches.sort_by(by_security),
        SortMode::ByDistance => matches.sort_by(by_distance),
    }
}

fn by_distance(a: &Match<'_>, b: &Match<'_>) -> Ordering {
    a.distance_m.total_cmp(&b.distance_m)
}

fn by_security(a: &Match<'_>, b: &Match<'_>) -> Ordering {
    b.assessment
        .score
        .cmp(&a.assessment.score)
        .then_with(|| by_distance(a, b))
}
