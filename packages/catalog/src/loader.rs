//! Catalog file parsing and normalization.

use std::io::ErrorKind;

use csv::StringRecord;
use wifi_map_catalog_models::{UNKNOWN_SENTINEL, WifiRecord};

use crate::decode::decode_strict;
use crate::profile::{HeaderProfile, find_profile};
use crate::progress::ProgressCallback;
use crate::{Catalog, LoadError, LoadOptions};

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    ssid: usize,
    provider: usize,
    latitude: usize,
    longitude: usize,
    place_name: usize,
    detail_address: usize,
    region: Option<usize>,
}

impl ColumnIndex {
    /// Resolves every profile column against the header row.
    fn resolve(headers: &[String], profile: &HeaderProfile) -> Result<Self, LoadError> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let columns = &profile.columns;
        let [ssid, provider, latitude, longitude, place_name, detail_address] =
            columns.required().map(position);

        let missing: Vec<String> = columns
            .required()
            .into_iter()
            .zip([ssid, provider, latitude, longitude, place_name, detail_address])
            .filter(|(_, found)| found.is_none())
            .map(|(name, _)| name.to_string())
            .collect();

        let (
            Some(ssid),
            Some(provider),
            Some(latitude),
            Some(longitude),
            Some(place_name),
            Some(detail_address),
        ) = (ssid, provider, latitude, longitude, place_name, detail_address)
        else {
            return Err(LoadError::Schema { missing });
        };

        Ok(Self {
            ssid,
            provider,
            latitude,
            longitude,
            place_name,
            detail_address,
            region: columns.region.as_deref().and_then(position),
        })
    }
}

/// Loads and normalizes a catalog file.
///
/// Rows whose latitude or longitude is missing or does not parse as a
/// finite number are dropped and counted in [`Catalog::dropped_rows`].
///
/// # Errors
///
/// * [`LoadError::FileNotFound`] if the path does not exist
/// * [`LoadError::Decode`] if the bytes are invalid in the declared encoding
/// * [`LoadError::Schema`] if required header columns are missing
/// * [`LoadError::UnknownProfile`] if the profile id is not registered
/// * [`LoadError::Csv`] if the delimited structure is malformed
/// * [`LoadError::Malformed`] if a row is longer than the header or too
///   short to hold its coordinates
pub fn load_catalog(
    options: &LoadOptions,
    progress: &dyn ProgressCallback,
) -> Result<Catalog, LoadError> {
    let profile = find_profile(&options.profile)?;

    let bytes = std::fs::read(&options.path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::FileNotFound {
            path: options.path.clone(),
        },
        _ => LoadError::Io(e),
    })?;

    log::debug!(
        "Read {} bytes from {} (declared {})",
        bytes.len(),
        options.path.display(),
        options.encoding
    );

    let text = decode_strict(&bytes, options.encoding).ok_or_else(|| LoadError::Decode {
        path: options.path.clone(),
        encoding: options.encoding,
    })?;

    progress.set_message(format!("Parsing {}", options.path.display()));

    let mut catalog = parse_catalog(&text, &profile, options, progress)?;
    catalog.records.shrink_to_fit();

    log::info!(
        "Loaded {} WiFi records from {} ({} dropped for bad coordinates, {} outside region)",
        catalog.len(),
        options.path.display(),
        catalog.dropped_rows,
        catalog.outside_region
    );
    progress.finish(format!("Loaded {} WiFi records", catalog.len()));

    Ok(catalog)
}

/// Parses decoded catalog text against a header profile.
fn parse_catalog(
    text: &str,
    profile: &HeaderProfile,
    options: &LoadOptions,
    progress: &dyn ProgressCallback,
) -> Result<Catalog, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    let index = ColumnIndex::resolve(&headers, profile)?;

    let region_filter = match (&options.region, index.region) {
        (Some(region), Some(column)) => Some((region.as_str(), column)),
        (Some(region), None) => {
            log::warn!(
                "Region filter '{region}' requested but {} has no region column; keeping all rows",
                options.path.display()
            );
            None
        }
        (None, _) => None,
    };

    let mut records = Vec::new();
    let mut dropped_rows = 0;
    let mut outside_region = 0;

    let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
    progress.set_total(rows.len() as u64);

    let min_fields = index.latitude.max(index.longitude) + 1;
    for (row_no, row) in rows.into_iter().enumerate() {
        if row.len() > headers.len() || row.len() < min_fields {
            return Err(LoadError::Malformed {
                line: row.position().map_or(0, csv::Position::line),
                fields: row.len(),
                expected: headers.len(),
            });
        }
        progress.inc(1);

        if let Some((region, column)) = region_filter
            && row.get(column) != Some(region)
        {
            outside_region += 1;
            continue;
        }

        match normalize_row(row_no, &row, &index) {
            Some(record) => records.push(record),
            None => {
                log::trace!("Dropping row {row_no}: non-numeric coordinates");
                dropped_rows += 1;
            }
        }
    }

    Ok(Catalog {
        records,
        options: options.clone(),
        dropped_rows,
        outside_region,
    })
}

/// Converts one CSV row into a record, or `None` if a coordinate does not
/// coerce.
fn normalize_row(row_no: usize, row: &StringRecord, index: &ColumnIndex) -> Option<WifiRecord> {
    let latitude = parse_coordinate(row.get(index.latitude))?;
    let longitude = parse_coordinate(row.get(index.longitude))?;

    Some(WifiRecord {
        id: row_no,
        ssid: text_or_unknown(row.get(index.ssid)),
        provider: text_or_unknown(row.get(index.provider)),
        latitude,
        longitude,
        place_name: row.get(index.place_name).unwrap_or_default().to_owned(),
        detail_address: row.get(index.detail_address).unwrap_or_default().to_owned(),
    })
}

/// Parses a coordinate cell. Missing, non-numeric and non-finite values
/// (`nan`, `inf`) are all treated as absent.
fn parse_coordinate(cell: Option<&str>) -> Option<f64> {
    cell?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn text_or_unknown(cell: Option<&str>) -> String {
    match cell {
        Some(value) if !value.is_empty() => value.to_owned(),
        _ => UNKNOWN_SENTINEL.to_owned(),
    }
}
