//! Nominatim / `OpenStreetMap` geocoder client.
//!
//! The public instance allows at most **1 request per second** and requires
//! an identifying `User-Agent`. Interactive use stays well under that limit.
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/>

use std::time::Duration;

use wifi_map_catalog_models::Coordinate;

use crate::{
    GeocodedPlace, Geocoder, LookupFailure,
    service_registry::{GeocodingService, ProviderConfig},
};

/// Free-form search against a Nominatim endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    name: String,
    client: reqwest::Client,
    base_url: String,
    country_codes: Option<String>,
}

impl NominatimGeocoder {
    /// Builds a client from a registry entry.
    ///
    /// # Errors
    ///
    /// Returns [`LookupFailure::Http`] if the HTTP client cannot be built.
    pub fn from_service(service: &GeocodingService) -> Result<Self, LookupFailure> {
        let ProviderConfig::Nominatim {
            user_agent,
            country_codes,
            timeout_ms,
            ..
        } = &service.provider;

        let client = reqwest::Client::builder()
            .user_agent(user_agent.as_str())
            .timeout(Duration::from_millis(*timeout_ms))
            .build()?;

        Ok(Self {
            name: service.name.clone(),
            client,
            base_url: service.base_url().to_string(),
            country_codes: country_codes.clone(),
        })
    }
}

impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> Result<GeocodedPlace, LookupFailure> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LookupFailure::EmptyQuery);
        }

        let mut params = vec![("q", query), ("format", "jsonv2"), ("limit", "1")];
        if let Some(codes) = self.country_codes.as_deref() {
            params.push(("countrycodes", codes));
        }

        log::debug!("Nominatim lookup: {query}");
        let resp = self.client.get(&self.base_url).query(&params).send().await?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LookupFailure::RateLimited);
        }

        let body: serde_json::Value = resp.error_for_status()?.json().await?;
        parse_response(&body)?.ok_or_else(|| LookupFailure::NotFound {
            query: query.to_string(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Parses a Nominatim `jsonv2` response, keeping the first hit.
fn parse_response(body: &serde_json::Value) -> Result<Option<GeocodedPlace>, LookupFailure> {
    let results = body.as_array().ok_or_else(|| LookupFailure::Parse {
        message: "Nominatim response is not an array".to_string(),
    })?;

    let Some(first) = results.first() else {
        return Ok(None);
    };

    let lat = parse_degrees(first, "lat")?;
    let lon = parse_degrees(first, "lon")?;

    Ok(Some(GeocodedPlace {
        coordinate: Coordinate::new(lat, lon),
        display_address: first["display_name"].as_str().map(String::from),
    }))
}

fn parse_degrees(hit: &serde_json::Value, field: &str) -> Result<f64, LookupFailure> {
    hit[field]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .ok_or_else(|| LookupFailure::Parse {
            message: format!("Missing {field} in Nominatim response"),
        })
}
