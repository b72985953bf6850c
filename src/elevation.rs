use geo_types::Coord;
use serde::Deserialize;

use crate::batch;
use crate::error::ExtractError;

const GOOGLE_MAPS_BASE_URL: &str = "https://maps.googleapis.com";

/// One elevation lookup result. The location is the one echoed by the
/// service, not the submitted coordinate; the echoed values are what end up
/// in the document, matching what the website exports.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationSample {
    pub lat: f64,
    pub lng: f64,
    pub elevation: f64,
}

/// Batch elevation lookup, order-preserving: one sample per submitted
/// coordinate, in submission order.
pub trait ElevationProvider {
    fn elevations(&self, batch: &[Coord<f64>]) -> Result<Vec<ElevationSample>, ExtractError>;
}

/// Google Maps Elevation API client.
pub struct GoogleElevation {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl GoogleElevation {
    pub fn new(
        api_key: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, ExtractError> {
        Self::with_base_url(GOOGLE_MAPS_BASE_URL, api_key, timeout)
    }

    /// Custom base URL, for testing or proxying.
    pub fn with_base_url(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, ExtractError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ElevationResponse {
    status: String,
    #[serde(default)]
    results: Vec<ElevationResult>,
}

#[derive(Debug, Deserialize)]
struct ElevationResult {
    elevation: f64,
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

impl ElevationProvider for GoogleElevation {
    fn elevations(&self, batch: &[Coord<f64>]) -> Result<Vec<ElevationSample>, ExtractError> {
        let url = format!("{}/maps/api/elevation/json", self.base_url);
        let locations = batch::render_locations(batch);

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("locations", locations.as_str())])
            .send()?;

        let http_status = response.status();
        if !http_status.is_success() {
            return Err(ExtractError::Lookup(format!(
                "elevation service returned HTTP {http_status}"
            )));
        }

        let body: ElevationResponse = response.json()?;
        if body.status != "OK" {
            return Err(ExtractError::Lookup(format!(
                "elevation service returned status {}",
                body.status
            )));
        }
        tracing::debug!(points = body.results.len(), "fetched elevation batch");

        Ok(body
            .results
            .into_iter()
            .map(|result| ElevationSample {
                lat: result.location.lat,
                lng: result.location.lng,
                elevation: result.elevation,
            })
            .collect())
    }
}
