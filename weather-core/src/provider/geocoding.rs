use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{DashboardError, Result},
    model::{Place, UNKNOWN_PLACE_NAME},
};

use super::{Geocoder, endpoint};

const SEARCH_FAILED: &str = "Failed to search for city";

/// Open-Meteo geocoding client.
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    base_url: String,
    http: Client,
}

impl OpenMeteoGeocoder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http: Client::new() }
    }

    async fn lookup(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<GeoResult>> {
        let url = endpoint(&self.base_url, path);
        tracing::debug!(%url, ?query, "geocoding request");

        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| DashboardError::network(SEARCH_FAILED, e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| DashboardError::network(SEARCH_FAILED, e))?;

        if !status.is_success() {
            return Err(DashboardError::status(SEARCH_FAILED, status, &body));
        }

        let parsed: GeoResponse = serde_json::from_str(&body)
            .map_err(|e| DashboardError::MalformedResponse(format!("geocoding payload: {e}")))?;

        Ok(parsed.results.unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: Option<String>,
    city: Option<String>,
    country: Option<String>,
    admin1: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl GeoResult {
    fn display_name(&self) -> Option<String> {
        [&self.name, &self.city]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .cloned()
    }

    fn into_place(self, latitude: f64, longitude: f64) -> Place {
        let name = self.display_name().unwrap_or_else(|| UNKNOWN_PLACE_NAME.to_string());
        Place {
            name,
            country: self.country.unwrap_or_default(),
            region: self.admin1.filter(|r| !r.is_empty()),
            latitude,
            longitude,
        }
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    async fn resolve_by_name(&self, name: &str) -> Result<Place> {
        let results = self
            .lookup(
                "search",
                &[
                    ("name", name.to_string()),
                    ("count", "1".to_string()),
                    ("language", "en".to_string()),
                    ("format", "json".to_string()),
                ],
            )
            .await?;

        let first = results
            .into_iter()
            .next()
            .ok_or_else(|| DashboardError::NotFound { query: name.to_string() })?;

        let (Some(latitude), Some(longitude)) = (first.latitude, first.longitude) else {
            return Err(DashboardError::MalformedResponse(format!(
                "geocoding result for '{name}' has no coordinates"
            )));
        };

        let place = first.into_place(latitude, longitude);
        tracing::info!(place = %place.title(), latitude, longitude, "resolved city");
        Ok(place)
    }

    async fn resolve_by_coordinates(&self, latitude: f64, longitude: f64) -> Result<Place> {
        let results = self
            .lookup(
                "reverse",
                &[
                    ("latitude", latitude.to_string()),
                    ("longitude", longitude.to_string()),
                    ("format", "json".to_string()),
                ],
            )
            .await?;

        let first = results.into_iter().next().ok_or_else(|| DashboardError::NotFound {
            query: format!("{latitude}, {longitude}"),
        })?;

        let place = first.into_place(latitude, longitude);
        tracing::info!(place = %place.title(), "reverse geocoded position");
        Ok(place)
    }
}
