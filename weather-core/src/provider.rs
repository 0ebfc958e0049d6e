use crate::{
    Config,
    error::Result,
    model::{Place, WeatherSnapshot},
    provider::{forecast::OpenMeteoForecast, geocoding::OpenMeteoGeocoder},
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod forecast;
pub mod geocoding;

/// Resolves free text or coordinates to a [`Place`].
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Best single match for `name`; `NotFound` when nothing matches.
    async fn resolve_by_name(&self, name: &str) -> Result<Place>;

    /// Reverse lookup. Missing optional fields never fail the call.
    async fn resolve_by_coordinates(&self, latitude: f64, longitude: f64) -> Result<Place>;
}

/// Fetches current, hourly and daily weather for a coordinate pair.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_snapshot(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot>;
}

/// Construct both Open-Meteo clients from the configured endpoints.
pub fn providers_from_config(config: &Config) -> (Arc<dyn Geocoder>, Arc<dyn ForecastProvider>) {
    let geocoder: Arc<dyn Geocoder> = Arc::new(OpenMeteoGeocoder::new(config.geocoding_api.clone()));
    let forecast: Arc<dyn ForecastProvider> =
        Arc::new(OpenMeteoForecast::new(config.weather_api.clone()));

    (geocoder, forecast)
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}
