use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::{DashboardError, Result},
    model::WeatherSnapshot,
};

use super::{ForecastProvider, endpoint};

const FETCH_FAILED: &str = "Failed to fetch weather data";

pub const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,precipitation,weather_code,cloud_cover,pressure_msl,wind_speed_10m,wind_direction_10m,is_day";
pub const HOURLY_FIELDS: &str = "temperature_2m,precipitation_probability,weather_code";
pub const DAILY_FIELDS: &str =
    "weather_code,temperature_2m_max,temperature_2m_min,precipitation_probability_max";

/// Metric only: Celsius, km/h, mm. Pressure is always hPa.
const UNITS: [(&str, &str); 3] =
    [("temperature_unit", "celsius"), ("wind_speed_unit", "kmh"), ("precipitation_unit", "mm")];

/// Open-Meteo forecast client.
#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    base_url: String,
    http: Client,
}

impl OpenMeteoForecast {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http: Client::new() }
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoForecast {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn fetch_snapshot(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot> {
        let url = endpoint(&self.base_url, "forecast");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .query(&UNITS[..])
            .send()
            .await
            .map_err(|e| DashboardError::network(FETCH_FAILED, e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| DashboardError::network(FETCH_FAILED, e))?;

        if !status.is_success() {
            return Err(DashboardError::status(FETCH_FAILED, status, &body));
        }

        let snapshot: WeatherSnapshot = serde_json::from_str(&body)
            .map_err(|e| DashboardError::MalformedResponse(format!("forecast payload: {e}")))?;

        validate(&snapshot)?;
        Ok(snapshot)
    }
}

fn validate(snapshot: &WeatherSnapshot) -> Result<()> {
    if snapshot.current.is_none() {
        return Err(DashboardError::MalformedResponse("missing current section".into()));
    }
    if let Some(daily) = &snapshot.daily {
        if !daily.is_aligned() {
            return Err(DashboardError::MalformedResponse(
                "daily arrays differ in length".into(),
            ));
        }
    }
    Ok(())
}
