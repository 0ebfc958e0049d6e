use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What a single pipeline was asked to resolve.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceQuery {
    Name(String),
    Coordinates { latitude: f64, longitude: f64 },
}

/// Name given to a reverse-geocoded place that has neither a name nor a city.
pub const UNKNOWN_PLACE_NAME: &str = "Unknown";

/// A resolved named location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub country: String,
    pub region: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    /// Heading shown above the current conditions: `name[, region][, country]`.
    pub fn title(&self) -> String {
        let name = if self.name.is_empty() { "Unknown Location" } else { self.name.as_str() };

        let mut title = name.to_string();
        for part in [self.region.as_deref().unwrap_or(""), self.country.as_str()] {
            if !part.is_empty() {
                title.push_str(", ");
                title.push_str(part);
            }
        }
        title
    }

    /// Text to put back into the search box; blank when the name is only a placeholder.
    pub fn search_text(&self) -> &str {
        if self.name == UNKNOWN_PLACE_NAME { "" } else { &self.name }
    }
}

/// One fetched forecast payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(default)]
    pub current: Option<CurrentConditions>,
    #[serde(default)]
    pub hourly: Option<HourlySeries>,
    #[serde(default)]
    pub daily: Option<DailySeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_2m: f64,
    pub apparent_temperature: f64,
    pub relative_humidity_2m: f64,
    pub precipitation: f64,
    pub weather_code: i32,
    pub cloud_cover: f64,
    pub pressure_msl: f64,
    pub wind_speed_10m: f64,
    pub wind_direction_10m: f64,
    /// Location-local day flag (1 = day); absent in older payloads.
    #[serde(default)]
    pub is_day: Option<u8>,
}

/// Hourly arrays are fetched with the snapshot but never rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability: Vec<Option<f64>>,
    #[serde(default)]
    pub weather_code: Vec<Option<i32>>,
}

/// Parallel daily arrays; index 0 is today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub time: Vec<NaiveDate>,
    pub weather_code: Vec<i32>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub precipitation_probability_max: Vec<Option<f64>>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Every array has the same length as `time`.
    pub fn is_aligned(&self) -> bool {
        let n = self.time.len();
        self.weather_code.len() == n
            && self.temperature_2m_max.len() == n
            && self.temperature_2m_min.len() == n
            && self.precipitation_probability_max.len() == n
    }

    pub fn day(&self, index: usize) -> Option<DailyEntry> {
        Some(DailyEntry {
            date: *self.time.get(index)?,
            weather_code: *self.weather_code.get(index)?,
            temperature_max: *self.temperature_2m_max.get(index)?,
            temperature_min: *self.temperature_2m_min.get(index)?,
            precipitation_probability: *self.precipitation_probability_max.get(index)?,
        })
    }
}

/// A single row view over [`DailySeries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub weather_code: i32,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub precipitation_probability: Option<f64>,
}
