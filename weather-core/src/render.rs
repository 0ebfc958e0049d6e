//! View renderer: snapshot + place in, display fragments out.
//!
//! Every function here is pure and returns a complete [`Fragment`] that
//! replaces whatever its region showed before. Missing payload sections
//! degrade to an error or empty fragment, never a panic.

use std::fmt;

use chrono::NaiveDate;

use crate::conditions::Conditions;
use crate::lookup;
use crate::model::{DailyEntry, Place, WeatherSnapshot};

/// Future days shown in the forecast list; index 0 (today) is skipped.
pub const FORECAST_DAYS: usize = 5;

pub const CONDITIONS_HEADING: &str = "Weather Conditions";

/// Content of one display region.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Fragment {
    #[default]
    Empty,
    Error(String),
    Current(CurrentPanel),
    Forecast(Vec<ForecastRow>),
    Conditions(ConditionsPanel),
}

impl Fragment {
    pub fn is_empty(&self) -> bool {
        match self {
            Fragment::Empty => true,
            Fragment::Forecast(rows) => rows.is_empty(),
            _ => false,
        }
    }

    pub fn forecast_rows(&self) -> &[ForecastRow] {
        match self {
            Fragment::Forecast(rows) => rows,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailItem {
    pub label: &'static str,
    pub value: String,
}

impl DetailItem {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self { label, value: value.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentPanel {
    pub title: String,
    pub icon: &'static str,
    pub temperature: String,
    pub description: &'static str,
    pub details: [DetailItem; 6],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub label: String,
    pub icon: &'static str,
    pub max: String,
    pub min: String,
    pub description: &'static str,
    pub precipitation: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionsPanel {
    pub items: [DetailItem; 4],
}

/// Current-conditions panel.
///
/// `wall_clock_is_day` is only consulted when the payload has no `is_day` flag.
pub fn render_current(snapshot: &WeatherSnapshot, place: &Place, wall_clock_is_day: bool) -> Fragment {
    let Some(current) = &snapshot.current else {
        return Fragment::Error("Invalid weather data".to_string());
    };

    let is_day = current.is_day.map(|flag| flag != 0).unwrap_or(wall_clock_is_day);

    Fragment::Current(CurrentPanel {
        title: place.title(),
        icon: lookup::icon(current.weather_code, is_day),
        temperature: format!("{}°C", round_half_up(current.temperature_2m)),
        description: lookup::description(current.weather_code),
        details: [
            DetailItem::new("Feels Like", format!("{}°C", round_half_up(current.apparent_temperature))),
            DetailItem::new("Humidity", format!("{}%", number(current.relative_humidity_2m))),
            DetailItem::new("Wind Speed", format!("{} km/h", number(current.wind_speed_10m))),
            DetailItem::new("Pressure", format!("{} hPa", round_half_up(current.pressure_msl))),
            DetailItem::new("Cloud Cover", format!("{}%", number(current.cloud_cover))),
            DetailItem::new("Precipitation", format!("{} mm", number(current.precipitation))),
        ],
    })
}

/// Up to [`FORECAST_DAYS`] rows, starting with tomorrow (daily index 1).
pub fn render_forecast(snapshot: &WeatherSnapshot) -> Fragment {
    let Some(daily) = &snapshot.daily else {
        return Fragment::Empty;
    };

    let rows = (1..=FORECAST_DAYS)
        .map_while(|i| daily.day(i))
        .map(forecast_row)
        .collect();

    Fragment::Forecast(rows)
}

fn forecast_row(day: DailyEntry) -> ForecastRow {
    ForecastRow {
        date: day.date,
        label: day.date.format("%a, %b %-d").to_string(),
        icon: lookup::icon(day.weather_code, true),
        max: format!("{}°", round_half_up(day.temperature_max)),
        min: format!("{}°", round_half_up(day.temperature_min)),
        description: lookup::description(day.weather_code),
        precipitation: match day.precipitation_probability {
            Some(p) => format!("💧 {}%", number(p)),
            None => "💧 n/a".to_string(),
        },
    }
}

pub fn render_conditions(snapshot: &WeatherSnapshot) -> Fragment {
    let Some(current) = &snapshot.current else {
        return Fragment::Empty;
    };

    let c = Conditions::classify(current);
    Fragment::Conditions(ConditionsPanel {
        items: [
            DetailItem::new("Visibility", c.visibility.as_str()),
            DetailItem::new("UV Risk", c.uv_risk.as_str()),
            DetailItem::new("Outdoor Activity", c.outdoor_activity.as_str()),
            DetailItem::new("Wind Direction", c.wind_direction),
        ],
    })
}

/// Half-up rounding, so -2.5 becomes -2 rather than -3.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Raw payload number without a trailing `.0`.
fn number(value: f64) -> String {
    if value == 0.0 { "0".to_string() } else { value.to_string() }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Empty => Ok(()),
            Fragment::Error(message) => writeln!(f, "Error: {message}"),
            Fragment::Current(panel) => {
                writeln!(f, "{}", panel.title)?;
                writeln!(f, "{}  {}  {}", panel.icon, panel.temperature, panel.description)?;
                for item in &panel.details {
                    writeln!(f, "  {:<14} {}", item.label, item.value)?;
                }
                Ok(())
            }
            Fragment::Forecast(rows) => {
                for row in rows {
                    writeln!(
                        f,
                        "{:<12} {}  {:>4} / {:<4} {:<30} {}",
                        row.label, row.icon, row.max, row.min, row.description, row.precipitation
                    )?;
                }
                Ok(())
            }
            Fragment::Conditions(panel) => {
                writeln!(f, "{CONDITIONS_HEADING}")?;
                for item in &panel.items {
                    writeln!(f, "  {:<17} {}", item.label, item.value)?;
                }
                Ok(())
            }
        }
    }
}
