use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

pub const DEFAULT_CITY: &str = "London";
pub const GEOCODING_API: &str = "https://geocoding-api.open-meteo.com/v1";
pub const WEATHER_API: &str = "https://api.open-meteo.com/v1";

/// Map widget settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Set to `false` to run without a map widget.
    pub enabled: bool,
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    pub initial_latitude: f64,
    pub initial_longitude: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            zoom: 10,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
            initial_latitude: 51.505,
            initial_longitude: -0.09,
        }
    }
}

/// Device position reported by the host when "use my location" is requested.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

/// Top-level configuration, read from disk if present.
///
/// Example TOML:
/// ```toml
/// default_city = "Berlin"
///
/// [map]
/// zoom = 9
///
/// [location]
/// latitude = 52.52
/// longitude = 13.41
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// City loaded when the dashboard starts.
    pub default_city: String,
    pub geocoding_api: String,
    pub weather_api: String,
    pub map: MapConfig,
    /// Absent means the host cannot report its position.
    pub location: Option<LocationConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_city: DEFAULT_CITY.to_string(),
            geocoding_api: GEOCODING_API.to_string(),
            weather_api: WEATHER_API.to_string(),
            map: MapConfig::default(),
            location: None,
        }
    }
}

impl Config {
    /// Load config from the platform config dir, or defaults if there is no file yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    /// Load config from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        if cfg.default_city.trim().is_empty() {
            return Err(anyhow!("`default_city` must not be empty"));
        }
        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dash", "weather-dash")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_open_meteo_and_london() {
        let cfg = Config::default();
        assert_eq!(cfg.default_city, "London");
        assert_eq!(cfg.weather_api, "https://api.open-meteo.com/v1");
        assert_eq!(cfg.geocoding_api, "https://geocoding-api.open-meteo.com/v1");
        assert_eq!(cfg.map.zoom, 10);
        assert!(cfg.map.enabled);
        assert!(cfg.location.is_none());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml(
            r#"
            default_city = "Berlin"

            [map]
            zoom = 8

            [location]
            latitude = 52.52
            longitude = 13.41
            "#,
        )
        .expect("valid config");

        assert_eq!(cfg.default_city, "Berlin");
        assert_eq!(cfg.map.zoom, 8);
        assert_eq!(cfg.map.attribution, "© OpenStreetMap contributors");
        assert_eq!(cfg.weather_api, WEATHER_API);
        assert_eq!(cfg.location, Some(LocationConfig { latitude: 52.52, longitude: 13.41 }));
    }

    #[test]
    fn empty_default_city_is_rejected() {
        let err = Config::from_toml(r#"default_city = "  ""#).unwrap_err();
        assert!(err.to_string().contains("default_city"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("weather-dash-does-not-exist/config.toml");
        let cfg = Config::load_from(&path).expect("defaults");
        assert_eq!(cfg, Config::default());
    }
}
