//! Core library for the `weather-dash` dashboard.
//!
//! This crate defines:
//! - Configuration loading
//! - Geocoding and forecast clients over the Open-Meteo HTTP API
//! - Lookup tables and the derived-conditions classifier
//! - The view renderer, map adapter and rendering surface
//! - The [`Dashboard`] orchestrator that ties them together
//!
//! It is used by `weather-dash-cli`, but any host that implements
//! [`RenderSurface`] can drive it.

pub mod conditions;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod geolocation;
pub mod lookup;
pub mod map;
pub mod model;
pub mod provider;
pub mod render;
pub mod surface;

pub use config::{Config, LocationConfig, MapConfig};
pub use dashboard::{Dashboard, DisplayState};
pub use error::DashboardError;
pub use geolocation::{FixedPosition, GeolocationError, Geolocator};
pub use map::{LatLon, MapHandle, MapWidget, OsmMap};
pub use model::{Place, PlaceQuery, WeatherSnapshot};
pub use provider::{ForecastProvider, Geocoder};
pub use render::Fragment;
pub use surface::{Notice, Region, RenderSurface, Screen};
