//! The orchestrator: wires user actions to the geocode → forecast → render
//! pipeline and owns the display state.
//!
//! Pipelines are not cancelled. Each one takes a generation token when it
//! starts; only the newest generation may write to the surface, so a slow
//! response can never overwrite a newer one.

use std::sync::Arc;

use chrono::Timelike;
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

use crate::{
    Config,
    error::{DashboardError, Result},
    geolocation::{Geolocator, geolocator_from_config},
    lookup,
    model::{Place, PlaceQuery, WeatherSnapshot},
    provider::{ForecastProvider, Geocoder, providers_from_config},
    render,
    surface::{Region, RenderSurface},
};

/// What the dashboard currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayState {
    #[default]
    Idle,
    Loading,
    Rendered { place: Place, snapshot: WeatherSnapshot },
    Error(String),
}

#[derive(Debug)]
struct Inner<S> {
    surface: S,
    state: DisplayState,
    generation: u64,
}

pub struct Dashboard<S> {
    geocoder: Arc<dyn Geocoder>,
    forecast: Arc<dyn ForecastProvider>,
    geolocator: Option<Arc<dyn Geolocator>>,
    local_hour: fn() -> u32,
    inner: Mutex<Inner<S>>,
}

fn wall_clock_hour() -> u32 {
    chrono::Local::now().hour()
}

impl<S: RenderSurface> Dashboard<S> {
    pub fn new(geocoder: Arc<dyn Geocoder>, forecast: Arc<dyn ForecastProvider>, surface: S) -> Self {
        Self {
            geocoder,
            forecast,
            geolocator: None,
            local_hour: wall_clock_hour,
            inner: Mutex::new(Inner { surface, state: DisplayState::Idle, generation: 0 }),
        }
    }

    /// Open-Meteo providers plus the configured device position, if any.
    pub fn from_config(config: &Config, surface: S) -> Self {
        let (geocoder, forecast) = providers_from_config(config);
        Self::new(geocoder, forecast, surface).with_geolocator(geolocator_from_config(config))
    }

    pub fn with_geolocator(mut self, geolocator: Option<Arc<dyn Geolocator>>) -> Self {
        self.geolocator = geolocator;
        self
    }

    /// Source of the local hour used for the day/night icon fallback.
    pub fn with_clock(mut self, local_hour: fn() -> u32) -> Self {
        self.local_hour = local_hour;
        self
    }

    pub fn state(&self) -> DisplayState {
        self.inner.lock().state.clone()
    }

    pub fn surface(&self) -> MappedMutexGuard<'_, S> {
        MutexGuard::map(self.inner.lock(), |inner| &mut inner.surface)
    }

    /// Search from the text box. Blank input does nothing.
    pub async fn search(&self, text: &str) {
        let query = text.trim();
        if query.is_empty() {
            tracing::debug!("ignoring empty search");
            return;
        }
        self.run(PlaceQuery::Name(query.to_string())).await;
    }

    /// The "use my location" action.
    pub async fn use_my_location(&self) {
        let Some(geolocator) = &self.geolocator else {
            tracing::warn!("geolocation capability not present");
            let token = self.begin();
            self.finish(token, Err(DashboardError::GeolocationUnsupported), false);
            return;
        };

        let token = self.begin();
        let position = match geolocator.current_position().await {
            Ok(position) => position,
            Err(e) => {
                tracing::warn!("geolocation failed: {e}");
                self.finish(token, Err(DashboardError::GeolocationDenied), false);
                return;
            }
        };

        let result = self
            .load(&PlaceQuery::Coordinates {
                latitude: position.latitude,
                longitude: position.longitude,
            })
            .await;
        self.finish(token, result, true);
    }

    async fn run(&self, query: PlaceQuery) {
        let token = self.begin();
        let result = self.load(&query).await;
        self.finish(token, result, false);
    }

    async fn load(&self, query: &PlaceQuery) -> Result<(Place, WeatherSnapshot)> {
        match query {
            PlaceQuery::Name(name) => {
                let place = self.geocoder.resolve_by_name(name).await?;
                let snapshot = self.forecast.fetch_snapshot(place.latitude, place.longitude).await?;
                Ok((place, snapshot))
            }
            PlaceQuery::Coordinates { latitude, longitude } => {
                let snapshot = self.forecast.fetch_snapshot(*latitude, *longitude).await?;
                let place = self.geocoder.resolve_by_coordinates(*latitude, *longitude).await?;
                Ok((place, snapshot))
            }
        }
    }

    /// Take a new generation and switch to Loading.
    fn begin(&self) -> u64 {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.state = DisplayState::Loading;
        inner.surface.show_loading();
        inner.generation
    }

    fn finish(&self, token: u64, result: Result<(Place, WeatherSnapshot)>, backfill: bool) {
        let mut inner = self.inner.lock();
        if token != inner.generation {
            tracing::debug!(token, latest = inner.generation, "discarding stale pipeline result");
            return;
        }

        match result {
            Ok((place, snapshot)) => {
                let is_day = lookup::is_daytime_hour((self.local_hour)());
                let surface = &mut inner.surface;

                surface.set_notice(None);
                surface.replace(Region::Current, render::render_current(&snapshot, &place, is_day));
                surface.replace(Region::Forecast, render::render_forecast(&snapshot));
                surface.replace(Region::Conditions, render::render_conditions(&snapshot));
                surface.map().show(place.latitude, place.longitude);
                if backfill {
                    surface.set_search_text(place.search_text());
                }

                tracing::info!(place = %place.title(), "dashboard rendered");
                inner.state = DisplayState::Rendered { place, snapshot };
            }
            Err(e) => {
                tracing::error!("error loading weather: {e} ({e:?})");
                let message = e.to_string();
                inner.surface.show_error(&message);
                inner.state = DisplayState::Error(message);
            }
        }
    }
}
