//! Map adapter: one widget, at most one marker, never fatal.

use std::fmt;

use anyhow::{Result, anyhow};

use crate::config::MapConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLon {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// The external map widget. Implementations may fail on any call; the
/// adapter logs and carries on.
pub trait MapWidget: Send + fmt::Debug {
    fn set_view(&mut self, center: LatLon, zoom: u8) -> Result<()>;
    fn add_tile_layer(&mut self, url_template: &str, attribution: &str) -> Result<()>;
    fn add_marker(&mut self, at: LatLon) -> Result<MarkerId>;
    fn remove_marker(&mut self, id: MarkerId) -> Result<()>;

    fn view(&self) -> Option<(LatLon, u8)>;
    fn markers(&self) -> Vec<LatLon>;
    fn attribution(&self) -> Option<&str>;
}

/// Owns the widget (if any) and the single marker placed through it.
#[derive(Debug)]
pub enum MapHandle {
    Available {
        widget: Box<dyn MapWidget>,
        marker: Option<MarkerId>,
        zoom: u8,
    },
    Unavailable,
}

impl MapHandle {
    /// Attach the tile layer and initial view. Any problem leaves the handle
    /// `Unavailable` with a warning.
    pub fn init(widget: Option<Box<dyn MapWidget>>, config: &MapConfig) -> Self {
        let Some(mut widget) = widget.filter(|_| config.enabled) else {
            tracing::warn!("map widget not available, skipping map initialization");
            return Self::Unavailable;
        };

        let initial = LatLon::new(config.initial_latitude, config.initial_longitude);
        let setup = widget
            .set_view(initial, config.zoom)
            .and_then(|_| widget.add_tile_layer(&config.tile_url, &config.attribution));

        match setup {
            Ok(()) => Self::Available { widget, marker: None, zoom: config.zoom },
            Err(e) => {
                tracing::warn!("error initializing map: {e:#}");
                Self::Unavailable
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }

    pub fn center(&mut self, latitude: f64, longitude: f64) {
        let Self::Available { widget, zoom, .. } = self else {
            return;
        };
        if let Err(e) = widget.set_view(LatLon::new(latitude, longitude), *zoom) {
            tracing::warn!("error centering map: {e:#}");
        }
    }

    /// Replace the marker. If the old one cannot be removed the new one is
    /// not added, so the widget never shows two.
    pub fn place_marker(&mut self, latitude: f64, longitude: f64) {
        let Self::Available { widget, marker, .. } = self else {
            return;
        };

        if let Some(old) = *marker {
            if let Err(e) = widget.remove_marker(old) {
                tracing::warn!("error removing previous marker: {e:#}");
                return;
            }
            *marker = None;
        }

        match widget.add_marker(LatLon::new(latitude, longitude)) {
            Ok(id) => *marker = Some(id),
            Err(e) => tracing::warn!("error adding marker: {e:#}"),
        }
    }

    /// Center on the place and move the marker there.
    pub fn show(&mut self, latitude: f64, longitude: f64) {
        self.center(latitude, longitude);
        self.place_marker(latitude, longitude);
    }

    pub fn view(&self) -> Option<(LatLon, u8)> {
        match self {
            Self::Available { widget, .. } => widget.view(),
            Self::Unavailable => None,
        }
    }

    pub fn markers(&self) -> Vec<LatLon> {
        match self {
            Self::Available { widget, .. } => widget.markers(),
            Self::Unavailable => Vec::new(),
        }
    }
}

impl fmt::Display for MapHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self::Available { widget, .. } = self else {
            return writeln!(f, "Map unavailable");
        };
        match widget.view() {
            Some((center, zoom)) => {
                let pin = widget.markers().first().copied().unwrap_or(center);
                writeln!(
                    f,
                    "https://www.openstreetmap.org/?mlat={:.4}&mlon={:.4}#map={}/{:.4}/{:.4}",
                    pin.latitude, pin.longitude, zoom, center.latitude, center.longitude
                )?;
            }
            None => writeln!(f, "Map not positioned")?,
        }
        if let Some(attribution) = widget.attribution() {
            writeln!(f, "{attribution}")?;
        }
        Ok(())
    }
}

/// In-memory slippy map: tracks view, tile layer and markers the way a
/// browser widget would, and renders as an OpenStreetMap permalink.
#[derive(Debug, Default)]
pub struct OsmMap {
    view: Option<(LatLon, u8)>,
    tile_layer: Option<(String, String)>,
    markers: Vec<(MarkerId, LatLon)>,
    next_id: u64,
}

impl OsmMap {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapWidget for OsmMap {
    fn set_view(&mut self, center: LatLon, zoom: u8) -> Result<()> {
        if !(-90.0..=90.0).contains(&center.latitude) || !center.longitude.is_finite() {
            return Err(anyhow!("invalid map center {center:?}"));
        }
        self.view = Some((center, zoom));
        Ok(())
    }

    fn add_tile_layer(&mut self, url_template: &str, attribution: &str) -> Result<()> {
        self.tile_layer = Some((url_template.to_string(), attribution.to_string()));
        Ok(())
    }

    fn add_marker(&mut self, at: LatLon) -> Result<MarkerId> {
        self.next_id += 1;
        let id = MarkerId(self.next_id);
        self.markers.push((id, at));
        Ok(id)
    }

    fn remove_marker(&mut self, id: MarkerId) -> Result<()> {
        let before = self.markers.len();
        self.markers.retain(|(m, _)| *m != id);
        if self.markers.len() == before {
            return Err(anyhow!("no marker with id {}", id.0));
        }
        Ok(())
    }

    fn view(&self) -> Option<(LatLon, u8)> {
        self.view
    }

    fn markers(&self) -> Vec<LatLon> {
        self.markers.iter().map(|(_, at)| *at).collect()
    }

    fn attribution(&self) -> Option<&str> {
        self.tile_layer.as_ref().map(|(_, a)| a.as_str())
    }
}
