//! Device position capability.

use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{Config, LocationConfig};
use crate::map::LatLon;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location unavailable")]
    PositionUnavailable,
}

/// One-shot position request.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn current_position(&self) -> Result<LatLon, GeolocationError>;
}

/// A host whose position is known up front (from config or the command line).
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub LatLon);

#[async_trait]
impl Geolocator for FixedPosition {
    async fn current_position(&self) -> Result<LatLon, GeolocationError> {
        let LatLon { latitude, longitude } = self.0;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeolocationError::PositionUnavailable);
        }
        Ok(self.0)
    }
}

impl From<LocationConfig> for FixedPosition {
    fn from(loc: LocationConfig) -> Self {
        Self(LatLon::new(loc.latitude, loc.longitude))
    }
}

/// `None` when the host cannot report a position at all.
pub fn geolocator_from_config(config: &Config) -> Option<Arc<dyn Geolocator>> {
    config
        .location
        .map(|loc| Arc::new(FixedPosition::from(loc)) as Arc<dyn Geolocator>)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_position_reports_configured_coordinates() {
        let geo = FixedPosition(LatLon::new(48.85, 2.35));
        assert_eq!(geo.current_position().await, Ok(LatLon::new(48.85, 2.35)));
    }

    #[tokio::test]
    async fn out_of_range_position_is_unavailable() {
        let geo = FixedPosition(LatLon::new(95.0, 0.0));
        assert_eq!(geo.current_position().await, Err(GeolocationError::PositionUnavailable));
    }

    #[test]
    fn capability_follows_config() {
        let mut cfg = Config::default();
        assert!(geolocator_from_config(&cfg).is_none());

        cfg.location = Some(LocationConfig { latitude: 1.0, longitude: 2.0 });
        assert!(geolocator_from_config(&cfg).is_some());
    }
}
