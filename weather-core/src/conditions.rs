//! Coarse presentation categories derived from current conditions.
//!
//! These are fixed heuristics over cloud cover and precipitation, not real
//! visibility or UV index readings.

use std::fmt;

use crate::lookup;
use crate::model::CurrentConditions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Excellent,
    Good,
    Limited,
}

impl Visibility {
    pub fn from_cloud_cover(cloud_cover: f64) -> Self {
        if cloud_cover < 20.0 {
            Self::Excellent
        } else if cloud_cover < 50.0 {
            Self::Good
        } else {
            Self::Limited
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Limited => "Limited",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvRisk {
    High,
    Moderate,
    Low,
}

impl UvRisk {
    pub fn from_cloud_cover(cloud_cover: f64) -> Self {
        if cloud_cover < 30.0 {
            Self::High
        } else if cloud_cover < 70.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutdoorActivity {
    Good,
    NotIdeal,
}

impl OutdoorActivity {
    pub fn from_precipitation(precipitation: f64) -> Self {
        if precipitation > 0.0 { Self::NotIdeal } else { Self::Good }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::NotIdeal => "Not Ideal",
        }
    }
}

macro_rules! display_via_as_str {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

display_via_as_str!(Visibility, UvRisk, OutdoorActivity);

/// Everything the conditions panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conditions {
    pub visibility: Visibility,
    pub uv_risk: UvRisk,
    pub outdoor_activity: OutdoorActivity,
    pub wind_direction: &'static str,
}

impl Conditions {
    pub fn classify(current: &CurrentConditions) -> Self {
        Self {
            visibility: Visibility::from_cloud_cover(current.cloud_cover),
            uv_risk: UvRisk::from_cloud_cover(current.cloud_cover),
            outdoor_activity: OutdoorActivity::from_precipitation(current.precipitation),
            // sector starts at the bearing: 350° reads NW, not N
            wind_direction: lookup::compass_label(current.wind_direction_10m),
        }
    }
}
