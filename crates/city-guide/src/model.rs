//! Domain Models
//!
//! Core data types for city navigation: coordinates, places, routes,
//! weather, and community posts.

use serde::{Deserialize, Serialize};

use crate::error::{GuideError, Result};

/// A geographic coordinate pair
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, [-90, 90]
    pub lat: f64,

    /// Longitude in degrees, [-180, 180]
    pub lng: f64,
}

impl GeoPoint {
    /// Create a validated coordinate pair
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(GuideError::InvalidCoordinate(format!(
                "latitude {lat} is outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(GuideError::InvalidCoordinate(format!(
                "longitude {lng} is outside [-180, 180]"
            )));
        }
        Ok(Self { lat, lng })
    }
}

impl std::fmt::Display for GeoPoint {
    /// Formats as `lat,lng`, the form the directions API expects
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// A point of interest returned by a nearby search
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Place {
    /// Display name
    pub name: String,

    /// Short address/neighbourhood
    pub vicinity: Option<String>,

    /// Place categories (e.g., "restaurant", "park")
    #[serde(default)]
    pub types: Vec<String>,

    /// Provider place identifier, usable as a directions destination
    pub place_id: Option<String>,
}

/// Distance/duration summary for one route
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Human-readable distance (e.g., "12.4 km")
    pub distance: String,

    /// Duration without traffic
    pub duration: String,

    /// Duration with current traffic
    pub duration_in_traffic: String,

    /// Route description (e.g., "Western Express Hwy")
    pub summary: String,
}

/// Current weather conditions for a city
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeatherReport {
    /// "City, Country"
    pub location: String,

    /// Temperature in Celsius
    pub temperature_c: f64,

    /// Feels-like temperature in Celsius
    pub feels_like_c: f64,

    /// Relative humidity percentage
    pub humidity: u8,

    /// Condition description (e.g., "scattered clouds")
    pub condition: String,

    /// Wind speed in m/s
    pub wind_speed: f64,
}

/// A community post (local buzz)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SocialPost {
    pub title: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_point_formats_for_directions() {
        let point = GeoPoint::new(19.054444, 72.840556).unwrap();
        assert_eq!(point.to_string(), "19.054444,72.840556");
    }

    #[test]
    fn out_of_range_latitude_is_rejected() {
        let err = GeoPoint::new(95.0, 72.8).unwrap_err();
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn out_of_range_longitude_is_rejected() {
        assert!(GeoPoint::new(19.0, 200.0).is_err());
    }
}
