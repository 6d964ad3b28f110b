//! Mock Geo Client
//!
//! Static fixtures for tests and offline demo runs.

use async_trait::async_trait;

use super::GeoDataClient;
use crate::error::{GuideError, Result};
use crate::model::{GeoPoint, Place, RouteSummary, SocialPost, WeatherReport};

/// Mock geo data client with static fixtures
pub struct MockGeoClient {
    fail_nearby: bool,
    fail_directions: bool,
}

impl Default for MockGeoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGeoClient {
    pub fn new() -> Self {
        Self {
            fail_nearby: false,
            fail_directions: false,
        }
    }

    /// Make every nearby search fail (for per-branch failure tests)
    pub fn failing_nearby() -> Self {
        Self {
            fail_nearby: true,
            fail_directions: false,
        }
    }

    /// Make every directions lookup fail
    pub fn failing_directions() -> Self {
        Self {
            fail_nearby: false,
            fail_directions: true,
        }
    }
}

#[async_trait]
impl GeoDataClient for MockGeoClient {
    async fn nearby_places(
        &self,
        point: GeoPoint,
        keyword: &str,
        _radius_m: u32,
    ) -> Result<Vec<Place>> {
        if self.fail_nearby {
            return Err(GuideError::api("Places", "mock nearby failure"));
        }

        if keyword == "nothing-here" {
            return Ok(Vec::new());
        }

        Ok(vec![
            Place {
                name: format!("Cafe Crossroads ({:.2},{:.2})", point.lat, point.lng),
                vicinity: Some("Hill Road, Bandra West".into()),
                types: vec!["cafe".into(), "restaurant".into()],
                place_id: Some("mock-place-1".into()),
            },
            Place {
                name: "Jogger's Park".into(),
                vicinity: Some("Carter Road".into()),
                types: vec!["park".into()],
                place_id: Some("mock-place-2".into()),
            },
        ])
    }

    async fn directions(&self, _origin: &str, destination: &str) -> Result<RouteSummary> {
        if self.fail_directions {
            return Err(GuideError::NoRoute(destination.to_string()));
        }

        Ok(RouteSummary {
            distance: "12.4 km".into(),
            duration: "35 mins".into(),
            duration_in_traffic: "52 mins".into(),
            summary: "Western Express Hwy".into(),
        })
    }

    async fn route_waypoints(&self, _origin: &str, destination: &str) -> Result<Vec<GeoPoint>> {
        if self.fail_directions {
            return Err(GuideError::NoRoute(destination.to_string()));
        }

        Ok(vec![
            GeoPoint { lat: 19.11, lng: 72.86 },
            GeoPoint { lat: 19.02, lng: 72.85 },
            GeoPoint { lat: 18.93, lng: 72.83 },
        ])
    }

    async fn current_weather(&self, city: &str) -> Result<WeatherReport> {
        Ok(WeatherReport {
            location: format!("{city}, IN"),
            temperature_c: 31.5,
            feels_like_c: 36.0,
            humidity: 74,
            condition: "scattered clouds".into(),
            wind_speed: 4.1,
        })
    }

    async fn social_posts(&self, _community: &str, limit: usize) -> Result<Vec<SocialPost>> {
        let posts = vec![
            SocialPost {
                title: "Local trains running late on Western line".into(),
                text: "Expect 15 minute delays this morning.".into(),
            },
            SocialPost {
                title: "Street food festival this weekend".into(),
                text: String::new(),
            },
        ];
        Ok(posts.into_iter().take(limit).collect())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "mock-geo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_returns_places() {
        let geo = MockGeoClient::new();
        let point = GeoPoint::new(19.05, 72.84).unwrap();
        let places = geo.nearby_places(point, "restaurant", 5000).await.unwrap();
        assert_eq!(places.len(), 2);
    }

    #[tokio::test]
    async fn failing_nearby_surfaces_error() {
        let geo = MockGeoClient::failing_nearby();
        let point = GeoPoint::new(19.05, 72.84).unwrap();
        assert!(geo.nearby_places(point, "restaurant", 5000).await.is_err());
    }
}
