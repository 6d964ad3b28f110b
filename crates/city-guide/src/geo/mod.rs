//! Geographic Data Sources
//!
//! Abstraction over the third-party map/weather/social APIs the city
//! tools consume, with an HTTP implementation and a mock for tests.

mod http;
mod mock;

pub use http::{GeoConfig, HttpGeoClient};
pub use mock::MockGeoClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{GeoPoint, Place, RouteSummary, SocialPost, WeatherReport};

/// Client trait for geographic data sources
#[async_trait]
pub trait GeoDataClient: Send + Sync {
    /// Find points of interest near a coordinate
    async fn nearby_places(
        &self,
        point: GeoPoint,
        keyword: &str,
        radius_m: u32,
    ) -> Result<Vec<Place>>;

    /// Fetch route distance, duration, and traffic conditions.
    /// `origin` and `destination` accept `lat,lng` pairs, addresses, or
    /// `place_id:` references.
    async fn directions(&self, origin: &str, destination: &str) -> Result<RouteSummary>;

    /// Sample coordinates along the route between two locations: the
    /// start, a thinned selection of step points, and the end.
    async fn route_waypoints(&self, origin: &str, destination: &str) -> Result<Vec<GeoPoint>>;

    /// Get current weather for a city
    async fn current_weather(&self, city: &str) -> Result<WeatherReport>;

    /// Fetch rising community posts
    async fn social_posts(&self, community: &str, limit: usize) -> Result<Vec<SocialPost>>;

    /// Check if the data source is reachable
    async fn health_check(&self) -> bool;

    /// Data source name
    fn name(&self) -> &str;
}
