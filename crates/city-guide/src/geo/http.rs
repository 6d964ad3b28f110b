//! HTTP Geo Client
//!
//! Thin request/response wrappers over the Google Maps Nearby Search and
//! Directions APIs, OpenWeatherMap, and Reddit rising posts.

use async_trait::async_trait;
use serde::Deserialize;

use super::GeoDataClient;
use crate::error::{GuideError, Result};
use crate::model::{GeoPoint, Place, RouteSummary, SocialPost, WeatherReport};

const NEARBY_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";
const DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";
const WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Configuration for the HTTP geo client
#[derive(Clone, Debug)]
pub struct GeoConfig {
    /// Google Maps API key (nearby search + directions)
    pub maps_api_key: String,

    /// OpenWeatherMap API key
    pub weather_api_key: String,
}

impl GeoConfig {
    /// Load from `GOOGLE_MAPS_API_KEY` / `OPENWEATHER_API_KEY`
    pub fn from_env() -> Result<Self> {
        let maps_api_key = std::env::var("GOOGLE_MAPS_API_KEY")
            .map_err(|_| GuideError::MissingApiKey("GOOGLE_MAPS_API_KEY"))?;
        let weather_api_key = std::env::var("OPENWEATHER_API_KEY")
            .map_err(|_| GuideError::MissingApiKey("OPENWEATHER_API_KEY"))?;

        Ok(Self {
            maps_api_key,
            weather_api_key,
        })
    }
}

/// Geo data client backed by live third-party APIs
pub struct HttpGeoClient {
    http: reqwest::Client,
    config: GeoConfig,
}

impl HttpGeoClient {
    pub fn new(config: GeoConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(GeoConfig::from_env()?))
    }

    async fn fetch_route(&self, origin: &str, destination: &str) -> Result<DirectionsRoute> {
        let response: DirectionsResponse = self
            .http
            .get(DIRECTIONS_URL)
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("departure_time", "now"),
                ("traffic_model", "best_guess"),
                ("key", &self.config.maps_api_key),
            ])
            .send()
            .await?
            .json()
            .await?;

        if response.status != "OK" {
            return Err(GuideError::api(
                "Directions",
                response
                    .error_message
                    .unwrap_or_else(|| response.status.clone()),
            ));
        }

        response
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| GuideError::NoRoute(destination.to_string()))
    }
}

// Response shapes, reduced to the fields the tools consume

#[derive(Deserialize)]
struct NearbyResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<NearbyPlace>,
}

#[derive(Deserialize)]
struct NearbyPlace {
    name: String,
    vicinity: Option<String>,
    #[serde(default)]
    types: Vec<String>,
    place_id: Option<String>,
}

#[derive(Deserialize)]
struct DirectionsResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Deserialize)]
struct DirectionsRoute {
    summary: String,
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
}

#[derive(Deserialize)]
struct DirectionsLeg {
    distance: TextValue,
    duration: TextValue,
    duration_in_traffic: Option<TextValue>,
    start_location: Option<LatLng>,
    end_location: Option<LatLng>,
    #[serde(default)]
    steps: Vec<DirectionsStep>,
}

#[derive(Deserialize)]
struct DirectionsStep {
    start_location: LatLng,
}

#[derive(Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl LatLng {
    fn point(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

#[derive(Deserialize)]
struct TextValue {
    text: String,
}

#[derive(Deserialize)]
struct WeatherResponse {
    name: String,
    sys: WeatherSys,
    main: WeatherMain,
    #[serde(default)]
    weather: Vec<WeatherCondition>,
    wind: WeatherWind,
}

#[derive(Deserialize)]
struct WeatherSys {
    country: String,
}

#[derive(Deserialize)]
struct WeatherMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Deserialize)]
struct WeatherCondition {
    description: String,
}

#[derive(Deserialize)]
struct WeatherWind {
    speed: f64,
}

#[derive(Deserialize)]
struct RedditListing {
    data: RedditListingData,
}

#[derive(Deserialize)]
struct RedditListingData {
    #[serde(default)]
    children: Vec<RedditChild>,
}

#[derive(Deserialize)]
struct RedditChild {
    data: RedditPostData,
}

#[derive(Deserialize)]
struct RedditPostData {
    title: String,
    #[serde(default)]
    selftext: String,
}

#[async_trait]
impl GeoDataClient for HttpGeoClient {
    async fn nearby_places(
        &self,
        point: GeoPoint,
        keyword: &str,
        radius_m: u32,
    ) -> Result<Vec<Place>> {
        tracing::debug!(%point, keyword, radius_m, "nearby search");

        let response: NearbyResponse = self
            .http
            .get(NEARBY_URL)
            .query(&[
                ("location", point.to_string()),
                ("radius", radius_m.to_string()),
                ("keyword", keyword.to_string()),
                ("key", self.config.maps_api_key.clone()),
            ])
            .send()
            .await?
            .json()
            .await?;

        if response.status != "OK" && response.status != "ZERO_RESULTS" {
            return Err(GuideError::api(
                "Places",
                response
                    .error_message
                    .unwrap_or_else(|| response.status.clone()),
            ));
        }

        Ok(response
            .results
            .into_iter()
            .map(|p| Place {
                name: p.name,
                vicinity: p.vicinity,
                types: p.types,
                place_id: p.place_id,
            })
            .collect())
    }

    async fn directions(&self, origin: &str, destination: &str) -> Result<RouteSummary> {
        tracing::debug!(origin, destination, "directions lookup");

        let route = self.fetch_route(origin, destination).await?;
        let leg = route
            .legs
            .into_iter()
            .next()
            .ok_or_else(|| GuideError::NoRoute(destination.to_string()))?;

        let duration = leg.duration.text;
        Ok(RouteSummary {
            distance: leg.distance.text,
            duration_in_traffic: leg
                .duration_in_traffic
                .map_or_else(|| duration.clone(), |t| t.text),
            duration,
            summary: route.summary,
        })
    }

    async fn route_waypoints(&self, origin: &str, destination: &str) -> Result<Vec<GeoPoint>> {
        tracing::debug!(origin, destination, "route waypoint sampling");

        let route = self.fetch_route(origin, destination).await?;

        // Thin the step points to keep the follow-up nearby searches
        // within API quota
        const STRIDE: usize = 3;

        let mut waypoints = Vec::new();
        for leg in &route.legs {
            if let Some(start) = &leg.start_location {
                waypoints.push(start.point());
            }
            for step in leg.steps.iter().step_by(STRIDE) {
                waypoints.push(step.start_location.point());
            }
        }
        if let Some(end) = route.legs.last().and_then(|leg| leg.end_location.as_ref()) {
            waypoints.push(end.point());
        }

        if waypoints.is_empty() {
            return Err(GuideError::NoRoute(destination.to_string()));
        }
        Ok(waypoints)
    }

    async fn current_weather(&self, city: &str) -> Result<WeatherReport> {
        tracing::debug!(city, "weather lookup");

        let response = self
            .http
            .get(WEATHER_URL)
            .query(&[
                ("q", city),
                ("appid", &self.config.weather_api_key),
                ("units", "metric"),
            ])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GuideError::api(
                "Weather",
                format!("could not find weather information for \"{city}\""),
            ));
        }

        let data: WeatherResponse = response.json().await?;

        Ok(WeatherReport {
            location: format!("{}, {}", data.name, data.sys.country),
            temperature_c: data.main.temp,
            feels_like_c: data.main.feels_like,
            humidity: data.main.humidity,
            condition: data
                .weather
                .first()
                .map_or_else(|| "No description".into(), |w| w.description.clone()),
            wind_speed: data.wind.speed,
        })
    }

    async fn social_posts(&self, community: &str, limit: usize) -> Result<Vec<SocialPost>> {
        tracing::debug!(community, limit, "social posts lookup");

        let url = format!("https://www.reddit.com/r/{community}/rising/.json?limit={limit}");
        let listing: RedditListing = self.http.get(&url).send().await?.json().await?;

        Ok(listing
            .data
            .children
            .into_iter()
            .map(|c| SocialPost {
                title: c.data.title,
                text: c.data.selftext,
            })
            .collect())
    }

    async fn health_check(&self) -> bool {
        // Cheap reachability probe against the directions endpoint
        self.http
            .get(DIRECTIONS_URL)
            .send()
            .await
            .map(|r| !r.status().is_server_error())
            .unwrap_or(false)
    }

    fn name(&self) -> &str {
        "live-geo"
    }
}
