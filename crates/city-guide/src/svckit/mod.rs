//! Service Kit - City Tools
//!
//! The six city data-retrieval tools that implement `agent_core::Tool`
//! over a shared [`crate::geo::GeoDataClient`]. Tool wire names match the
//! identifiers the system prompt teaches the model.

mod along_route;
mod attraction;
mod places;
mod reddit;
mod traffic;
mod weather;

pub use along_route::{PlacesAlongRouteTool, ALONG_ROUTE_TOOL};
pub use attraction::{AttractionRouteTool, ATTRACTION_TOOL};
pub use places::{NearbyPlacesTool, PLACES_TOOL};
pub use reddit::{RedditPostsTool, REDDIT_TOOL};
pub use traffic::{TrafficConditionsTool, TRAFFIC_TOOL};
pub use weather::{CurrentWeatherTool, WEATHER_TOOL};

pub(crate) use places::{format_places, DEFAULT_RADIUS_M};
pub(crate) use traffic::format_route;
