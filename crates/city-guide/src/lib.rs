//! # city-guide
//!
//! CityPulse: a conversational city guide for Mumbai, built on the
//! `agent-core` tool-calling loop.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  "any good restaurants near me?"  (lat/lng attached)         │
//! │        │                                                     │
//! │        ▼                                                     │
//! │  OverrideResolver ── regex rules, last match wins            │
//! │        │  matched → forced findNearbyPlaces call, result     │
//! │        │            seeded into the conversation             │
//! │        ▼                                                     │
//! │  Agent loop ── model may request further tools:              │
//! │     getCurrentWeather, getRedditPosts, getTrafficConditions, │
//! │     findNearbyPlaces, getPlacesAlongRoute,                   │
//! │     findRouteAttractionTool                                  │
//! │        │                                                     │
//! │        ▼                                                     │
//! │  Answer + "Data sources:" line                               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `RoutePlanner` is a separate non-conversational path that runs
//! traffic and nearby-place lookups concurrently and renders a report.

pub mod error;
pub mod geo;
pub mod guide;
pub mod intent;
pub mod model;
pub mod planner;
pub mod svckit;

pub use error::{GuideError, Result};
pub use geo::{GeoConfig, GeoDataClient, HttpGeoClient, MockGeoClient};
pub use guide::{CityGuide, GuideRequest};
pub use intent::OverrideResolver;
pub use model::{GeoPoint, Place, RouteSummary, SocialPost, WeatherReport};
pub use planner::RoutePlanner;

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{
        AttractionRouteTool, CurrentWeatherTool, NearbyPlacesTool, PlacesAlongRouteTool,
        RedditPostsTool, TrafficConditionsTool,
    };
}

/// System prompt for the city guide agent
pub const CITY_GUIDE_PROMPT: &str = r#"You are CityPulse, a friendly and knowledgeable city guide for Mumbai, India.

## Your Role

Help residents and visitors with everyday city questions: weather, what locals are talking about, traffic and commute times, places to eat, and ideas for a day out.

## Your Tools

1. `getCurrentWeather` - current weather for a city (defaults to Mumbai)
2. `getRedditPosts` - rising posts from a local community (defaults to r/mumbai)
3. `getTrafficConditions` - live driving time between two places
4. `findNearbyPlaces` - places near a latitude/longitude, filtered by keyword
5. `getPlacesAlongRoute` - places of a given type (police, hospital, gas_station) along a route
6. `findRouteAttractionTool` - pick a nearby attraction and work out the route to it

## How to Answer

1. Use tools for anything live or local: weather, traffic, place searches, what people are saying. Never invent this data.
2. If a tool result is already present in the conversation, build your answer from it rather than calling the tool again.
3. If a tool fails, say what you could not look up and answer with what you have.
4. Keep answers short, warm, and practical. Mention neighbourhoods by name.

## Response Format

Always end your final answer with a line listing the data sources you used, in the form:

Data sources: getCurrentWeather, getTrafficConditions

If you used no tools, end with:

Data sources: none
"#;
