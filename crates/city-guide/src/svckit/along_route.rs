//! Places Along Route Tool
//!
//! Samples waypoints along a driving route and searches for a given
//! place type near each one, deduplicating across waypoints. Useful for
//! "where are the hospitals/fuel stations on my way" questions.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use agent_core::{
    tool::ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::geo::GeoDataClient;
use crate::model::Place;

pub const ALONG_ROUTE_TOOL: &str = "getPlacesAlongRoute";

const DEFAULT_PLACE_TYPE: &str = "police";
const DEFAULT_RADIUS_M: u32 = 5000;
const DEFAULT_MAX_RESULTS: usize = 10;

/// Tool finding places of a given type along a route
pub struct PlacesAlongRouteTool {
    geo: Arc<dyn GeoDataClient>,
}

impl PlacesAlongRouteTool {
    pub fn new(geo: Arc<dyn GeoDataClient>) -> Self {
        Self { geo }
    }
}

#[async_trait]
impl Tool for PlacesAlongRouteTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: ALONG_ROUTE_TOOL.into(),
            description:
                "Finds specific types of places (like police stations, hospitals, or gas stations) along a route between two locations."
                    .into(),
            parameters: vec![
                ParameterSchema::string(
                    "origin",
                    "Start location: 'lat,lng' pair or an address",
                    true,
                ),
                ParameterSchema::string(
                    "destination",
                    "End location: 'lat,lng' pair or an address",
                    true,
                ),
                ParameterSchema::string(
                    "placeType",
                    "Type of place to search for, e.g., 'police', 'hospital', 'gas_station'",
                    false,
                )
                .with_default(json!(DEFAULT_PLACE_TYPE)),
                ParameterSchema::number("radius", "Search radius in meters around each route point", false)
                    .with_range(1.0, 50_000.0)
                    .with_default(json!(DEFAULT_RADIUS_M)),
                ParameterSchema::number("maxResults", "Maximum number of places to return", false)
                    .with_range(1.0, 50.0)
                    .with_default(json!(DEFAULT_MAX_RESULTS)),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let origin = call
            .arguments
            .get("origin")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let destination = call
            .arguments
            .get("destination")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let place_type = call
            .arguments
            .get("placeType")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_PLACE_TYPE);
        let radius = call
            .arguments
            .get("radius")
            .and_then(serde_json::Value::as_f64)
            .map_or(DEFAULT_RADIUS_M, |r| r as u32);
        let max_results = call
            .arguments
            .get("maxResults")
            .and_then(serde_json::Value::as_f64)
            .map_or(DEFAULT_MAX_RESULTS, |n| n as usize);

        // Step 1: sample waypoints along the route
        let waypoints = match self.geo.route_waypoints(origin, destination).await {
            Ok(waypoints) => waypoints,
            Err(e) => {
                return Ok(ToolResult::failure(
                    ALONG_ROUTE_TOOL,
                    format!("Error in step 1 (route lookup): {e}"),
                ));
            }
        };

        // Step 2: search near each waypoint, deduplicating across them.
        // A failed search at one waypoint is skipped, not fatal.
        let mut seen = HashSet::new();
        let mut places: Vec<Place> = Vec::new();
        for waypoint in &waypoints {
            match self.geo.nearby_places(*waypoint, place_type, radius).await {
                Ok(found) => {
                    for place in found {
                        let key = place
                            .place_id
                            .clone()
                            .unwrap_or_else(|| place.name.clone());
                        if seen.insert(key) {
                            places.push(place);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(%waypoint, error = %e, "waypoint search skipped");
                }
            }
        }

        if places.is_empty() {
            return Ok(ToolResult::success(
                ALONG_ROUTE_TOOL,
                format!("No '{place_type}' places found along the route."),
            ));
        }

        let total = places.len();
        places.truncate(max_results);

        let mut output = format!(
            "Places of type '{place_type}' along the route (showing {} of {total}, {} route points checked):\n",
            places.len(),
            waypoints.len(),
        );
        for place in &places {
            output.push_str(&format!("  • {}", place.name));
            if let Some(vicinity) = &place.vicinity {
                output.push_str(&format!(" - {vicinity}"));
            }
            output.push('\n');
        }

        Ok(ToolResult::success(ALONG_ROUTE_TOOL, output.trim_end())
            .with_data(serde_json::to_value(&places)?))
    }
}
