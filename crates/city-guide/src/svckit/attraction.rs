//! Attraction Route Tool
//!
//! Combined tool: finds the most relevant attraction near a location and
//! calculates the real-time traffic route to it. Two steps against the
//! geo client, with per-step error reporting.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use agent_core::{
    tool::ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::geo::GeoDataClient;
use crate::model::GeoPoint;

pub const ATTRACTION_TOOL: &str = "findRouteAttractionTool";

const DEFAULT_KEYWORD: &str = "popular tourist attraction";
const SEARCH_RADIUS_M: u32 = 5000;

// Default search origin: Bandra West, Mumbai
const DEFAULT_LAT: f64 = 19.054444;
const DEFAULT_LNG: f64 = 72.840556;

/// Tool combining a nearby attraction search with a traffic route
pub struct AttractionRouteTool {
    geo: Arc<dyn GeoDataClient>,
}

impl AttractionRouteTool {
    pub fn new(geo: Arc<dyn GeoDataClient>) -> Self {
        Self { geo }
    }
}

#[async_trait]
impl Tool for AttractionRouteTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: ATTRACTION_TOOL.into(),
            description:
                "Find a nearby attraction and calculate the real-time traffic route to it."
                    .into(),
            parameters: vec![
                ParameterSchema::string(
                    "keyword",
                    "Type of attraction to look for, e.g., park, museum, cafe",
                    false,
                )
                .with_default(json!(DEFAULT_KEYWORD)),
                ParameterSchema::number("latitude", "Search origin latitude", false)
                    .with_range(-90.0, 90.0)
                    .with_default(json!(DEFAULT_LAT)),
                ParameterSchema::number("longitude", "Search origin longitude", false)
                    .with_range(-180.0, 180.0)
                    .with_default(json!(DEFAULT_LNG)),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let keyword = call
            .arguments
            .get("keyword")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_KEYWORD);
        let lat = call
            .arguments
            .get("latitude")
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(DEFAULT_LAT);
        let lng = call
            .arguments
            .get("longitude")
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(DEFAULT_LNG);

        let origin = match GeoPoint::new(lat, lng) {
            Ok(point) => point,
            Err(e) => return Ok(ToolResult::failure(ATTRACTION_TOOL, e.to_string())),
        };

        // Step 1: find the top nearby attraction
        let attraction = match self.geo.nearby_places(origin, keyword, SEARCH_RADIUS_M).await {
            Ok(places) => match places.into_iter().next() {
                Some(place) => place,
                None => {
                    return Ok(ToolResult::success(
                        ATTRACTION_TOOL,
                        format!(
                            "No popular places or attractions found matching '{keyword}' within {}km.",
                            SEARCH_RADIUS_M / 1000
                        ),
                    ));
                }
            },
            Err(e) => {
                return Ok(ToolResult::failure(
                    ATTRACTION_TOOL,
                    format!("Error in step 1 (nearby search): {e}"),
                ));
            }
        };

        let destination_address = attraction
            .vicinity
            .clone()
            .unwrap_or_else(|| attraction.name.clone());
        let destination = attraction
            .place_id
            .as_ref()
            .map_or_else(|| destination_address.clone(), |id| format!("place_id:{id}"));

        // Step 2: traffic route to it
        let route = match self.geo.directions(&origin.to_string(), &destination).await {
            Ok(route) => route,
            Err(e) => {
                return Ok(ToolResult::failure(
                    ATTRACTION_TOOL,
                    format!("Error in step 2 (directions to {destination_address}): {e}"),
                ));
            }
        };

        let output = format!(
            "Attraction: {}\nAddress: {}\nType: {}\n\nTravel Info:\n- Distance: {}\n- Estimated Duration (no traffic): {}\n- Estimated Duration (with traffic): {}\n- Route Summary: {}",
            attraction.name,
            destination_address,
            attraction.types.join(", "),
            route.distance,
            route.duration,
            route.duration_in_traffic,
            route.summary,
        );

        Ok(ToolResult::success(ATTRACTION_TOOL, output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::MockGeoClient;

    #[tokio::test]
    async fn combines_attraction_and_route() {
        let tool = AttractionRouteTool::new(Arc::new(MockGeoClient::new()));
        let result = tool.execute(&ToolCall::new(ATTRACTION_TOOL)).await.unwrap();

        assert!(result.success);
        assert!(result.output.contains("Attraction: Cafe Crossroads"));
        assert!(result.output.contains("with traffic): 52 mins"));
    }

    #[tokio::test]
    async fn nearby_failure_reports_step_one() {
        let tool = AttractionRouteTool::new(Arc::new(MockGeoClient::failing_nearby()));
        let result = tool.execute(&ToolCall::new(ATTRACTION_TOOL)).await.unwrap();

        assert!(!result.success);
        assert!(result.output.contains("step 1"));
    }

    #[tokio::test]
    async fn directions_failure_reports_step_two() {
        let tool = AttractionRouteTool::new(Arc::new(MockGeoClient::failing_directions()));
        let result = tool.execute(&ToolCall::new(ATTRACTION_TOOL)).await.unwrap();

        assert!(!result.success);
        assert!(result.output.contains("step 2"));
    }

    #[tokio::test]
    async fn no_match_is_a_successful_no_result() {
        let tool = AttractionRouteTool::new(Arc::new(MockGeoClient::new()));
        let call = ToolCall::new(ATTRACTION_TOOL).with_arg("keyword", json!("nothing-here"));
        let result = tool.execute(&call).await.unwrap();

        assert!(result.success);
        assert!(result.output.contains("No popular places"));
    }
}
