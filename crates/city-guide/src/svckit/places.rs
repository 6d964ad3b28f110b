//! Nearby Places Tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use agent_core::{
    tool::ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::geo::GeoDataClient;
use crate::model::{GeoPoint, Place};

pub const PLACES_TOOL: &str = "findNearbyPlaces";

pub(crate) const DEFAULT_KEYWORD: &str = "event";
pub(crate) const DEFAULT_RADIUS_M: u32 = 5000;
const MAX_PLACES: usize = 5;

/// Tool finding points of interest near a coordinate
pub struct NearbyPlacesTool {
    geo: Arc<dyn GeoDataClient>,
}

impl NearbyPlacesTool {
    pub fn new(geo: Arc<dyn GeoDataClient>) -> Self {
        Self { geo }
    }
}

/// Render a place list the way the model expects to read it
pub(crate) fn format_places(places: &[Place]) -> String {
    let mut output = String::new();
    for place in places.iter().take(MAX_PLACES) {
        output.push_str(&format!("  • {}", place.name));
        if let Some(vicinity) = &place.vicinity {
            output.push_str(&format!(" - {vicinity}"));
        }
        if !place.types.is_empty() {
            output.push_str(&format!(" [{}]", place.types.join(", ")));
        }
        output.push('\n');
    }
    output.trim_end().to_string()
}

#[async_trait]
impl Tool for NearbyPlacesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: PLACES_TOOL.into(),
            description:
                "Finds points of interest (like restaurants, events, or parks) near a specific geographic coordinate."
                    .into(),
            parameters: vec![
                ParameterSchema::number(
                    "latitude",
                    "The latitude of the location to search around",
                    true,
                )
                .with_range(-90.0, 90.0),
                ParameterSchema::number(
                    "longitude",
                    "The longitude of the location to search around",
                    true,
                )
                .with_range(-180.0, 180.0),
                ParameterSchema::string("keyword", "A keyword to search for, e.g., 'concert'", false)
                    .with_default(json!(DEFAULT_KEYWORD)),
                ParameterSchema::number("radius", "The search radius in meters", false)
                    .with_range(1.0, 50_000.0)
                    .with_default(json!(DEFAULT_RADIUS_M)),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        // The invoker has validated types and ranges and filled defaults
        let lat = call
            .arguments
            .get("latitude")
            .and_then(serde_json::Value::as_f64)
            .unwrap_or_default();
        let lng = call
            .arguments
            .get("longitude")
            .and_then(serde_json::Value::as_f64)
            .unwrap_or_default();
        let keyword = call
            .arguments
            .get("keyword")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_KEYWORD);
        let radius = call
            .arguments
            .get("radius")
            .and_then(serde_json::Value::as_f64)
            .map_or(DEFAULT_RADIUS_M, |r| r as u32);

        let point = match GeoPoint::new(lat, lng) {
            Ok(point) => point,
            Err(e) => return Ok(ToolResult::failure(PLACES_TOOL, e.to_string())),
        };

        match self.geo.nearby_places(point, keyword, radius).await {
            Ok(places) if places.is_empty() => Ok(ToolResult::success(
                PLACES_TOOL,
                format!("No places found matching '{keyword}' near the specified location."),
            )),
            Ok(places) => Ok(ToolResult::success(
                PLACES_TOOL,
                format!("Places matching '{keyword}':\n{}", format_places(&places)),
            )
            .with_data(serde_json::to_value(&places)?)),
            Err(e) => Ok(ToolResult::failure(
                PLACES_TOOL,
                format!("Failed to fetch places data: {e}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::MockGeoClient;

    fn call(lat: f64, lng: f64) -> ToolCall {
        ToolCall::new(PLACES_TOOL)
            .with_arg("latitude", json!(lat))
            .with_arg("longitude", json!(lng))
    }

    #[tokio::test]
    async fn lists_nearby_places() {
        let tool = NearbyPlacesTool::new(Arc::new(MockGeoClient::new()));
        let result = tool.execute(&call(19.05, 72.84)).await.unwrap();

        assert!(result.success);
        assert!(result.output.contains("Cafe Crossroads"));
        assert!(result.output.contains("Hill Road, Bandra West"));
    }

    #[tokio::test]
    async fn empty_result_is_a_successful_no_match() {
        let tool = NearbyPlacesTool::new(Arc::new(MockGeoClient::new()));
        let call = call(19.05, 72.84).with_arg("keyword", json!("nothing-here"));
        let result = tool.execute(&call).await.unwrap();

        assert!(result.success);
        assert!(result.output.contains("No places found"));
    }

    #[tokio::test]
    async fn lookup_failure_is_a_failure_result() {
        let tool = NearbyPlacesTool::new(Arc::new(MockGeoClient::failing_nearby()));
        let result = tool.execute(&call(19.05, 72.84)).await.unwrap();

        assert!(!result.success);
        assert!(result.output.contains("Failed to fetch places data"));
    }
}
