//! Traffic Conditions Tool

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{
    tool::ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::geo::GeoDataClient;
use crate::model::RouteSummary;

pub const TRAFFIC_TOOL: &str = "getTrafficConditions";

/// Tool fetching route distance, duration, and live traffic conditions
pub struct TrafficConditionsTool {
    geo: Arc<dyn GeoDataClient>,
}

impl TrafficConditionsTool {
    pub fn new(geo: Arc<dyn GeoDataClient>) -> Self {
        Self { geo }
    }
}

/// Render a route summary the way the model expects to read it
pub(crate) fn format_route(route: &RouteSummary) -> String {
    format!(
        "Distance: {}\nDuration (no traffic): {}\nDuration (with traffic): {}\nRoute: {}",
        route.distance, route.duration, route.duration_in_traffic, route.summary,
    )
}

#[async_trait]
impl Tool for TrafficConditionsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: TRAFFIC_TOOL.into(),
            description:
                "Fetch route distance, duration, and current traffic conditions between two locations."
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

        match self.geo.directions(origin, destination).await {
            Ok(route) => Ok(ToolResult::success(TRAFFIC_TOOL, format_route(&route))
                .with_data(serde_json::to_value(&route)?)),
            Err(e) => Ok(ToolResult::failure(
                TRAFFIC_TOOL,
                format!("Failed to fetch traffic data: {e}"),
            )),
        }
    }
}
