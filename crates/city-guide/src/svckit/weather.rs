//! Current Weather Tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use agent_core::{
    tool::ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::geo::GeoDataClient;

pub const WEATHER_TOOL: &str = "getCurrentWeather";

const DEFAULT_CITY: &str = "Mumbai";

/// Tool for live weather conditions
pub struct CurrentWeatherTool {
    geo: Arc<dyn GeoDataClient>,
}

impl CurrentWeatherTool {
    pub fn new(geo: Arc<dyn GeoDataClient>) -> Self {
        Self { geo }
    }
}

#[async_trait]
impl Tool for CurrentWeatherTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: WEATHER_TOOL.into(),
            description:
                "Gets the current, real-time weather for a city. Use this for any questions about weather conditions."
                    .into(),
            parameters: vec![ParameterSchema::string(
                "city",
                "The city name, e.g., 'Mumbai'",
                false,
            )
            .with_default(json!(DEFAULT_CITY))],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let city = call
            .arguments
            .get("city")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_CITY);

        match self.geo.current_weather(city).await {
            Ok(report) => {
                let output = format!(
                    "Weather in {}: {:.1}°C (feels like {:.1}°C), {}, humidity {}%, wind {:.1} m/s",
                    report.location,
                    report.temperature_c,
                    report.feels_like_c,
                    report.condition,
                    report.humidity,
                    report.wind_speed,
                );
                Ok(ToolResult::success(WEATHER_TOOL, output)
                    .with_data(serde_json::to_value(&report)?))
            }
            Err(e) => Ok(ToolResult::failure(
                WEATHER_TOOL,
                format!("Failed to fetch weather data: {e}"),
            )),
        }
    }
}
