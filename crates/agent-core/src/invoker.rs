//! Tool Invoker
//!
//! Executes one tool call: validates and coerces the raw arguments against
//! the tool's declared schema, runs the tool, and converts every failure
//! into a failure `ToolResult`. No error ever propagates past this
//! boundary as a raised error.

use std::sync::Arc;

use serde_json::Value;

use crate::tool::{ParameterSchema, Tool, ToolCall, ToolResult};

/// Stateless invoker for tool calls
pub struct ToolInvoker;

impl ToolInvoker {
    /// Invoke a tool with raw arguments.
    ///
    /// Returns a success or failure `ToolResult`; validation failures and
    /// execution errors both become failure results carrying an actionable
    /// message.
    pub async fn invoke(tool: &Arc<dyn Tool>, call: &ToolCall) -> ToolResult {
        let schema = tool.schema();

        let coerced = match coerce_arguments(&schema.parameters, call) {
            Ok(coerced) => coerced,
            Err(message) => {
                tracing::warn!(tool = %schema.name, %message, "tool argument validation failed");
                return ToolResult::failure(&schema.name, message).with_id(call.id_or_override());
            }
        };

        tracing::debug!(tool = %schema.name, args = ?coerced.arguments, "executing tool");

        match tool.execute(&coerced).await {
            Ok(result) => {
                tracing::debug!(tool = %schema.name, success = result.success, "tool finished");
                result.with_id(call.id_or_override())
            }
            Err(e) => {
                tracing::warn!(tool = %schema.name, error = %e, "tool execution failed");
                ToolResult::failure(&schema.name, format!("Tool '{}' failed: {e}", schema.name))
                    .with_id(call.id_or_override())
            }
        }
    }
}

/// Validate the raw arguments against the parameter schemas, coercing
/// where the schema allows it. Returns a call with the coerced argument
/// bag, or a message naming the offending field.
fn coerce_arguments(
    parameters: &[ParameterSchema],
    call: &ToolCall,
) -> std::result::Result<ToolCall, String> {
    let mut coerced = call.clone();

    for param in parameters {
        let value = match coerced.arguments.get(&param.name) {
            Some(v) => v.clone(),
            None => {
                if param.required {
                    return Err(format!(
                        "Missing required parameter '{}'. You must provide it to use this tool.",
                        param.name
                    ));
                }
                if let Some(default) = &param.default {
                    coerced
                        .arguments
                        .insert(param.name.clone(), default.clone());
                }
                continue;
            }
        };

        let value = coerce_value(param, value)
            .map_err(|detail| format!("Parameter '{}' is invalid: {detail}", param.name))?;
        coerced.arguments.insert(param.name.clone(), value);
    }

    Ok(coerced)
}

/// Coerce a single value to its declared type and check numeric bounds
fn coerce_value(param: &ParameterSchema, value: Value) -> std::result::Result<Value, String> {
    match param.param_type.as_str() {
        "number" => {
            // Numeric strings are accepted and converted
            let number = match &value {
                Value::Number(n) => n
                    .as_f64()
                    .ok_or_else(|| "not representable as a number".to_string())?,
                Value::String(s) => s
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| format!("expected a number, got \"{s}\""))?,
                other => return Err(format!("expected a number, got {other}")),
            };

            if let Some(min) = param.minimum {
                if number < min {
                    return Err(format!(
                        "value {number} is below the minimum {min} (allowed range {min}..={})",
                        param.maximum.unwrap_or(f64::INFINITY)
                    ));
                }
            }
            if let Some(max) = param.maximum {
                if number > max {
                    return Err(format!(
                        "value {number} is above the maximum {max} (allowed range {}..={max})",
                        param.minimum.unwrap_or(f64::NEG_INFINITY)
                    ));
                }
            }

            Ok(serde_json::Number::from_f64(number)
                .map(Value::Number)
                .ok_or_else(|| "not representable as a number".to_string())?)
        }
        "string" => match value {
            Value::String(_) => Ok(value),
            Value::Number(n) => Ok(Value::String(n.to_string())),
            other => Err(format!("expected a string, got {other}")),
        },
        "boolean" => match value {
            Value::Bool(_) => Ok(value),
            other => Err(format!("expected a boolean, got {other}")),
        },
        _ => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::tool::ToolSchema;
    use async_trait::async_trait;
    use serde_json::json;

    /// Test tool with a latitude/longitude schema matching the nearby
    /// places tool
    struct PointTool;

    #[async_trait]
    impl Tool for PointTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "point".into(),
                description: "Reports a coordinate".into(),
                parameters: vec![
                    ParameterSchema::number("latitude", "Latitude", true).with_range(-90.0, 90.0),
                    ParameterSchema::number("longitude", "Longitude", true)
                        .with_range(-180.0, 180.0),
                    ParameterSchema::string("keyword", "Search keyword", false)
                        .with_default(json!("event")),
                ],
            }
        }

        async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
            let lat = call.arguments["latitude"].as_f64().unwrap();
            let lng = call.arguments["longitude"].as_f64().unwrap();
            let keyword = call.arguments["keyword"].as_str().unwrap().to_string();
            Ok(ToolResult::success("point", format!("{lat},{lng} {keyword}")))
        }
    }

    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "broken".into(),
                description: "Always fails".into(),
                parameters: vec![],
            }
        }

        async fn execute(&self, _call: &ToolCall) -> Result<ToolResult> {
            Err(crate::error::AgentError::ToolExecution("upstream 500".into()))
        }
    }

    #[tokio::test]
    async fn coerces_numeric_strings_and_fills_defaults() {
        let tool: Arc<dyn Tool> = Arc::new(PointTool);
        let call = ToolCall::new("point")
            .with_arg("latitude", json!("19.05"))
            .with_arg("longitude", json!(72.84));

        let result = ToolInvoker::invoke(&tool, &call).await;
        assert!(result.success);
        assert_eq!(result.output, "19.05,72.84 event");
    }

    #[tokio::test]
    async fn out_of_range_numeric_string_names_the_field() {
        let tool: Arc<dyn Tool> = Arc::new(PointTool);
        let call = ToolCall::new("point")
            .with_arg("latitude", json!("95"))
            .with_arg("longitude", json!(72.84));

        let result = ToolInvoker::invoke(&tool, &call).await;
        assert!(!result.success);
        assert!(result.output.contains("latitude"), "{}", result.output);
        assert!(result.output.contains("90"), "{}", result.output);
    }

    #[tokio::test]
    async fn missing_required_field_is_a_failure_result() {
        let tool: Arc<dyn Tool> = Arc::new(PointTool);
        let call = ToolCall::new("point").with_arg("latitude", json!(19.05));

        let result = ToolInvoker::invoke(&tool, &call).await;
        assert!(!result.success);
        assert!(result.output.contains("longitude"));
    }

    #[tokio::test]
    async fn execution_error_becomes_failure_result() {
        let tool: Arc<dyn Tool> = Arc::new(FailingTool);
        let call = ToolCall::new("broken").with_id("call-1");

        let result = ToolInvoker::invoke(&tool, &call).await;
        assert!(!result.success);
        assert!(result.output.contains("upstream 500"));
        assert_eq!(result.id.as_deref(), Some("call-1"));
    }

    #[tokio::test]
    async fn non_numeric_string_is_rejected() {
        let tool: Arc<dyn Tool> = Arc::new(PointTool);
        let call = ToolCall::new("point")
            .with_arg("latitude", json!("north"))
            .with_arg("longitude", json!(72.84));

        let result = ToolInvoker::invoke(&tool, &call).await;
        assert!(!result.success);
        assert!(result.output.contains("latitude"));
    }
}
