//! Model Client Abstraction
//!
//! Narrow contract the orchestrator depends on: send the accumulated
//! conversation, get back either a final answer or a list of requested
//! tool calls. Implementations live in `agent-runtime`; tests substitute
//! a fake.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::Message;
use crate::tool::ToolCall;

/// Configuration for model generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g., "llama3.1")
    pub model: String,

    /// Temperature for sampling (0.0 = deterministic)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Top-p nucleus sampling
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

fn default_temperature() -> f32 {
    0.0
}
fn default_max_tokens() -> u32 {
    2048
}
fn default_top_p() -> f32 {
    0.9
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: "llama3.1".into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
        }
    }
}

/// Token usage statistics
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// One model turn: final text content plus any requested tool calls.
/// Zero requested calls means the content is the final answer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelTurn {
    /// The generated text
    pub content: String,

    /// Tool calls the model requested this turn
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,

    /// Model that generated this turn
    pub model: String,

    /// Token usage statistics (if available)
    pub usage: Option<TokenUsage>,
}

impl ModelTurn {
    pub fn answer(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
            model: model.into(),
            usage: None,
        }
    }

    pub fn with_calls(mut self, tool_calls: Vec<ToolCall>) -> Self {
        self.tool_calls = tool_calls;
        self
    }

    /// Whether this turn is a final answer (no tool calls requested)
    pub fn is_final(&self) -> bool {
        self.tool_calls.is_empty()
    }
}

/// Information about an available model
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
}

/// Contract for language-model backends
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send the full conversation; returns the model's turn
    async fn send(&self, messages: &[Message], options: &GenerationOptions) -> Result<ModelTurn>;

    /// Check if the backend is reachable and configured correctly
    async fn health_check(&self) -> Result<bool>;

    /// List available models
    async fn list_models(&self) -> Result<Vec<ModelInfo>>;
}

/// Extract tool calls from model output text.
///
/// Providers without native function calling emit calls as fenced
/// ```` ```tool ```` JSON blocks, one call per block. A bare JSON object
/// with a `"tool"` key is accepted as a fallback for models that drop the
/// fence. Missing call IDs are filled with generated UUIDs.
pub fn extract_tool_calls(content: &str) -> Vec<ToolCall> {
    let mut calls = Vec::new();

    let marker = "```tool";
    let fence = "```";
    let mut rest = content;

    while let Some(start_idx) = rest.find(marker) {
        let after_marker = &rest[start_idx + marker.len()..];
        let Some(end_idx) = after_marker.find(fence) else {
            break;
        };

        let json_str = after_marker[..end_idx].trim();
        if let Ok(call) = serde_json::from_str::<ToolCall>(json_str) {
            calls.push(call);
        } else {
            tracing::debug!(block = json_str, "unparseable tool block ignored");
        }

        rest = &after_marker[end_idx + fence.len()..];
    }

    // Fallback: a single inline JSON object with a "tool" key
    if calls.is_empty() {
        if let Some(call) = parse_inline_tool_call(content) {
            calls.push(call);
        }
    }

    for call in &mut calls {
        if call.id.is_none() {
            call.id = Some(uuid::Uuid::new_v4().to_string());
        }
    }

    calls
}

fn parse_inline_tool_call(content: &str) -> Option<ToolCall> {
    if !content.contains(r#""tool""#) {
        return None;
    }

    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end <= start {
        return None;
    }

    serde_json::from_str::<ToolCall>(&content[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generation_defaults() {
        let opts = GenerationOptions::default();
        assert_eq!(opts.model, "llama3.1");
        assert_eq!(opts.temperature, 0.0);
        assert_eq!(opts.max_tokens, 2048);
    }

    #[test]
    fn extracts_single_fenced_call() {
        let content = r#"Let me check that for you.
```tool
{"tool": "getCurrentWeather", "arguments": {"city": "Mumbai"}}
```"#;

        let calls = extract_tool_calls(content);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "getCurrentWeather");
        assert_eq!(calls[0].arguments["city"], json!("Mumbai"));
        assert!(calls[0].id.is_some());
    }

    #[test]
    fn extracts_multiple_fenced_calls_in_order() {
        let content = r#"I'll check the weather and the local chatter.
```tool
{"tool": "getCurrentWeather", "arguments": {}}
```
And also:
```tool
{"tool": "getRedditPosts", "arguments": {"limit": 2}}
```"#;

        let calls = extract_tool_calls(content);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].name, "getCurrentWeather");
        assert_eq!(calls[1].name, "getRedditPosts");
    }

    #[test]
    fn falls_back_to_inline_json() {
        let content = r#"{"tool": "findNearbyPlaces", "arguments": {"latitude": 19.0, "longitude": 72.8}}"#;

        let calls = extract_tool_calls(content);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "findNearbyPlaces");
    }

    #[test]
    fn plain_text_has_no_calls() {
        assert!(extract_tool_calls("Sunny, mixed chatter").is_empty());
    }

    #[test]
    fn model_turn_finality() {
        assert!(ModelTurn::answer("done", "m").is_final());
        let turn =
            ModelTurn::answer("", "m").with_calls(vec![ToolCall::new("getCurrentWeather")]);
        assert!(!turn.is_final());
    }
}
