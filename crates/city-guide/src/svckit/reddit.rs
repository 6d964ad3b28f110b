//! Reddit Posts Tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use agent_core::{
    tool::ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::geo::GeoDataClient;

pub const REDDIT_TOOL: &str = "getRedditPosts";

const DEFAULT_COMMUNITY: &str = "mumbai";
const DEFAULT_LIMIT: u64 = 2;

/// Tool fetching rising posts from the city's subreddit
pub struct RedditPostsTool {
    geo: Arc<dyn GeoDataClient>,
}

impl RedditPostsTool {
    pub fn new(geo: Arc<dyn GeoDataClient>) -> Self {
        Self { geo }
    }
}

#[async_trait]
impl Tool for RedditPostsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: REDDIT_TOOL.into(),
            description:
                "Fetches recent rising posts from the city's subreddit. Use this to understand local news and the general atmosphere of the city."
                    .into(),
            parameters: vec![
                ParameterSchema::string("community", "Subreddit name without the r/ prefix", false)
                    .with_default(json!(DEFAULT_COMMUNITY)),
                ParameterSchema::number("limit", "Number of posts to fetch", false)
                    .with_range(1.0, 25.0)
                    .with_default(json!(DEFAULT_LIMIT)),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let community = call
            .arguments
            .get("community")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_COMMUNITY);
        let limit = call
            .arguments
            .get("limit")
            .and_then(serde_json::Value::as_f64)
            .map_or(DEFAULT_LIMIT as usize, |n| n as usize);

        match self.geo.social_posts(community, limit).await {
            Ok(posts) if posts.is_empty() => Ok(ToolResult::success(
                REDDIT_TOOL,
                format!("No rising posts found in r/{community} right now."),
            )),
            Ok(posts) => {
                let mut output = format!("Rising posts from r/{community}:\n");
                for post in &posts {
                    output.push_str(&format!("  • {}\n", post.title));
                    if !post.text.is_empty() {
                        output.push_str(&format!("    {}\n", post.text));
                    }
                }
                Ok(ToolResult::success(REDDIT_TOOL, output.trim_end())
                    .with_data(serde_json::to_value(&posts)?))
            }
            Err(e) => Ok(ToolResult::failure(
                REDDIT_TOOL,
                format!("Failed to fetch posts from r/{community}: {e}"),
            )),
        }
    }
}
