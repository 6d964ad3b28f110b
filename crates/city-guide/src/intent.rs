//! Intent Override Resolver
//!
//! Deterministic keyword rules that force a specific tool call instead of
//! relying on model tool-selection for latency- and correctness-sensitive
//! intents. Rules are evaluated in a fixed order and a later match
//! overwrites an earlier one (last-match-wins): a prompt mentioning both
//! "restaurant" and "day trip" resolves to the attraction-route tool
//! because that rule is checked last.

use regex::Regex;
use serde_json::json;

use agent_core::{ToolCall, MANUAL_OVERRIDE_ID};

use crate::error::{GuideError, Result};
use crate::model::GeoPoint;
use crate::svckit::{ATTRACTION_TOOL, PLACES_TOOL, TRAFFIC_TOOL};

/// Intents the resolver can force
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Intent {
    /// Restaurants/cafes/food near the user
    NearbyFood,
    /// Traffic or commute between two points
    TrafficRoute,
    /// Outing / day trip / attraction planning
    Outing,
}

/// One override rule: a case-insensitive pattern mapped to an intent
struct OverrideRule {
    intent: Intent,
    pattern: Regex,
}

/// Ordered rule list with last-match-wins semantics
pub struct OverrideResolver {
    rules: Vec<OverrideRule>,
}

impl Default for OverrideResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl OverrideResolver {
    pub fn new() -> Self {
        // Order is load-bearing: later rules overwrite earlier matches.
        let rules = vec![
            OverrideRule {
                intent: Intent::NearbyFood,
                pattern: Regex::new(
                    r"(?i)places? near me|nearby places|good places|restaurant|dinner|cafe|food",
                )
                .expect("valid regex"),
            },
            OverrideRule {
                intent: Intent::TrafficRoute,
                pattern: Regex::new(r"(?i)traffic|commute|drive time|how long to drive|route")
                    .expect("valid regex"),
            },
            OverrideRule {
                intent: Intent::Outing,
                pattern: Regex::new(r"(?i)outing|day trip|day out|going out|attraction")
                    .expect("valid regex"),
            },
        ];

        Self { rules }
    }

    /// Resolve an override for the given prompt and coordinates.
    ///
    /// Returns `Ok(None)` when no rule matches (the model alone selects
    /// tools), `Ok(Some(call))` for a forced call, and an error when a
    /// matching rule needs coordinates but neither pair was provided;
    /// that error fails the whole run before the model is consulted.
    pub fn resolve(
        &self,
        prompt: &str,
        origin: Option<GeoPoint>,
        destination: Option<GeoPoint>,
    ) -> Result<Option<ToolCall>> {
        let mut matched = None;
        for rule in &self.rules {
            if rule.pattern.is_match(prompt) {
                matched = Some(rule.intent);
            }
        }

        let Some(intent) = matched else {
            return Ok(None);
        };
        tracing::debug!(?intent, "override intent matched");

        let call = match intent {
            Intent::Outing => ToolCall::new(ATTRACTION_TOOL)
                .with_arg("keyword", json!("popular attraction")),

            Intent::NearbyFood => {
                let point = origin
                    .or(destination)
                    .ok_or(GuideError::CoordinatesRequired("a nearby search"))?;
                nearby_call(point)
            }

            Intent::TrafficRoute => match (origin, destination) {
                (Some(origin), Some(destination)) => ToolCall::new(TRAFFIC_TOOL)
                    .with_arg("origin", json!(origin.to_string()))
                    .with_arg("destination", json!(destination.to_string())),
                // With a single endpoint the route degrades to a
                // single-point nearby search around it.
                (Some(point), None) | (None, Some(point)) => nearby_call(point),
                (None, None) => {
                    return Err(GuideError::CoordinatesRequired("a route lookup"));
                }
            },
        };

        Ok(Some(call.with_id(MANUAL_OVERRIDE_ID)))
    }
}

fn nearby_call(point: GeoPoint) -> ToolCall {
    ToolCall::new(PLACES_TOOL)
        .with_arg("latitude", json!(point.lat))
        .with_arg("longitude", json!(point.lng))
}
