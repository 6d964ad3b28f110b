//! City Guide Facade
//!
//! Wires the six city tools, the override resolver, and the agent loop
//! into the single public entry point. No error ever crosses the
//! `answer` boundary unconverted; callers always receive a plain string.

use std::sync::Arc;

use agent_core::{Agent, AgentConfig, AgentError, ModelClient, RunRequest, ToolRegistry};

use crate::geo::GeoDataClient;
use crate::intent::OverrideResolver;
use crate::model::GeoPoint;
use crate::svckit::{
    AttractionRouteTool, CurrentWeatherTool, NearbyPlacesTool, PlacesAlongRouteTool,
    RedditPostsTool, TrafficConditionsTool,
};
use crate::CITY_GUIDE_PROMPT;

/// One guide request: the user's prompt plus optional coordinates
#[derive(Clone, Debug, Default)]
pub struct GuideRequest {
    pub prompt: String,
    pub origin: Option<GeoPoint>,
    pub destination: Option<GeoPoint>,
}

impl GuideRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_origin(mut self, origin: GeoPoint) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_destination(mut self, destination: GeoPoint) -> Self {
        self.destination = Some(destination);
        self
    }
}

/// The CityPulse guide
pub struct CityGuide {
    agent: Agent,
    resolver: OverrideResolver,
}

impl CityGuide {
    /// Build a guide with the default agent configuration
    pub fn new(client: Arc<dyn ModelClient>, geo: Arc<dyn GeoDataClient>) -> Self {
        Self::with_config(
            client,
            geo,
            AgentConfig {
                system_prompt: CITY_GUIDE_PROMPT.into(),
                ..Default::default()
            },
        )
    }

    pub fn with_config(
        client: Arc<dyn ModelClient>,
        geo: Arc<dyn GeoDataClient>,
        config: AgentConfig,
    ) -> Self {
        let mut tools = ToolRegistry::new();
        tools.register(CurrentWeatherTool::new(geo.clone()));
        tools.register(RedditPostsTool::new(geo.clone()));
        tools.register(TrafficConditionsTool::new(geo.clone()));
        tools.register(NearbyPlacesTool::new(geo.clone()));
        tools.register(PlacesAlongRouteTool::new(geo.clone()));
        tools.register(AttractionRouteTool::new(geo));

        Self {
            agent: Agent::new(client, Arc::new(tools), config),
            resolver: OverrideResolver::new(),
        }
    }

    /// Answer one request. Always returns a plain string: the model's
    /// final answer, or a user-facing error description.
    pub async fn answer(&self, request: &GuideRequest) -> String {
        match self.run(request).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!(error = %e, "guide run failed");
                e.user_message()
            }
        }
    }

    async fn run(&self, request: &GuideRequest) -> agent_core::Result<String> {
        let forced = self
            .resolver
            .resolve(&request.prompt, request.origin, request.destination)
            .map_err(AgentError::from)?;

        let mut run = RunRequest::new(&request.prompt);

        if let Some(origin) = request.origin {
            let mut note = format!(
                "Context: The user's current location is latitude: {}, longitude: {}",
                origin.lat, origin.lng
            );
            if let Some(destination) = request.destination {
                note.push_str(&format!(
                    ". Their destination is latitude: {}, longitude: {}",
                    destination.lat, destination.lng
                ));
            }
            run = run.with_context_note(note);
        }

        if let Some(call) = forced {
            run = run.with_forced_call(call);
        }

        self.agent.run(&run).await
    }

    /// The agent behind the facade (for diagnostics)
    pub fn agent(&self) -> &Agent {
        &self.agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::MockGeoClient;
    use agent_core::{GenerationOptions, Message, ModelInfo, ModelTurn, Role, MANUAL_OVERRIDE_ID};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted fake model recording the conversations it receives
    struct ScriptedClient {
        turns: Mutex<Vec<ModelTurn>>,
        seen: Mutex<Vec<Vec<Message>>>,
    }

    impl ScriptedClient {
        fn new(mut turns: Vec<ModelTurn>) -> Self {
            turns.reverse();
            Self {
                turns: Mutex::new(turns),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<Vec<Message>> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelClient for ScriptedClient {
        async fn send(
            &self,
            messages: &[Message],
            _options: &GenerationOptions,
        ) -> agent_core::Result<ModelTurn> {
            self.seen.lock().unwrap().push(messages.to_vec());
            self.turns
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| AgentError::Model("script exhausted".into()))
        }

        async fn health_check(&self) -> agent_core::Result<bool> {
            Ok(true)
        }

        async fn list_models(&self) -> agent_core::Result<Vec<ModelInfo>> {
            Ok(vec![])
        }
    }

    fn guide(turns: Vec<ModelTurn>) -> (CityGuide, Arc<ScriptedClient>) {
        let client = Arc::new(ScriptedClient::new(turns));
        let guide = CityGuide::new(client.clone(), Arc::new(MockGeoClient::new()));
        (guide, client)
    }

    #[tokio::test]
    async fn plain_question_goes_straight_to_the_model() {
        let (guide, client) = guide(vec![ModelTurn::answer(
            "Mumbai is lovely this time of year.",
            "fake",
        )]);

        let answer = guide
            .answer(&GuideRequest::new("tell me about the city"))
            .await;

        assert_eq!(answer, "Mumbai is lovely this time of year.");
        // No tool message: no override, no model tool request
        assert!(client.seen()[0].iter().all(|m| m.role != Role::Tool));
    }

    #[tokio::test]
    async fn restaurant_prompt_runs_the_override_before_the_model() {
        let (guide, client) = guide(vec![ModelTurn::answer(
            "Try Cafe Crossroads on Hill Road.",
            "fake",
        )]);

        let request = GuideRequest::new("find a good restaurant for dinner")
            .with_origin(GeoPoint::new(19.05, 72.84).unwrap());
        let answer = guide.answer(&request).await;

        assert_eq!(answer, "Try Cafe Crossroads on Hill Road.");
        let seen = client.seen();
        let tool_msg = seen[0]
            .iter()
            .find(|m| m.role == Role::Tool)
            .expect("forced result precedes the model call");
        assert_eq!(tool_msg.tool_call_id.as_deref(), Some(MANUAL_OVERRIDE_ID));
        assert!(tool_msg.content.contains("Cafe Crossroads"));
    }

    #[tokio::test]
    async fn location_context_is_annotated_on_the_prompt() {
        let (guide, client) = guide(vec![ModelTurn::answer("ok", "fake")]);

        let request = GuideRequest::new("what should I do today?")
            .with_origin(GeoPoint::new(19.05, 72.84).unwrap());
        guide.answer(&request).await;

        let user = client.seen()[0]
            .iter()
            .find(|m| m.role == Role::User)
            .cloned()
            .unwrap();
        assert!(user.content.contains("latitude: 19.05"));
    }

    #[tokio::test]
    async fn traffic_prompt_without_coordinates_is_a_user_facing_error() {
        let (guide, client) = guide(vec![]);

        let answer = guide
            .answer(&GuideRequest::new("what's the traffic like?"))
            .await;

        assert!(answer.contains("Coordinates are required"));
        assert!(client.seen().is_empty(), "run never reaches the model");
    }

    #[tokio::test]
    async fn empty_prompt_is_a_user_facing_error() {
        let (guide, _client) = guide(vec![]);
        let answer = guide.answer(&GuideRequest::new("")).await;
        assert!(answer.contains("provide a question"));
    }

    #[tokio::test]
    async fn model_failure_keeps_two_part_shape() {
        let (guide, _client) = guide(vec![]);
        let answer = guide.answer(&GuideRequest::new("hello there")).await;
        assert!(answer.contains("Data sources: none"));
    }
}
