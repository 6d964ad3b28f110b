//! Agent Loop
//!
//! The conversation orchestrator: seeds the message history, asks the
//! model for a turn, executes any requested tool calls, feeds the results
//! back, and loops until the model answers with no further tool requests.
//!
//! Rounds are bounded by `AgentConfig::max_rounds` and every suspension
//! point (model call, tool call) runs under a fixed per-call timeout.

use std::sync::Arc;
use std::time::Duration;

use crate::client::{GenerationOptions, ModelClient, ModelTurn};
use crate::error::{AgentError, Result};
use crate::invoker::ToolInvoker;
use crate::message::{Conversation, Message};
use crate::tool::{ToolCall, ToolRegistry, ToolResult, MANUAL_OVERRIDE_ID};

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// System prompt with behavioral instructions
    pub system_prompt: String,

    /// Maximum rounds before the run is aborted. A forced override call
    /// counts as a round.
    pub max_rounds: usize,

    /// Fixed timeout applied to every model and tool call
    pub call_timeout: Duration,

    /// Generation options
    pub generation: GenerationOptions,

    /// Whether to append tool descriptions to the system prompt
    pub inject_tool_descriptions: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            max_rounds: 10,
            call_timeout: Duration::from_secs(120),
            generation: GenerationOptions::default(),
            inject_tool_descriptions: true,
        }
    }
}

const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a helpful AI assistant.

When you need external data, request a tool. After receiving tool results,
synthesize them into a helpful response. If you can answer directly without
tools, do so. Be concise and accurate."#;

/// One orchestration run's input: the user prompt, an optional location
/// annotation, and an optional forced tool call resolved by an override.
#[derive(Clone, Debug, Default)]
pub struct RunRequest {
    /// The user's request
    pub prompt: String,

    /// Context appended to the prompt (e.g., the user's coordinates)
    pub context_note: Option<String>,

    /// Forced tool call that bypasses model tool-selection for the first
    /// round
    pub forced_call: Option<ToolCall>,
}

impl RunRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_context_note(mut self, note: impl Into<String>) -> Self {
        self.context_note = Some(note.into());
        self
    }

    pub fn with_forced_call(mut self, call: ToolCall) -> Self {
        self.forced_call = Some(call);
        self
    }
}

/// The conversation orchestrator
pub struct Agent {
    client: Arc<dyn ModelClient>,
    tools: Arc<ToolRegistry>,
    config: AgentConfig,
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Agent {
    pub fn new(client: Arc<dyn ModelClient>, tools: Arc<ToolRegistry>, config: AgentConfig) -> Self {
        Self {
            client,
            tools,
            config,
        }
    }

    /// Create with default configuration
    pub fn with_defaults(client: Arc<dyn ModelClient>, tools: Arc<ToolRegistry>) -> Self {
        Self::new(client, tools, AgentConfig::default())
    }

    /// Build the full system prompt including tool descriptions
    fn build_system_prompt(&self) -> String {
        let mut prompt = self.config.system_prompt.clone();

        if self.config.inject_tool_descriptions && !self.tools.is_empty() {
            prompt.push_str("\n\n");
            prompt.push_str(&self.tools.prompt_section());
        }

        prompt
    }

    /// Run the orchestration loop for one request.
    ///
    /// Returns the model's final answer, or an error when the prompt is
    /// empty, the round cap is exceeded, or the model client fails. Tool
    /// failures never abort the run; they flow back to the model as
    /// failure results.
    pub async fn run(&self, request: &RunRequest) -> Result<String> {
        if request.prompt.trim().is_empty() {
            return Err(AgentError::EmptyPrompt);
        }

        let mut conversation = Conversation::with_system_prompt(self.build_system_prompt());

        let mut user_content = request.prompt.clone();
        if let Some(note) = &request.context_note {
            user_content.push_str(&format!("\n\n({note})"));
        }
        conversation.push(Message::user(user_content));

        let mut rounds = 0usize;

        // A resolved override substitutes a direct tool invocation for
        // the first model call; the model still gets one call afterwards
        // to synthesize given the forced result.
        if let Some(forced) = &request.forced_call {
            rounds += 1;
            tracing::info!(tool = %forced.name, "executing override tool call");
            let forced = forced.clone().with_id(MANUAL_OVERRIDE_ID);
            let result = self.execute_call(&forced).await;
            conversation.push(Self::tool_message(&result));
        }

        loop {
            rounds += 1;
            if rounds > self.config.max_rounds {
                return Err(AgentError::MaxRounds(self.config.max_rounds));
            }

            let turn = self.send(&conversation).await?;

            if turn.is_final() {
                conversation.push(Message::assistant(&turn.content));
                tracing::info!(rounds, "run finished with final answer");
                return Ok(turn.content);
            }

            tracing::info!(count = turn.tool_calls.len(), "model requested tool calls");
            conversation.push(Message::assistant_with_calls(
                &turn.content,
                turn.tool_calls.clone(),
            ));

            for call in &turn.tool_calls {
                let result = self.execute_call(call).await;
                conversation.push(Self::tool_message(&result));
            }
        }
    }

    /// Send the accumulated conversation to the model under the per-call
    /// timeout. Model failures are fatal for the run; no retry.
    async fn send(&self, conversation: &Conversation) -> Result<ModelTurn> {
        tokio::time::timeout(
            self.config.call_timeout,
            self.client.send(conversation.messages(), &self.config.generation),
        )
        .await
        .map_err(|_| AgentError::Timeout(self.config.call_timeout))?
    }

    /// Execute one tool call. An unknown tool name is recovered locally
    /// as a failure result so the model can self-correct next round.
    async fn execute_call(&self, call: &ToolCall) -> ToolResult {
        let Some(tool) = self.tools.get(&call.name) else {
            tracing::warn!(tool = %call.name, "requested tool not found");
            return ToolResult::failure(
                &call.name,
                format!(
                    "Requested tool \"{}\" is not available. Valid tools: {}",
                    call.name,
                    self.tools.names().join(", ")
                ),
            )
            .with_id(call.id_or_override());
        };

        match tokio::time::timeout(self.config.call_timeout, ToolInvoker::invoke(&tool, call))
            .await
        {
            Ok(result) => result,
            Err(_) => ToolResult::failure(
                &call.name,
                format!(
                    "Tool \"{}\" timed out after {:?}",
                    call.name, self.config.call_timeout
                ),
            )
            .with_id(call.id_or_override()),
        }
    }

    /// Format a tool result as a conversation message
    fn tool_message(result: &ToolResult) -> Message {
        let content = if result.success {
            format!("[Tool '{}' returned]\n{}", result.name, result.output)
        } else {
            format!("[Tool '{}' failed]\n{}", result.name, result.output)
        };
        Message::tool(content, result.id.clone())
    }

    /// Get the tool registry
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Get configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Builder for Agent configuration
pub struct AgentBuilder {
    client: Option<Arc<dyn ModelClient>>,
    tools: ToolRegistry,
    config: AgentConfig,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            client: None,
            tools: ToolRegistry::new(),
            config: AgentConfig::default(),
        }
    }

    pub fn client(mut self, client: Arc<dyn ModelClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn tool<T: crate::tool::Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.register(tool);
        self
    }

    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.generation.model = model.into();
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.generation.temperature = temp;
        self
    }

    pub fn max_rounds(mut self, max: usize) -> Self {
        self.config.max_rounds = max;
        self
    }

    pub fn call_timeout(mut self, timeout: Duration) -> Self {
        self.config.call_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Agent> {
        let client = self
            .client
            .ok_or_else(|| AgentError::Config("Model client is required".into()))?;

        Ok(Agent::new(client, Arc::new(self.tools), self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ModelInfo;
    use crate::message::Role;
    use crate::tool::{ParameterSchema, Tool, ToolSchema};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted fake model: returns the queued turns in order and records
    /// a snapshot of every conversation it was sent.
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
        ) -> Result<ModelTurn> {
            self.seen.lock().unwrap().push(messages.to_vec());
            self.turns
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| AgentError::Model("script exhausted".into()))
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        async fn list_models(&self) -> Result<Vec<ModelInfo>> {
            Ok(vec![])
        }
    }

    /// Fake model that always requests the same tool call
    struct LoopingClient;

    #[async_trait]
    impl ModelClient for LoopingClient {
        async fn send(
            &self,
            _messages: &[Message],
            _options: &GenerationOptions,
        ) -> Result<ModelTurn> {
            Ok(ModelTurn::answer("one more", "fake")
                .with_calls(vec![ToolCall::new("counter").with_id("loop")]))
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        async fn list_models(&self) -> Result<Vec<ModelInfo>> {
            Ok(vec![])
        }
    }

    /// Always-succeeding tool that counts its invocations
    struct CountingTool {
        count: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Tool for CountingTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "counter".into(),
                description: "Counts invocations".into(),
                parameters: vec![],
            }
        }

        async fn execute(&self, _call: &ToolCall) -> Result<ToolResult> {
            let n = self.count.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(ToolResult::success("counter", format!("count {n}")))
        }
    }

    struct StaticTool {
        name: &'static str,
        output: &'static str,
    }

    #[async_trait]
    impl Tool for StaticTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.name.into(),
                description: "Static fixture".into(),
                parameters: vec![ParameterSchema::string("city", "City name", false)],
            }
        }

        async fn execute(&self, _call: &ToolCall) -> Result<ToolResult> {
            Ok(ToolResult::success(self.name, self.output))
        }
    }

    fn counting_registry(count: &Arc<AtomicUsize>) -> ToolRegistry {
        let mut tools = ToolRegistry::new();
        tools.register(CountingTool {
            count: count.clone(),
        });
        tools
    }

    #[tokio::test]
    async fn immediate_answer_passes_through_unchanged() {
        let count = Arc::new(AtomicUsize::new(0));
        let client = Arc::new(ScriptedClient::new(vec![ModelTurn::answer(
            "The weather is lovely.",
            "fake",
        )]));
        let agent = Agent::with_defaults(client, Arc::new(counting_registry(&count)));

        let answer = agent
            .run(&RunRequest::new("How is the weather?"))
            .await
            .unwrap();

        assert_eq!(answer, "The weather is lovely.");
        assert_eq!(count.load(Ordering::SeqCst), 0, "no tool may be invoked");
    }

    #[tokio::test]
    async fn empty_prompt_never_reaches_the_model() {
        let client = Arc::new(ScriptedClient::new(vec![]));
        let agent = Agent::with_defaults(client.clone(), Arc::new(ToolRegistry::new()));

        let err = agent.run(&RunRequest::new("   ")).await.unwrap_err();
        assert!(matches!(err, AgentError::EmptyPrompt));
        assert!(client.seen().is_empty());
    }

    #[tokio::test]
    async fn loop_terminates_at_max_rounds() {
        let count = Arc::new(AtomicUsize::new(0));
        let agent = Agent::new(
            Arc::new(LoopingClient),
            Arc::new(counting_registry(&count)),
            AgentConfig {
                max_rounds: 4,
                ..Default::default()
            },
        );

        let err = agent.run(&RunRequest::new("loop forever")).await.unwrap_err();
        assert!(matches!(err, AgentError::MaxRounds(4)));
        assert!(count.load(Ordering::SeqCst) <= 4);
    }

    #[tokio::test]
    async fn weather_and_buzz_two_round_scenario() {
        let first = ModelTurn::answer("Checking...", "fake").with_calls(vec![
            ToolCall::new("getCurrentWeather").with_id("call-1"),
            ToolCall::new("getRedditPosts").with_id("call-2"),
        ]);
        let second = ModelTurn::answer("Sunny, mixed chatter", "fake");
        let client = Arc::new(ScriptedClient::new(vec![first, second]));

        let mut tools = ToolRegistry::new();
        tools.register(StaticTool {
            name: "getCurrentWeather",
            output: "32C, sunny",
        });
        tools.register(StaticTool {
            name: "getRedditPosts",
            output: "2 rising posts",
        });

        let agent = Agent::with_defaults(client.clone(), Arc::new(tools));
        let answer = agent
            .run(&RunRequest::new("What's the weather and local buzz like today?"))
            .await
            .unwrap();

        assert_eq!(answer, "Sunny, mixed chatter");

        // Both tool results must be in the sequence before the second
        // model call, in request order.
        let seen = client.seen();
        assert_eq!(seen.len(), 2);
        let second_send = &seen[1];
        let tool_messages: Vec<&Message> = second_send
            .iter()
            .filter(|m| m.role == Role::Tool)
            .collect();
        assert_eq!(tool_messages.len(), 2);
        assert_eq!(tool_messages[0].tool_call_id.as_deref(), Some("call-1"));
        assert_eq!(tool_messages[1].tool_call_id.as_deref(), Some("call-2"));
        assert!(tool_messages[0].content.contains("32C, sunny"));
    }

    #[tokio::test]
    async fn unknown_tool_is_recovered_and_loop_continues() {
        let first = ModelTurn::answer("Trying something...", "fake")
            .with_calls(vec![ToolCall::new("doSomethingUnknown").with_id("call-1")]);
        let second = ModelTurn::answer("Never mind, here is your answer.", "fake");
        let client = Arc::new(ScriptedClient::new(vec![first, second]));

        let mut tools = ToolRegistry::new();
        tools.register(StaticTool {
            name: "getCurrentWeather",
            output: "32C",
        });

        let agent = Agent::with_defaults(client.clone(), Arc::new(tools));
        let answer = agent.run(&RunRequest::new("do it")).await.unwrap();
        assert_eq!(answer, "Never mind, here is your answer.");

        let seen = client.seen();
        let failure = seen[1]
            .iter()
            .find(|m| m.role == Role::Tool)
            .expect("failure tool message appended");
        assert!(failure.content.contains("doSomethingUnknown"));
        assert!(failure.content.contains("getCurrentWeather"), "lists valid names");
    }

    #[tokio::test]
    async fn forced_call_skips_the_first_model_call() {
        let turns = vec![ModelTurn::answer("Based on the forced data: done.", "fake")];
        let client = Arc::new(ScriptedClient::new(turns));

        let count = Arc::new(AtomicUsize::new(0));
        let agent = Agent::with_defaults(client.clone(), Arc::new(counting_registry(&count)));

        let request = RunRequest::new("find food near me")
            .with_forced_call(ToolCall::new("counter"));
        let answer = agent.run(&request).await.unwrap();

        assert_eq!(answer, "Based on the forced data: done.");
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // The one model call already sees the override result, tagged
        // with the sentinel id.
        let seen = client.seen();
        assert_eq!(seen.len(), 1);
        let tool_msg = seen[0]
            .iter()
            .find(|m| m.role == Role::Tool)
            .expect("override result appended before the model call");
        assert_eq!(tool_msg.tool_call_id.as_deref(), Some(MANUAL_OVERRIDE_ID));
    }

    #[tokio::test]
    async fn model_failure_is_fatal_and_not_retried() {
        let client = Arc::new(ScriptedClient::new(vec![]));
        let agent = Agent::with_defaults(client.clone(), Arc::new(ToolRegistry::new()));

        let err = agent.run(&RunRequest::new("hello")).await.unwrap_err();
        assert!(matches!(err, AgentError::Model(_)));
        assert_eq!(client.seen().len(), 1);
    }

    #[test]
    fn builder_requires_a_client() {
        let err = AgentBuilder::new().build().unwrap_err();
        assert!(matches!(err, AgentError::Config(_)));
    }
}
