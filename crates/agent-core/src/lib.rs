//! # agent-core
//!
//! Tool-calling orchestration core with a model-client abstraction and an
//! extensible tool system.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Agent                                 │
//! │  ┌─────────────┐  ┌──────────────┐  ┌────────────────────┐  │
//! │  │  Agent Loop │──│ ToolRegistry │  │   ModelClient      │  │
//! │  │             │  │ + Invoker    │──│   (trait)          │  │
//! │  └─────────────┘  └──────────────┘  └────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `ModelClient` trait keeps the agent loop independent of any
//! particular LLM backend; `agent-runtime` provides the Ollama
//! implementation and tests substitute scripted fakes.

pub mod agent;
pub mod client;
pub mod error;
pub mod invoker;
pub mod message;
pub mod tool;

pub use agent::{Agent, AgentBuilder, AgentConfig, RunRequest};
pub use client::{extract_tool_calls, GenerationOptions, ModelClient, ModelInfo, ModelTurn};
pub use error::{AgentError, Result};
pub use invoker::ToolInvoker;
pub use message::{Conversation, Message, Role};
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult, ToolSchema, MANUAL_OVERRIDE_ID};
