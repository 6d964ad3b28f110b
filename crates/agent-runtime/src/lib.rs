//! # agent-runtime
//!
//! Model-client backends for the CityPulse agent.
//!
//! ## Backends
//!
//! - **Ollama** (default): Local LLM inference via Ollama
//! - **OpenAI** (coming soon): OpenAI API integration
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::OllamaClient;
//!
//! let client = OllamaClient::new("http://localhost", 11434);
//! let agent = AgentBuilder::new()
//!     .client(Arc::new(client))
//!     .build()?;
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "ollama")]
pub use ollama::{OllamaClient, OllamaConfig};

// Re-export core types for convenience
pub use agent_core::{
    Agent, AgentError, Message, ModelClient, Result, Role, Tool, ToolRegistry,
};
