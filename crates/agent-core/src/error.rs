//! Error Types

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// Run started without a prompt
    #[error("A prompt must be provided")]
    EmptyPrompt,

    /// Precondition violation before the model was ever consulted
    /// (e.g., an override that needs coordinates received none)
    #[error("{0}")]
    Precondition(String),

    /// Model client error (fatal for the run, never retried)
    #[error("Model error: {0}")]
    Model(String),

    /// Model service unreachable or not responding
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Tool not found in registry
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool argument validation failed
    #[error("Tool validation error: {0}")]
    ToolValidation(String),

    /// Tool execution failed
    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// Maximum rounds reached in the tool-calling loop
    #[error("Maximum rounds ({0}) reached")]
    MaxRounds(usize),

    /// A model or tool call exceeded the per-call timeout
    #[error("Call timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Parse error (e.g., tool call parsing)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Check if the error is a precondition violation (run never reached the model)
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            AgentError::EmptyPrompt | AgentError::Precondition(_) | AgentError::Config(_)
        )
    }

    /// Convert to a user-facing message.
    ///
    /// Model-level failures keep the two-part response shape the rest of
    /// the system expects: an answer section followed by an empty data
    /// sources section.
    pub fn user_message(&self) -> String {
        match self {
            AgentError::EmptyPrompt => "Please provide a question or request.".into(),
            AgentError::Precondition(msg) => msg.clone(),
            AgentError::Model(msg) | AgentError::ModelUnavailable(msg) => format!(
                "Sorry, I could not reach the language model ({msg}).\n\nData sources: none"
            ),
            AgentError::ToolNotFound(name) => format!("The tool '{name}' is not available."),
            AgentError::ToolValidation(msg) => format!("Invalid tool input: {msg}"),
            AgentError::ToolExecution(msg) => format!("Tool error: {msg}"),
            AgentError::MaxRounds(_) => {
                "The request took too many steps to process. Please try a simpler question.".into()
            }
            AgentError::Timeout(_) => {
                "The request timed out while gathering data. Please try again.".into()
            }
            AgentError::Config(msg) => format!("Configuration problem: {msg}"),
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for AgentError {
    fn from(err: anyhow::Error) -> Self {
        AgentError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_keep_two_part_shape() {
        let msg = AgentError::Model("connection refused".into()).user_message();
        assert!(msg.contains("connection refused"));
        assert!(msg.ends_with("Data sources: none"));
    }

    #[test]
    fn empty_prompt_is_precondition() {
        assert!(AgentError::EmptyPrompt.is_precondition());
        assert!(!AgentError::MaxRounds(10).is_precondition());
    }
}
