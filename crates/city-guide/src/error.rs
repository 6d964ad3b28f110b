//! Error Types for the City Guide

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GuideError>;

#[derive(Error, Debug)]
pub enum GuideError {
    #[error("Missing API key: set {0} in the environment")]
    MissingApiKey(&'static str),

    #[error("{service} API error: {message}")]
    Api { service: String, message: String },

    #[error("No places found matching '{0}' near the specified location")]
    NoResults(String),

    #[error("Could not find a route to {0}")]
    NoRoute(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Coordinates are required for {0}, but none were provided")]
    CoordinatesRequired(&'static str),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GuideError {
    pub fn api(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            service: service.into(),
            message: message.into(),
        }
    }
}

impl From<GuideError> for agent_core::AgentError {
    fn from(err: GuideError) -> Self {
        match err {
            GuideError::CoordinatesRequired(_) | GuideError::InvalidCoordinate(_) => {
                agent_core::AgentError::Precondition(err.to_string())
            }
            other => agent_core::AgentError::ToolExecution(other.to_string()),
        }
    }
}
