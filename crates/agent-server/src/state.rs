//! Application State

use std::sync::Arc;

use agent_core::ModelClient;
use city_guide::{CityGuide, RoutePlanner};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Model client (Ollama, etc.)
    pub client: Arc<dyn ModelClient>,

    /// Conversational city guide
    pub guide: Arc<CityGuide>,

    /// Non-conversational route analysis
    pub planner: Arc<RoutePlanner>,
}
