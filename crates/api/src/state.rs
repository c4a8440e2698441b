use std::sync::Arc;

use crate::config::ServerConfig;
use crate::matching::MatchingSessionManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Mounted matching views and their draft state.
    pub sessions: Arc<MatchingSessionManager>,
}

impl AppState {
    /// Build state with a session manager sized from `config`.
    pub fn new(config: ServerConfig) -> Self {
        let sessions = Arc::new(MatchingSessionManager::new(config.max_matching_sessions));
        Self {
            config: Arc::new(config),
            sessions,
        }
    }
}
