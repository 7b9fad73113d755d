use crate::config::ServerConfig;
use compass_ai::PositioningAnalyzer;
use compass_store::CompetitorStore;
use std::sync::Arc;

/// Shared handles injected into every request handler.
///
/// Both clients are stateless and connection-per-call; cloning the state is
/// cheap and requires no further coordination.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<dyn PositioningAnalyzer>,
    pub store: Arc<dyn CompetitorStore>,
    pub config: Arc<ServerConfig>,
}
