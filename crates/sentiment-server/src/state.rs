use sentiment_core::config::AppConfig;
use sentiment_core::{Analyzer, SessionManager};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state for the server.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub analyzer: Analyzer,
    pub sessions: Arc<RwLock<SessionManager>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let analyzer = Analyzer::from_config(&config)?;
        Ok(Self::with_analyzer(config, analyzer))
    }

    pub fn with_analyzer(config: AppConfig, analyzer: Analyzer) -> Self {
        let sessions = SessionManager::new(&config);
        Self {
            config,
            analyzer,
            sessions: Arc::new(RwLock::new(sessions)),
        }
    }
}
