//! Service wiring: backend client, session manager, statistics source.

use std::sync::Arc;

use async_trait::async_trait;

use notapro_auth::SessionToken;
use notapro_client::{ApiClient, ApiError, NoteStats};
use notapro_session::SessionManager;
use notapro_stats::{StatsHandle, StatsPoller, StatsSource};

use crate::config::GatewayConfig;

/// Shared request state.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub stats: StatsHandle,
    pub cookie_secure: bool,
}

/// Statistics source backed by the REST client, optionally authenticated
/// with a service-level bearer.
pub struct BackendStatsSource {
    client: ApiClient,
    token: Option<SessionToken>,
}

impl BackendStatsSource {
    pub fn new(client: ApiClient, token: Option<String>) -> Self {
        Self {
            client,
            token: token.map(SessionToken::new),
        }
    }
}

#[async_trait]
impl StatsSource for BackendStatsSource {
    async fn fetch_note_stats(&self) -> Result<NoteStats, ApiError> {
        self.client.fetch_note_stats(self.token.as_ref()).await
    }
}

/// Wire the backend client into the session manager and statistics poller.
pub fn build_services(config: &GatewayConfig) -> (AppState, StatsPoller) {
    let client = ApiClient::new(&config.backend_url);

    let sessions = Arc::new(SessionManager::new(Arc::new(client.clone())));
    let poller = StatsPoller::new(Arc::new(BackendStatsSource::new(
        client,
        config.stats_token.clone(),
    )));

    let state = AppState {
        sessions,
        stats: poller.handle(),
        cookie_secure: config.cookie_secure,
    };

    (state, poller)
}
