// libs/cancellation-cell/src/state.rs
use std::sync::Arc;

use shared_config::AppConfig;
use shared_meevo::MeevoClient;

use crate::services::token::TokenCache;

/// Process-wide state behind the router: configuration, the Meevo client,
/// and the single-slot token cache that outlives individual requests.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub meevo: Arc<MeevoClient>,
    pub tokens: Arc<TokenCache>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let meevo = Arc::new(MeevoClient::new(&config));
        Self {
            config,
            meevo,
            tokens: Arc::new(TokenCache::new()),
        }
    }
}
