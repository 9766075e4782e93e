// libs/cancellation-cell/src/services/token.rs
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use shared_meevo::MeevoClient;

use crate::models::CancellationError;

/// A token is never handed out within this margin of its expiry.
const EXPIRY_MARGIN: i64 = 300;

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Single-slot bearer token cache.
///
/// The lock covers only the slot itself, not the credentials exchange: two
/// concurrent cache misses each perform their own exchange and the later
/// writer wins.
#[derive(Debug, Default)]
pub struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token if it is still comfortably within its
    /// lifetime at `now`, without any network activity.
    pub fn get(&self, now: DateTime<Utc>) -> Option<String> {
        let slot = self.slot.lock().ok()?;
        slot.as_ref()
            .filter(|cached| now < cached.expires_at - Duration::seconds(EXPIRY_MARGIN))
            .map(|cached| cached.token.clone())
    }

    pub fn set(&self, token: String, expires_at: DateTime<Utc>) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(CachedToken { token, expires_at });
        }
    }
}

/// Fetch a usable bearer token, refreshing through the client-credentials
/// exchange when the cached one is missing or near expiry. Exchange failures
/// propagate; there is no retry.
pub async fn get_token(
    cache: &TokenCache,
    meevo: &MeevoClient,
) -> Result<String, CancellationError> {
    if let Some(token) = cache.get(Utc::now()) {
        return Ok(token);
    }

    info!("Getting fresh Meevo token");
    let response = meevo.exchange_token().await?;
    let expires_at = Utc::now() + Duration::seconds(response.expires_in);
    cache.set(response.access_token.clone(), expires_at);

    Ok(response.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn empty_cache_misses() {
        let cache = TokenCache::new();
        assert_eq!(cache.get(at(0)), None);
    }

    #[test]
    fn fresh_token_is_returned() {
        let cache = TokenCache::new();
        cache.set("tok".to_string(), at(3600));
        assert_eq!(cache.get(at(0)), Some("tok".to_string()));
    }

    #[test]
    fn token_within_expiry_margin_misses() {
        let cache = TokenCache::new();
        cache.set("tok".to_string(), at(3600));

        // Strictly inside the margin: miss.
        assert_eq!(cache.get(at(3600 - EXPIRY_MARGIN)), None);
        assert_eq!(cache.get(at(3600 - EXPIRY_MARGIN + 1)), None);
        // One second outside the margin: hit.
        assert_eq!(cache.get(at(3600 - EXPIRY_MARGIN - 1)), Some("tok".to_string()));
    }

    #[test]
    fn later_set_replaces_the_slot() {
        let cache = TokenCache::new();
        cache.set("old".to_string(), at(3600));
        cache.set("new".to_string(), at(7200));
        assert_eq!(cache.get(at(0)), Some("new".to_string()));
    }
}
