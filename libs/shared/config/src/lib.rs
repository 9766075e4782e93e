use std::env;
use tracing::warn;

/// Tuning knobs for the paginated directory scans.
///
/// The directory API has no search-by-phone or search-by-guardian endpoint,
/// so lookups enumerate pages in concurrent batches. One parameterized
/// implementation replaces the per-deployment copies that only differed in
/// these bounds.
#[derive(Debug, Clone)]
pub struct SearchTuning {
    pub pages_per_batch: u32,
    pub items_per_page: u32,
    pub max_batches: u32,
    pub linked_profiles_enabled: bool,
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self {
            pages_per_batch: 10,
            items_per_page: 100,
            max_batches: 20,
            linked_profiles_enabled: true,
        }
    }
}

impl SearchTuning {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            pages_per_batch: parse_env("SEARCH_PAGES_PER_BATCH", defaults.pages_per_batch),
            items_per_page: parse_env("SEARCH_ITEMS_PER_PAGE", defaults.items_per_page),
            max_batches: parse_env("SEARCH_MAX_BATCHES", defaults.max_batches),
            linked_profiles_enabled: parse_env(
                "LINKED_PROFILES_ENABLED",
                defaults.linked_profiles_enabled,
            ),
        }
    }
}

fn parse_env<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} has an unparseable value, using default", name);
            default
        }),
        Err(_) => default,
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub meevo_auth_url: String,
    pub meevo_api_url: String,
    pub meevo_client_id: String,
    pub meevo_client_secret: String,
    pub meevo_tenant_id: String,
    pub meevo_location_id: String,
    pub environment_name: String,
    pub location_name: String,
    pub port: u16,
    pub search: SearchTuning,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            meevo_auth_url: env::var("MEEVO_AUTH_URL").unwrap_or_else(|_| {
                warn!("MEEVO_AUTH_URL not set, using default");
                "https://marketplace.meevo.com/oauth2/token".to_string()
            }),
            meevo_api_url: env::var("MEEVO_API_URL").unwrap_or_else(|_| {
                warn!("MEEVO_API_URL not set, using default");
                "https://na1pub.meevo.com/publicapi/v1".to_string()
            }),
            meevo_client_id: env::var("MEEVO_CLIENT_ID").unwrap_or_else(|_| {
                warn!("MEEVO_CLIENT_ID not set, using empty value");
                String::new()
            }),
            meevo_client_secret: env::var("MEEVO_CLIENT_SECRET").unwrap_or_else(|_| {
                warn!("MEEVO_CLIENT_SECRET not set, using empty value");
                String::new()
            }),
            meevo_tenant_id: env::var("MEEVO_TENANT_ID").unwrap_or_else(|_| {
                warn!("MEEVO_TENANT_ID not set, using empty value");
                String::new()
            }),
            meevo_location_id: env::var("MEEVO_LOCATION_ID").unwrap_or_else(|_| {
                warn!("MEEVO_LOCATION_ID not set, using empty value");
                String::new()
            }),
            environment_name: env::var("ENVIRONMENT_NAME")
                .unwrap_or_else(|_| "PRODUCTION".to_string()),
            location_name: env::var("LOCATION_NAME").unwrap_or_else(|_| String::new()),
            port: parse_env("PORT", 3000),
            search: SearchTuning::from_env(),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.meevo_client_id.is_empty()
            && !self.meevo_client_secret.is_empty()
            && !self.meevo_tenant_id.is_empty()
            && !self.meevo_location_id.is_empty()
    }
}
