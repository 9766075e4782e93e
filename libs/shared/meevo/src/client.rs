use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::models::{BookedService, ClientDetail, ClientRecord, Envelope, TokenResponse};

// Per-call timeouts for the best-effort read endpoints. A page or detail
// fetch that blows its timeout is absorbed by the caller as an empty result.
const PAGE_TIMEOUT: Duration = Duration::from_secs(3);
const DETAIL_TIMEOUT: Duration = Duration::from_secs(2);
const SERVICES_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum MeevoError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("Failed to parse Meevo response: {0}")]
    Parse(String),
}

/// Client for the Meevo public API, scoped to one tenant and location.
pub struct MeevoClient {
    client: Client,
    auth_url: String,
    api_url: String,
    client_id: String,
    client_secret: String,
    tenant_id: String,
    location_id: String,
}

impl MeevoClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            auth_url: config.meevo_auth_url.clone(),
            api_url: config.meevo_api_url.clone(),
            client_id: config.meevo_client_id.clone(),
            client_secret: config.meevo_client_secret.clone(),
            tenant_id: config.meevo_tenant_id.clone(),
            location_id: config.meevo_location_id.clone(),
        }
    }

    /// Exchange client credentials for a bearer token.
    pub async fn exchange_token(&self) -> Result<TokenResponse, MeevoError> {
        debug!("Requesting fresh token from {}", self.auth_url);

        let response = self
            .client
            .post(&self.auth_url)
            .json(&json!({
                "client_id": self.client_id,
                "client_secret": self.client_secret,
            }))
            .send()
            .await?;

        Self::read_json(response).await
    }

    /// Fetch one page of the client directory list view.
    pub async fn list_clients_page(
        &self,
        token: &str,
        page: u32,
        items_per_page: u32,
    ) -> Result<Vec<ClientRecord>, MeevoError> {
        let url = format!("{}/clients", self.api_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("tenantid", self.tenant_id.as_str()),
                ("locationid", self.location_id.as_str()),
                ("PageNumber", &page.to_string()),
                ("ItemsPerPage", &items_per_page.to_string()),
            ])
            .timeout(PAGE_TIMEOUT)
            .send()
            .await?;

        let records: Envelope<Vec<ClientRecord>> = Self::read_json(response).await?;
        Ok(records.into_inner())
    }

    /// Fetch the full detail record for one client (the only view that
    /// exposes the guardian reference).
    pub async fn get_client_detail(
        &self,
        token: &str,
        client_id: &str,
    ) -> Result<ClientDetail, MeevoError> {
        let url = format!("{}/client/{}", self.api_url, client_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("TenantId", self.tenant_id.as_str()),
                ("LocationId", self.location_id.as_str()),
            ])
            .timeout(DETAIL_TIMEOUT)
            .send()
            .await?;

        let detail: Envelope<ClientDetail> = Self::read_json(response).await?;
        Ok(detail.into_inner())
    }

    /// Fetch all booked services for a client.
    pub async fn booked_services(
        &self,
        token: &str,
        client_id: &str,
    ) -> Result<Vec<BookedService>, MeevoError> {
        let url = format!("{}/book/client/{}/services", self.api_url, client_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("TenantId", self.tenant_id.as_str()),
                ("LocationId", self.location_id.as_str()),
            ])
            .timeout(SERVICES_TIMEOUT)
            .send()
            .await?;

        let services: Envelope<Vec<BookedService>> = Self::read_json(response).await?;
        Ok(services.into_inner())
    }

    /// Cancel one booked service. The concurrency-check digits must come from
    /// the same lookup that found the service; a stale value is rejected by
    /// the remote system.
    pub async fn cancel_service(
        &self,
        token: &str,
        service_id: &str,
        concurrency_check_digits: &str,
    ) -> Result<(), MeevoError> {
        let url = format!("{}/book/service/{}", self.api_url, service_id);

        let response = self
            .client
            .delete(&url)
            .bearer_auth(token)
            .query(&[
                ("TenantId", self.tenant_id.as_str()),
                ("LocationId", self.location_id.as_str()),
                ("ConcurrencyCheckDigits", concurrency_check_digits),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Cancellation rejected ({}): {}", status, body);
            return Err(Self::api_error(status, body));
        }

        debug!("Cancellation accepted for service {}", service_id);
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, MeevoError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Meevo API error ({}): {}", status, body);
            return Err(Self::api_error(status, body));
        }

        serde_json::from_str(&body).map_err(|e| MeevoError::Parse(e.to_string()))
    }

    /// Prefer the remote-provided `error.message` when the body carries one,
    /// falling back to the raw body text.
    fn api_error(status: StatusCode, body: String) -> MeevoError {
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("HTTP {}: {}", status, body));

        MeevoError::Api { status, message }
    }
}
