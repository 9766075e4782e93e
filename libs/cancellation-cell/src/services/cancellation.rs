// libs/cancellation-cell/src/services/cancellation.rs
use std::sync::Arc;

use tracing::{debug, info};

use shared_meevo::{ClientRecord, MeevoClient};

use crate::models::{CancelRequest, CancellationError};
use crate::services::appointments::AppointmentService;
use crate::services::directory::ClientDirectoryService;
use crate::services::token::{get_token, TokenCache};
use crate::state::AppState;

/// Orchestrates one cancellation request: token acquisition, client and
/// appointment resolution, then the cancellation call itself. Returns the
/// cancelled appointment-service id on success.
pub struct CancellationService {
    meevo: Arc<MeevoClient>,
    tokens: Arc<TokenCache>,
    directory: ClientDirectoryService,
    appointments: AppointmentService,
    linked_profiles_enabled: bool,
}

impl CancellationService {
    pub fn new(state: &AppState) -> Self {
        Self {
            meevo: Arc::clone(&state.meevo),
            tokens: Arc::clone(&state.tokens),
            directory: ClientDirectoryService::new(
                Arc::clone(&state.meevo),
                state.config.search.clone(),
            ),
            appointments: AppointmentService::new(Arc::clone(&state.meevo)),
            linked_profiles_enabled: state.config.search.linked_profiles_enabled,
        }
    }

    pub async fn cancel(&self, request: &CancelRequest) -> Result<String, CancellationError> {
        // Validation happens before any network activity.
        if request.appointment_service_id().is_none()
            && request.phone().is_none()
            && request.email().is_none()
        {
            return Err(CancellationError::MissingLookupInput);
        }

        let token = get_token(&self.tokens, &self.meevo).await?;

        let (service_id, concurrency_check) = match (
            request.appointment_service_id(),
            request.concurrency_check(),
            request.phone(),
        ) {
            // Everything needed is already in hand; no lookup.
            (Some(id), Some(check), _) => {
                debug!("Using provided appointment_service_id and concurrency_check");
                (id.to_string(), check.to_string())
            }

            // Fast path: the id is known but its concurrency check must be
            // recovered from whichever profile owns the appointment.
            (Some(id), None, Some(phone)) => {
                info!("Fast path: resolving concurrency check for service {}", id);
                let client = self
                    .directory
                    .find_client(&token, Some(phone), None)
                    .await
                    .ok_or(CancellationError::ClientNotFoundByPhone)?;

                let check = self.resolve_concurrency_check(&token, &client, id).await?;
                (id.to_string(), check)
            }

            // Id without concurrency check or phone: nothing to look up with,
            // so the mutation goes out with an empty check and the remote
            // rejection is surfaced to the caller.
            (Some(id), None, None) => (id.to_string(), String::new()),

            // No id: resolve the caller's soonest upcoming appointment.
            (None, _, _) => {
                let client = self
                    .directory
                    .find_client(&token, request.phone(), request.email())
                    .await
                    .ok_or(CancellationError::ClientNotFound)?;

                self.next_upcoming_appointment(&token, &client).await?
            }
        };

        self.meevo
            .cancel_service(&token, &service_id, &concurrency_check)
            .await?;

        info!("Cancelled appointment service {}", service_id);
        Ok(service_id)
    }

    /// Locate the concurrency check for a known service id: the caller's own
    /// services first, then each linked profile's, first match wins.
    async fn resolve_concurrency_check(
        &self,
        token: &str,
        client: &ClientRecord,
        appointment_service_id: &str,
    ) -> Result<String, CancellationError> {
        if let Some(service) = self
            .appointments
            .find_service_by_id(token, &client.client_id, appointment_service_id)
            .await
        {
            debug!(
                "Found concurrency check on caller {}",
                client.display_name()
            );
            return Ok(service.concurrency_check_digits);
        }

        if self.linked_profiles_enabled {
            info!("Service id not on caller, checking linked profiles");
            let profiles = self
                .directory
                .find_linked_profiles(token, &client.client_id)
                .await;

            for profile in profiles {
                if let Some(service) = self
                    .appointments
                    .find_service_by_id(token, &profile.client_id, appointment_service_id)
                    .await
                {
                    debug!("Found concurrency check on linked profile {}", profile.name);
                    return Ok(service.concurrency_check_digits);
                }
            }
        }

        Err(CancellationError::AppointmentNotFound)
    }

    /// Gather cancellable appointments across the caller and their linked
    /// profiles and pick the soonest.
    async fn next_upcoming_appointment(
        &self,
        token: &str,
        client: &ClientRecord,
    ) -> Result<(String, String), CancellationError> {
        let caller_name = client.display_name();
        let mut appointments = self
            .appointments
            .appointments_for(token, &client.client_id, &caller_name)
            .await;
        let caller_count = appointments.len();

        if self.linked_profiles_enabled {
            let profiles = self
                .directory
                .find_linked_profiles(token, &client.client_id)
                .await;

            for profile in &profiles {
                let mut linked = self
                    .appointments
                    .appointments_for(token, &profile.client_id, &profile.name)
                    .await;
                appointments.append(&mut linked);
            }
        }

        info!(
            "Total appointments: {} (caller) + {} (linked)",
            caller_count,
            appointments.len() - caller_count
        );

        appointments.sort_by_key(|appointment| appointment.start_time);

        let next = appointments
            .into_iter()
            .next()
            .ok_or(CancellationError::NoUpcomingAppointments)?;

        info!(
            "Found appointment to cancel: {} for {} at {}",
            next.appointment_service_id, next.client_name, next.start_time
        );

        Ok((next.appointment_service_id, next.concurrency_check))
    }
}
