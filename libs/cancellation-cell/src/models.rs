// libs/cancellation-cell/src/models.rs
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_meevo::MeevoError;

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// Body of `POST /cancel`. Every field is optional; at least one of the
/// identifying fields (`appointment_service_id`, `phone`, `email`) must be
/// present for the request to be actionable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CancelRequest {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub appointment_service_id: Option<String>,
    pub concurrency_check: Option<String>,
}

impl CancelRequest {
    /// Blank strings from the voice platform are treated as absent.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref().filter(|s| !s.is_empty())
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|s| !s.is_empty())
    }

    pub fn appointment_service_id(&self) -> Option<&str> {
        self.appointment_service_id.as_deref().filter(|s| !s.is_empty())
    }

    pub fn concurrency_check(&self) -> Option<&str> {
        self.concurrency_check.as_deref().filter(|s| !s.is_empty())
    }
}

/// Body of every `/cancel` response. The HTTP status is always 200; callers
/// branch on `success`.
#[derive(Debug, Clone, Serialize)]
pub struct CancelResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_service_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CancelResponse {
    pub fn cancelled(appointment_service_id: String) -> Self {
        Self {
            success: true,
            cancelled: Some(true),
            message: Some("Your appointment has been cancelled".to_string()),
            appointment_service_id: Some(appointment_service_id),
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            cancelled: None,
            message: None,
            appointment_service_id: None,
            error: Some(error),
        }
    }
}

// ==============================================================================
// RESOLUTION MODELS
// ==============================================================================

/// A booked service that survived the upcoming/non-cancelled filter, carrying
/// everything the cancellation call needs. The concurrency check is the one
/// fetched alongside this record, never reused from another lookup.
#[derive(Debug, Clone)]
pub struct CancellableAppointment {
    pub appointment_id: Option<String>,
    pub appointment_service_id: String,
    pub start_time: DateTime<Local>,
    pub service_id: Option<String>,
    pub stylist_id: Option<String>,
    pub concurrency_check: String,
    pub client_id: String,
    pub client_name: String,
}

/// A client record sharing a guardian with the caller (a minor or guest
/// managed under the caller's account). Request-scoped; never cached.
#[derive(Debug, Clone)]
pub struct LinkedProfile {
    pub client_id: String,
    pub first_name: String,
    pub last_name: String,
    pub name: String,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum CancellationError {
    #[error("Please provide appointment_service_id or phone/email to lookup")]
    MissingLookupInput,

    #[error("No client found with that phone number")]
    ClientNotFoundByPhone,

    #[error("No client found with that phone number or email")]
    ClientNotFound,

    #[error("Could not find appointment with that ID for this caller")]
    AppointmentNotFound,

    #[error("No upcoming appointments found")]
    NoUpcomingAppointments,

    #[error("{0}")]
    Meevo(#[from] MeevoError),
}
