// libs/cancellation-cell/src/handlers.rs
use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::models::{CancelRequest, CancelResponse};
use crate::services::cancellation::CancellationService;
use crate::state::AppState;

/// `POST /cancel`. Always answers HTTP 200; the outcome is carried in the
/// body so the voice platform branches on `success`, not the status code.
#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CancelRequest>,
) -> Json<CancelResponse> {
    info!(
        "Cancel request: phone={:?} email={:?} appointment_service_id={:?}",
        request.phone(),
        request.email(),
        request.appointment_service_id()
    );

    let service = CancellationService::new(&state);

    match service.cancel(&request).await {
        Ok(service_id) => Json(CancelResponse::cancelled(service_id)),
        Err(e) => {
            warn!("Cancel request failed: {}", e);
            Json(CancelResponse::failure(e.to_string()))
        }
    }
}

/// `GET /health`. Static status payload, no side effects.
#[axum::debug_handler]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "environment": state.config.environment_name,
        "location": state.config.location_name,
        "service": "Cancel Appointment",
    }))
}
