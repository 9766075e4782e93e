// libs/cancellation-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn cancellation_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/cancel", post(handlers::cancel_appointment))
        .route("/health", get(handlers::health))
        .with_state(state)
}
