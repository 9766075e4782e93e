use std::sync::Arc;

use axum::{routing::get, Router};

use cancellation_cell::router::cancellation_routes;
use cancellation_cell::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Cancel Appointment relay is running!" }))
        .merge(cancellation_routes(state))
}
