use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch},
};

use shared_config::AppConfig;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::list_appointments).post(handlers::book_appointment))
        .route("/options", get(handlers::get_booking_options))
        .route("/{appointment_id}", get(handlers::get_appointment).delete(handlers::remove_appointment))
        .route("/{appointment_id}/status", patch(handlers::update_appointment_status))
        .with_state(state)
}
