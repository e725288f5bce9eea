use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/filters", get(handlers::get_filter_options))
        .route("/search", get(handlers::search_doctors_public))
        .route("/{doctor_id}", get(handlers::get_doctor_public))
        .with_state(state)
}
