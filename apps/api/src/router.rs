use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::appointment_routes;
use doctor_cell::router::doctor_routes;
use shared_config::AppConfig;
use symptom_checker_cell::{symptom_checker_routes, SymptomCheckerService};

pub fn create_router(state: Arc<AppConfig>, symptom_checker: Arc<SymptomCheckerService>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic API is running!" }))
        .nest("/symptom-checker", symptom_checker_routes(symptom_checker))
        .nest("/doctors", doctor_routes(state.clone()))
        .nest("/appointments", appointment_routes(state))
}
