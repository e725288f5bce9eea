use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::services::SymptomCheckerService;

pub fn symptom_checker_routes(service: Arc<SymptomCheckerService>) -> Router {
    Router::new()
        .route("/symptoms", get(handlers::get_symptom_catalog))
        .route("/analyze", post(handlers::analyze_symptoms))
        .with_state(service)
}
