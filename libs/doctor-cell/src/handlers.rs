use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{DoctorError, DoctorSearchFilters};
use crate::services::DoctorDirectoryService;

fn to_app_error(error: DoctorError) -> AppError {
    match error {
        DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
        DoctorError::InvalidFilter { .. } => AppError::ValidationError(error.to_string()),
        DoctorError::DatabaseError(msg) => AppError::Database(msg),
    }
}

#[axum::debug_handler]
pub async fn search_doctors_public(
    State(state): State<Arc<AppConfig>>,
    Query(filters): Query<DoctorSearchFilters>,
) -> Result<Json<Value>, AppError> {
    let directory = DoctorDirectoryService::new(&state);

    let doctors = directory.search_doctors(filters).await
        .map_err(to_app_error)?;

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor_public(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let directory = DoctorDirectoryService::new(&state);

    let doctor = directory.get_doctor(&doctor_id).await
        .map_err(to_app_error)?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn get_filter_options() -> Json<Value> {
    Json(json!(DoctorDirectoryService::filter_options()))
}
