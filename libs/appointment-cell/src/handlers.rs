use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{
    AppointmentError, AppointmentListQuery, BookAppointmentRequest, BookingOptions, UpdateStatusRequest,
};
use crate::services::AppointmentBookingService;

fn to_app_error(error: AppointmentError) -> AppError {
    match error {
        AppointmentError::NotFound | AppointmentError::DoctorNotFound => AppError::NotFound(error.to_string()),
        AppointmentError::SlotNotAvailable => AppError::Conflict(error.to_string()),
        AppointmentError::InvalidRequest(_)
        | AppointmentError::InvalidStatusTransition { .. }
        | AppointmentError::NotRemovable(_) => AppError::ValidationError(error.to_string()),
        AppointmentError::DatabaseError(msg) => AppError::Database(msg),
    }
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let service = AppointmentBookingService::new(&state);

    let appointment = service.book_appointment(request, Utc::now().date_naive()).await
        .map_err(to_app_error)?;

    Ok((StatusCode::CREATED, Json(json!(appointment))))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentBookingService::new(&state);

    let board = service.list_appointments(&query).await
        .map_err(to_app_error)?;

    Ok(Json(json!(board)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentBookingService::new(&state);

    let appointment = service.get_appointment(&appointment_id).await
        .map_err(to_app_error)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentBookingService::new(&state);

    let appointment = service.update_status(&appointment_id, request.status).await
        .map_err(to_app_error)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn remove_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let service = AppointmentBookingService::new(&state);

    service.remove_appointment(&appointment_id).await
        .map_err(to_app_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn get_booking_options() -> Json<Value> {
    Json(json!(BookingOptions::standard()))
}
