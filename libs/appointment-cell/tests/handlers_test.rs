// libs/appointment-cell/tests/handlers_test.rs
// APPOINTMENT BOOKING HANDLER TESTS - DIRECT HANDLER CALLS AGAINST A MOCK DOCUMENT STORE

use std::sync::Arc;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use assert_matches::assert_matches;

use appointment_cell::handlers::*;
use appointment_cell::models::*;
use appointment_cell::services::AppointmentBookingService;
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_utils::test_utils::{TestConfig, MockSupabaseResponses};

const DOCTOR_ID: &str = "doctor-row-1";
const DOCTOR_USER_ID: &str = "doctor-user-1";

fn config_for(mock_server: &MockServer) -> Arc<AppConfig> {
    TestConfig::with_supabase_url(&mock_server.uri()).to_arc()
}

fn booking(day: &str, time: &str) -> BookAppointmentRequest {
    BookAppointmentRequest {
        patient_user_id: "patient-1".to_string(),
        patient_name: Some("Maryam".to_string()),
        doctor_id: DOCTOR_ID.to_string(),
        day: day.to_string(),
        time: time.to_string(),
        reason: Some("Chest pain on exertion".to_string()),
    }
}

async fn mount_doctor(mock_server: &MockServer) {
    let mut doctor = MockSupabaseResponses::doctor_response("Dr. Aisha Al-Harthy", "Cardiology", "Muscat", "Arabic");
    doctor["id"] = json!(DOCTOR_ID);
    doctor["user_id"] = json!(DOCTOR_USER_ID);

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("id", format!("eq.{}", DOCTOR_ID).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([doctor])))
        .mount(mock_server)
        .await;
}

async fn mount_appointment(mock_server: &MockServer, appointment: Value) {
    let id = appointment["id"].as_str().unwrap().to_string();
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", format!("eq.{}", id).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([appointment])))
        .mount(mock_server)
        .await;
}

fn stored(status: &str) -> Value {
    MockSupabaseResponses::appointment_response("patient-1", DOCTOR_USER_ID, "2024-05-20", "10:00 AM", status)
}

// ==============================================================================
// BOOKING
// ==============================================================================

#[tokio::test]
async fn test_booking_targets_next_weekday_slot() {
    let mock_server = MockServer::start().await;
    mount_doctor(&mock_server).await;

    let slot_id = "doctor-user-1_2024-05-20_10:00 AM";
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", format!("eq.{}", slot_id).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .and(body_partial_json(json!({
            "id": slot_id,
            "doctor_user_id": DOCTOR_USER_ID,
            "date": "2024-05-20",
            "status": "pending",
            "type": "inperson",
            "patient_unread": true,
            "clinic_name": "Al Noor Clinic"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([stored("pending")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    // 2024-05-15 is a Wednesday, so the next Monday is the 20th
    let today = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
    let service = AppointmentBookingService::new(&config_for(&mock_server));
    let appointment = service.book_appointment(booking("Monday", "10:00 AM"), today).await.unwrap();

    assert_eq!(appointment.id, slot_id);
    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.specialty, "Cardiology");
}

#[tokio::test]
async fn test_booking_handler_returns_created() {
    let mock_server = MockServer::start().await;
    mount_doctor(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([stored("pending")])))
        .mount(&mock_server)
        .await;

    let (status, body) = book_appointment(
        State(config_for(&mock_server)),
        Json(booking("Thursday", "2:00 PM")),
    ).await.unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.0["status"], "pending");

    let received = mock_server.received_requests().await.unwrap();
    let insert = received.iter().find(|r| r.method.as_str() == "POST").unwrap();
    let sent: Value = serde_json::from_slice(&insert.body).unwrap();
    let expected = next_date_for_day(Utc::now().date_naive(), chrono::Weekday::Thu);
    assert_eq!(sent["date"], expected.format("%Y-%m-%d").to_string());
    assert_eq!(sent["day"], "Thursday");
}

#[tokio::test]
async fn test_booking_taken_slot_is_a_conflict() {
    let mock_server = MockServer::start().await;
    mount_doctor(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([stored("pending")])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = book_appointment(
        State(config_for(&mock_server)),
        Json(booking("Monday", "10:00 AM")),
    ).await;

    let error = result.unwrap_err();
    assert_matches!(error, AppError::Conflict(_));
    assert_eq!(error.into_response().status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_booking_lost_race_is_a_conflict() {
    let mock_server = MockServer::start().await;
    mount_doctor(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(409).set_body_json(
            MockSupabaseResponses::error_response("duplicate key value violates unique constraint", "23505")
        ))
        .mount(&mock_server)
        .await;

    let service = AppointmentBookingService::new(&config_for(&mock_server));
    let result = service.book_appointment(booking("Monday", "10:00 AM"), Utc::now().date_naive()).await;

    assert_matches!(result, Err(AppointmentError::SlotNotAvailable));
}

#[tokio::test]
async fn test_booking_unknown_doctor_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let result = book_appointment(
        State(config_for(&mock_server)),
        Json(booking("Monday", "10:00 AM")),
    ).await;

    assert_matches!(result, Err(AppError::NotFound(ref msg)) if msg == "Doctor not found");
}

#[tokio::test]
async fn test_booking_sunday_is_rejected_before_any_lookup() {
    let mock_server = MockServer::start().await;

    let result = book_appointment(
        State(config_for(&mock_server)),
        Json(booking("Sunday", "10:00 AM")),
    ).await;

    assert_matches!(result, Err(AppError::ValidationError(ref msg)) if msg.contains("Sunday"));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

// ==============================================================================
// LISTING
// ==============================================================================

#[tokio::test]
async fn test_patient_listing_splits_upcoming_and_history() {
    let mock_server = MockServer::start().await;

    let mut older = MockSupabaseResponses::appointment_response("patient-1", DOCTOR_USER_ID, "2024-05-20", "10:00 AM", "pending");
    older["created_at"] = json!("2024-05-01T09:00:00Z");
    let mut newer = MockSupabaseResponses::appointment_response("patient-1", DOCTOR_USER_ID, "2024-05-21", "12:00 PM", "confirmed");
    newer["created_at"] = json!("2024-05-02T09:00:00Z");
    let canceled = MockSupabaseResponses::appointment_response("patient-1", DOCTOR_USER_ID, "2024-05-18", "4:00 PM", "canceled");

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("patient_user_id", "eq.patient-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([older, canceled, newer])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = list_appointments(
        State(config_for(&mock_server)),
        Query(AppointmentListQuery { patient_user_id: Some("patient-1".to_string()), doctor_user_id: None }),
    ).await.unwrap().0;

    let upcoming = body["upcoming"].as_array().unwrap();
    assert_eq!(upcoming.len(), 2);
    assert_eq!(upcoming[0]["status"], "confirmed");
    assert_eq!(upcoming[1]["status"], "pending");
    assert_eq!(body["history"][0]["status"], "canceled");
}

#[tokio::test]
async fn test_doctor_listing_filters_by_doctor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("doctor_user_id", format!("eq.{}", DOCTOR_USER_ID).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([stored("completed")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = list_appointments(
        State(config_for(&mock_server)),
        Query(AppointmentListQuery { patient_user_id: None, doctor_user_id: Some(DOCTOR_USER_ID.to_string()) }),
    ).await.unwrap().0;

    assert!(body["upcoming"].as_array().unwrap().is_empty());
    assert_eq!(body["history"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_listing_without_owner_is_rejected() {
    let mock_server = MockServer::start().await;

    let result = list_appointments(
        State(config_for(&mock_server)),
        Query(AppointmentListQuery::default()),
    ).await;

    assert_matches!(result, Err(AppError::ValidationError(_)));
}

// ==============================================================================
// STATUS LIFECYCLE
// ==============================================================================

#[tokio::test]
async fn test_doctor_confirms_pending_appointment() {
    let mock_server = MockServer::start().await;
    let appointment = stored("pending");
    let id = appointment["id"].as_str().unwrap().to_string();
    mount_appointment(&mock_server, appointment).await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", format!("eq.{}", id).as_str()))
        .and(body_partial_json(json!({ "status": "confirmed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([stored("confirmed")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = update_appointment_status(
        State(config_for(&mock_server)),
        Path(id),
        Json(UpdateStatusRequest { status: AppointmentStatus::Confirmed }),
    ).await.unwrap().0;

    assert_eq!(body["status"], "confirmed");
}

#[tokio::test]
async fn test_completed_appointment_cannot_be_canceled() {
    let mock_server = MockServer::start().await;
    let appointment = stored("completed");
    let id = appointment["id"].as_str().unwrap().to_string();
    mount_appointment(&mock_server, appointment).await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = update_appointment_status(
        State(config_for(&mock_server)),
        Path(id),
        Json(UpdateStatusRequest { status: AppointmentStatus::Canceled }),
    ).await;

    assert_matches!(result, Err(AppError::ValidationError(ref msg)) if msg.contains("completed"));
}

#[tokio::test]
async fn test_status_update_for_missing_appointment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let result = update_appointment_status(
        State(config_for(&mock_server)),
        Path("nope".to_string()),
        Json(UpdateStatusRequest { status: AppointmentStatus::Canceled }),
    ).await;

    assert_matches!(result, Err(AppError::NotFound(_)));
}

#[tokio::test]
async fn test_canceled_appointment_can_be_removed() {
    let mock_server = MockServer::start().await;
    let appointment = stored("canceled");
    let id = appointment["id"].as_str().unwrap().to_string();
    mount_appointment(&mock_server, appointment).await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", format!("eq.{}", id).as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let status = remove_appointment(State(config_for(&mock_server)), Path(id)).await.unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_pending_appointment_cannot_be_removed() {
    let mock_server = MockServer::start().await;
    let appointment = stored("pending");
    let id = appointment["id"].as_str().unwrap().to_string();
    mount_appointment(&mock_server, appointment).await;

    let service = AppointmentBookingService::new(&config_for(&mock_server));
    assert_matches!(
        service.remove_appointment(&id).await,
        Err(AppointmentError::NotRemovable(AppointmentStatus::Pending))
    );
}
