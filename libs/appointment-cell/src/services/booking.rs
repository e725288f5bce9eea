// libs/appointment-cell/src/services/booking.rs
use chrono::{NaiveDate, Utc};
use serde_json::json;
use tracing::{debug, error, info, warn};

use doctor_cell::{DoctorDirectoryService, DoctorError};
use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{
    next_date_for_day, Appointment, AppointmentBoard, AppointmentError, AppointmentListQuery,
    AppointmentStatus, BookAppointmentRequest, IN_PERSON,
};

const APPOINTMENTS_TABLE: &str = "appointments";

/// Books in-person visits and moves them through their status lifecycle.
pub struct AppointmentBookingService {
    supabase: SupabaseClient,
    directory: DoctorDirectoryService,
}

fn database_error(context: &str, e: impl std::fmt::Display) -> AppointmentError {
    error!("{}: {}", context, e);
    AppointmentError::DatabaseError(e.to_string())
}

impl AppointmentBookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            directory: DoctorDirectoryService::new(config),
        }
    }

    /// Book the next occurrence of the requested weekday after `today`.
    pub async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
        today: NaiveDate,
    ) -> Result<Appointment, AppointmentError> {
        let weekday = request.validate()?;

        let doctor = self.directory.get_doctor(request.doctor_id.trim()).await
            .map_err(|e| match e {
                DoctorError::NotFound => AppointmentError::DoctorNotFound,
                other => AppointmentError::DatabaseError(other.to_string()),
            })?;

        let doctor_user_id = doctor.user_id.clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| doctor.id.clone());
        let date = next_date_for_day(today, weekday);
        let id = Appointment::slot_id(&doctor_user_id, date, &request.time);

        let existing: Option<Appointment> = self.supabase
            .get_by_id(APPOINTMENTS_TABLE, &id)
            .await
            .map_err(|e| database_error("Slot lookup failed", e))?;
        if existing.is_some() {
            warn!("Slot {} is already booked", id);
            return Err(AppointmentError::SlotNotAvailable);
        }

        let appointment = Appointment {
            id,
            patient_user_id: request.patient_user_id.trim().to_string(),
            patient_name: request.patient_name.map(|n| n.trim().to_string()).unwrap_or_default(),
            doctor_user_id,
            doctor_name: doctor.name,
            specialty: doctor.specialty,
            city: doctor.city,
            clinic_name: doctor.clinic_name,
            language: doctor.language,
            day: request.day,
            date,
            time: request.time,
            reason: request.reason.unwrap_or_default(),
            appointment_type: IN_PERSON.to_string(),
            status: AppointmentStatus::Pending,
            created_at: Some(Utc::now()),
            patient_unread: true,
        };

        let stored: Vec<Appointment> = self.supabase
            .insert(APPOINTMENTS_TABLE, &appointment)
            .await
            .map_err(|e| {
                // Another booking won the slot between lookup and insert
                if e.to_string().starts_with("Conflict") {
                    warn!("Slot {} was taken concurrently", appointment.id);
                    AppointmentError::SlotNotAvailable
                } else {
                    database_error("Failed to store appointment", e)
                }
            })?;

        info!("Booked appointment {} for {}", appointment.id, appointment.date);
        Ok(stored.into_iter().next().unwrap_or(appointment))
    }

    pub async fn list_appointments(&self, query: &AppointmentListQuery) -> Result<AppointmentBoard, AppointmentError> {
        let predicate = query.predicate()?;
        debug!("Listing appointments by {}", predicate.0);

        let appointments: Vec<Appointment> = self.supabase
            .select_eq(APPOINTMENTS_TABLE, &[predicate], None)
            .await
            .map_err(|e| database_error("Appointment listing failed", e))?;

        Ok(AppointmentBoard::from_appointments(appointments))
    }

    pub async fn get_appointment(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        self.supabase
            .get_by_id::<Appointment>(APPOINTMENTS_TABLE, appointment_id)
            .await
            .map_err(|e| database_error("Failed to fetch appointment", e))?
            .ok_or(AppointmentError::NotFound)
    }

    pub async fn update_status(
        &self,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        let current = self.get_appointment(appointment_id).await?;

        if !current.status.can_transition_to(status) {
            warn!("Rejected status change {} -> {} for {}", current.status, status, appointment_id);
            return Err(AppointmentError::InvalidStatusTransition { from: current.status, to: status });
        }

        let updated = self.supabase
            .update_by_id::<_, Appointment>(APPOINTMENTS_TABLE, appointment_id, &json!({ "status": status }))
            .await
            .map_err(|e| database_error("Failed to update appointment status", e))?
            .ok_or(AppointmentError::NotFound)?;

        info!("Appointment {} is now {}", appointment_id, status);
        Ok(updated)
    }

    /// Remove a canceled appointment from history.
    pub async fn remove_appointment(&self, appointment_id: &str) -> Result<(), AppointmentError> {
        let current = self.get_appointment(appointment_id).await?;
        if current.status != AppointmentStatus::Canceled {
            return Err(AppointmentError::NotRemovable(current.status));
        }

        self.supabase
            .delete_by_id(APPOINTMENTS_TABLE, appointment_id)
            .await
            .map_err(|e| database_error("Failed to remove appointment", e))?;

        info!("Removed canceled appointment {}", appointment_id);
        Ok(())
    }
}
