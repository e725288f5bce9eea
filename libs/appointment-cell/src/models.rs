use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Bookable weekdays, in the order the booking form offers them.
pub const BOOKING_DAYS: &[(&str, Weekday)] = &[
    ("Monday", Weekday::Mon),
    ("Tuesday", Weekday::Tue),
    ("Wednesday", Weekday::Wed),
    ("Thursday", Weekday::Thu),
    ("Friday", Weekday::Fri),
    ("Saturday", Weekday::Sat),
];

pub const BOOKING_TIMES: &[&str] = &["10:00 AM", "12:00 PM", "2:00 PM", "4:00 PM"];

pub const IN_PERSON: &str = "inperson";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Canceled,
    Completed,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Canceled => write!(f, "canceled"),
            AppointmentStatus::Completed => write!(f, "completed"),
        }
    }
}

impl AppointmentStatus {
    pub fn valid_transitions(&self) -> &'static [AppointmentStatus] {
        match self {
            AppointmentStatus::Pending => &[AppointmentStatus::Confirmed, AppointmentStatus::Canceled],
            AppointmentStatus::Confirmed => &[AppointmentStatus::Completed, AppointmentStatus::Canceled],
            // Terminal states
            AppointmentStatus::Canceled | AppointmentStatus::Completed => &[],
        }
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        self.valid_transitions().contains(&next)
    }

    pub fn is_upcoming(&self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub patient_user_id: String,
    #[serde(default)]
    pub patient_name: String,
    pub doctor_user_id: String,
    pub doctor_name: String,
    pub specialty: String,
    pub city: Option<String>,
    pub clinic_name: Option<String>,
    pub language: String,
    pub day: String,
    pub date: NaiveDate,
    pub time: String,
    #[serde(default)]
    pub reason: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub status: AppointmentStatus,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub patient_unread: bool,
}

impl Appointment {
    /// Slot key: one booking per doctor, date and time.
    pub fn slot_id(doctor_user_id: &str, date: NaiveDate, time: &str) -> String {
        format!("{}_{}_{}", doctor_user_id, date.format("%Y-%m-%d"), time)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub patient_user_id: String,
    #[serde(default)]
    pub patient_name: Option<String>,
    pub doctor_id: String,
    pub day: String,
    pub time: String,
    #[serde(default)]
    pub reason: Option<String>,
}

impl BookAppointmentRequest {
    pub fn validate(&self) -> Result<Weekday, AppointmentError> {
        if self.patient_user_id.trim().is_empty() {
            return Err(AppointmentError::InvalidRequest("patient_user_id is required".to_string()));
        }
        if self.doctor_id.trim().is_empty() {
            return Err(AppointmentError::InvalidRequest("doctor_id is required".to_string()));
        }
        if !BOOKING_TIMES.contains(&self.time.as_str()) {
            return Err(AppointmentError::InvalidRequest(format!("Unknown time slot: {}", self.time)));
        }

        booking_weekday(&self.day)
            .ok_or_else(|| AppointmentError::InvalidRequest(format!("Unknown booking day: {}", self.day)))
    }
}

pub fn booking_weekday(day: &str) -> Option<Weekday> {
    BOOKING_DAYS
        .iter()
        .find(|(name, _)| *name == day)
        .map(|(_, weekday)| *weekday)
}

/// Next date falling on `day`, strictly after `today`.
pub fn next_date_for_day(today: NaiveDate, day: Weekday) -> NaiveDate {
    let mut diff = day.num_days_from_monday() as i64 - today.weekday().num_days_from_monday() as i64;
    if diff <= 0 {
        diff += 7;
    }
    today + chrono::Duration::days(diff)
}

/// Whose appointments to list. Exactly one side must be given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentListQuery {
    pub patient_user_id: Option<String>,
    pub doctor_user_id: Option<String>,
}

impl AppointmentListQuery {
    pub fn predicate(&self) -> Result<(&'static str, &str), AppointmentError> {
        fn clean(v: &Option<String>) -> Option<&str> {
            v.as_deref().map(str::trim).filter(|v| !v.is_empty())
        }

        match (clean(&self.patient_user_id), clean(&self.doctor_user_id)) {
            (Some(patient), None) => Ok(("patient_user_id", patient)),
            (None, Some(doctor)) => Ok(("doctor_user_id", doctor)),
            _ => Err(AppointmentError::InvalidRequest(
                "Provide exactly one of patient_user_id or doctor_user_id".to_string(),
            )),
        }
    }
}

/// Appointments split the way the dashboard shows them, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentBoard {
    pub upcoming: Vec<Appointment>,
    pub history: Vec<Appointment>,
}

impl AppointmentBoard {
    pub fn from_appointments(mut appointments: Vec<Appointment>) -> Self {
        appointments.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.date.cmp(&a.date))
                .then_with(|| b.time.cmp(&a.time))
        });

        let (upcoming, history): (Vec<_>, Vec<_>) = appointments
            .into_iter()
            .partition(|a| a.status.is_upcoming());

        Self { upcoming, history }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingOptions {
    pub days: Vec<String>,
    pub times: Vec<String>,
}

impl BookingOptions {
    pub fn standard() -> Self {
        Self {
            days: BOOKING_DAYS.iter().map(|(name, _)| name.to_string()).collect(),
            times: BOOKING_TIMES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Appointment slot not available")]
    SlotNotAvailable,

    #[error("Cannot change appointment from {from} to {to}")]
    InvalidStatusTransition { from: AppointmentStatus, to: AppointmentStatus },

    #[error("Only canceled appointments can be removed, this one is {0}")]
    NotRemovable(AppointmentStatus),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_next_date_is_strictly_after_today() {
        // 2024-05-15 is a Wednesday
        let today = date(2024, 5, 15);
        assert_eq!(today.weekday(), Weekday::Wed);

        assert_eq!(next_date_for_day(today, Weekday::Thu), date(2024, 5, 16));
        assert_eq!(next_date_for_day(today, Weekday::Wed), date(2024, 5, 22));
        assert_eq!(next_date_for_day(today, Weekday::Mon), date(2024, 5, 20));
    }

    #[test]
    fn test_slot_id_combines_doctor_date_and_time() {
        assert_eq!(
            Appointment::slot_id("doc-1", date(2024, 5, 20), "10:00 AM"),
            "doc-1_2024-05-20_10:00 AM"
        );
    }

    #[test]
    fn test_status_transitions() {
        use AppointmentStatus::*;

        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Canceled));
        assert!(!Pending.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Canceled));
        assert!(Canceled.valid_transitions().is_empty());
        assert!(Completed.valid_transitions().is_empty());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_value(AppointmentStatus::Canceled).unwrap(), "canceled");
        let status: AppointmentStatus = serde_json::from_value(serde_json::json!("confirmed")).unwrap();
        assert_eq!(status, AppointmentStatus::Confirmed);
        assert_eq!(AppointmentStatus::Pending.to_string(), "pending");
    }

    #[test]
    fn test_booking_request_validation() {
        let mut request = BookAppointmentRequest {
            patient_user_id: "p1".to_string(),
            patient_name: None,
            doctor_id: "d1".to_string(),
            day: "Saturday".to_string(),
            time: "2:00 PM".to_string(),
            reason: None,
        };
        assert_eq!(request.validate().unwrap(), Weekday::Sat);

        request.day = "Sunday".to_string();
        assert!(matches!(request.validate(), Err(AppointmentError::InvalidRequest(_))));

        request.day = "Monday".to_string();
        request.time = "9:00 AM".to_string();
        assert!(matches!(request.validate(), Err(AppointmentError::InvalidRequest(_))));
    }

    #[test]
    fn test_list_query_needs_exactly_one_side() {
        let patient = AppointmentListQuery { patient_user_id: Some("p1".into()), doctor_user_id: None };
        assert_eq!(patient.predicate().unwrap(), ("patient_user_id", "p1"));

        let doctor = AppointmentListQuery { patient_user_id: Some(" ".into()), doctor_user_id: Some("d1".into()) };
        assert_eq!(doctor.predicate().unwrap(), ("doctor_user_id", "d1"));

        assert!(AppointmentListQuery::default().predicate().is_err());
        let both = AppointmentListQuery { patient_user_id: Some("p1".into()), doctor_user_id: Some("d1".into()) };
        assert!(both.predicate().is_err());
    }

    #[test]
    fn test_booking_options_cover_the_week_but_sunday() {
        let options = BookingOptions::standard();
        assert_eq!(options.days.len(), 6);
        assert!(!options.days.contains(&"Sunday".to_string()));
        assert_eq!(options.times, vec!["10:00 AM", "12:00 PM", "2:00 PM", "4:00 PM"]);
    }
}
