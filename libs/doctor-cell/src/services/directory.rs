// libs/doctor-cell/src/services/directory.rs
use tracing::{debug, info, error};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Doctor, DoctorError, DoctorFilterOptions, DoctorSearchFilters};

const DOCTORS_TABLE: &str = "doctors";

/// Read-only doctor directory backed by the document store.
pub struct DoctorDirectoryService {
    supabase: SupabaseClient,
}

impl DoctorDirectoryService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Search doctors by specialty, city and language. Unset filters match everything.
    pub async fn search_doctors(&self, filters: DoctorSearchFilters) -> Result<Vec<Doctor>, DoctorError> {
        let filters = filters.normalized();
        filters.validate()?;

        let predicates = filters.predicates();
        debug!("Searching doctors with {} filter(s)", predicates.len());

        let doctors: Vec<Doctor> = self.supabase
            .select_eq(DOCTORS_TABLE, &predicates, Some("name"))
            .await
            .map_err(|e| {
                error!("Doctor search failed: {}", e);
                DoctorError::DatabaseError(e.to_string())
            })?;

        info!("Doctor search returned {} result(s)", doctors.len());
        Ok(doctors)
    }

    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Doctor, DoctorError> {
        debug!("Fetching doctor {}", doctor_id);

        self.supabase
            .get_by_id::<Doctor>(DOCTORS_TABLE, doctor_id)
            .await
            .map_err(|e| {
                error!("Failed to fetch doctor {}: {}", doctor_id, e);
                DoctorError::DatabaseError(e.to_string())
            })?
            .ok_or(DoctorError::NotFound)
    }

    pub fn filter_options() -> DoctorFilterOptions {
        DoctorFilterOptions::from_catalog()
    }
}
