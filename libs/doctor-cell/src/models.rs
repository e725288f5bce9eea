use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use shared_models::catalog::{is_known_city, is_known_language, is_known_specialty, CITIES, LANGUAGES, SPECIALTIES};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub user_id: Option<String>,
    pub name: String,
    pub specialty: String,
    pub city: Option<String>,
    pub language: String,
    pub clinic_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Equality filters for the doctor directory; `None` means "any".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoctorSearchFilters {
    pub specialty: Option<String>,
    pub city: Option<String>,
    pub language: Option<String>,
}

impl DoctorSearchFilters {
    /// Blank values come from "any" options in the search form.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            specialty: clean(self.specialty),
            city: clean(self.city),
            language: clean(self.language),
        }
    }

    pub fn validate(&self) -> Result<(), DoctorError> {
        let checks: [(&str, &Option<String>, fn(&str) -> bool); 3] = [
            ("specialty", &self.specialty, is_known_specialty),
            ("city", &self.city, is_known_city),
            ("language", &self.language, is_known_language),
        ];

        for (field, value, is_known) in checks {
            if let Some(value) = value {
                if !is_known(value) {
                    return Err(DoctorError::InvalidFilter {
                        field: field.to_string(),
                        value: value.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// `(column, value)` pairs for the filters that are set.
    pub fn predicates(&self) -> Vec<(&'static str, &str)> {
        [
            ("specialty", self.specialty.as_deref()),
            ("city", self.city.as_deref()),
            ("language", self.language.as_deref()),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.map(|v| (column, v)))
        .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorFilterOptions {
    pub specialties: Vec<String>,
    pub cities: Vec<String>,
    pub languages: Vec<String>,
}

impl DoctorFilterOptions {
    pub fn from_catalog() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            specialties: owned(SPECIALTIES),
            cities: owned(CITIES),
            languages: owned(LANGUAGES),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound,

    #[error("Unknown {field} filter: {value}")]
    InvalidFilter { field: String, value: String },

    #[error("Database error: {0}")]
    DatabaseError(String),
}
