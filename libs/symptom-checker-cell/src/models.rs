use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use shared_models::catalog::GENERAL_SPECIALTY;

/// A patient-reported sign, identified by its catalog label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symptom(String);

impl Symptom {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symptom {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A medical practice area; the same labels filter the doctor directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Specialty(String);

impl Specialty {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn general() -> Self {
        Self::new(GENERAL_SPECIALTY)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_general(&self) -> bool {
        self.0 == GENERAL_SPECIALTY
    }
}

impl From<&str> for Specialty {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display grouping only; has no effect on scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomGroup {
    pub title: String,
    pub items: Vec<Symptom>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomCatalog {
    pub groups: Vec<SymptomGroup>,
    pub specialties: Vec<Specialty>,
}

/// Symptoms in the order the patient selected them. That order is kept in
/// every `reasons` list of the result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeSymptomsRequest {
    #[serde(default)]
    pub symptoms: Vec<Symptom>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedSpecialty {
    pub specialty: Specialty,
    pub reasons: Vec<Symptom>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomAnalysis {
    pub recommendations: Vec<RecommendedSpecialty>,
    pub unrecognized_symptoms: Vec<Symptom>,
    pub fallback_message: Option<String>,
    pub disclaimer: String,
}

impl SymptomAnalysis {
    pub fn has_clear_match(&self) -> bool {
        !self.recommendations.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SymptomCheckerError {
    #[error("Failed to read symptom weights from {path}: {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed symptom weights: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Symptom weight table is empty")]
    EmptyTable,

    #[error("Weight {weight} for {symptom} -> {specialty} must be a positive number")]
    InvalidWeight {
        symptom: Symptom,
        specialty: Specialty,
        weight: f64,
    },

    #[error("Symptom {symptom} maps to {specialty}, which is not in the specialty catalog")]
    UnknownSpecialty { symptom: Symptom, specialty: Specialty },
}
