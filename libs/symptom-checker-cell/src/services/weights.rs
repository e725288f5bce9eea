use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_models::catalog::is_known_specialty;

use crate::catalog::{catalog_symptoms, DEFAULT_WEIGHTS};
use crate::models::{Specialty, Symptom, SymptomCheckerError};

/// Immutable symptom -> specialty -> weight mapping.
///
/// Built once at startup and shared behind an `Arc`; there is no way to
/// mutate it afterwards. Replacing the knowledge base means building a new
/// table from a weights file.
#[derive(Debug, Clone)]
pub struct WeightTable {
    entries: HashMap<Symptom, HashMap<Specialty, f64>>,
}

impl WeightTable {
    /// Validates every weight and specialty before accepting the table.
    pub fn new(entries: HashMap<Symptom, HashMap<Specialty, f64>>) -> Result<Self, SymptomCheckerError> {
        if entries.is_empty() {
            return Err(SymptomCheckerError::EmptyTable);
        }

        for (symptom, weights) in &entries {
            for (specialty, weight) in weights {
                if !weight.is_finite() || *weight <= 0.0 {
                    return Err(SymptomCheckerError::InvalidWeight {
                        symptom: symptom.clone(),
                        specialty: specialty.clone(),
                        weight: *weight,
                    });
                }
                if !is_known_specialty(specialty.as_str()) {
                    return Err(SymptomCheckerError::UnknownSpecialty {
                        symptom: symptom.clone(),
                        specialty: specialty.clone(),
                    });
                }
            }
        }

        let table = Self { entries };
        table.audit_against_catalog();
        Ok(table)
    }

    /// The knowledge base shipped with the service.
    pub fn builtin() -> Self {
        let entries = DEFAULT_WEIGHTS
            .iter()
            .map(|(symptom, weights)| {
                let weights = weights
                    .iter()
                    .map(|(specialty, weight)| (Specialty::from(*specialty), *weight))
                    .collect();
                (Symptom::from(*symptom), weights)
            })
            .collect();

        Self { entries }
    }

    /// Parse `{"<symptom>": {"<specialty>": weight, ...}, ...}`.
    pub fn from_json_str(raw: &str) -> Result<Self, SymptomCheckerError> {
        let entries: HashMap<Symptom, HashMap<Specialty, f64>> = serde_json::from_str(raw)?;
        Self::new(entries)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SymptomCheckerError> {
        let path = path.as_ref();
        debug!("Loading symptom weights from {}", path.display());

        let raw = fs::read_to_string(path).map_err(|source| SymptomCheckerError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&raw)
    }

    /// Built-in table unless `SYMPTOM_WEIGHTS_PATH` points at a replacement.
    pub fn from_config(config: &AppConfig) -> Result<Self, SymptomCheckerError> {
        let table = match config.symptom_weights_path.as_deref() {
            Some(path) => Self::from_file(path)?,
            None => Self::builtin(),
        };

        info!(
            "Symptom weight table ready: {} symptoms ({})",
            table.len(),
            if config.uses_custom_symptom_weights() { "custom" } else { "built-in" }
        );

        Ok(table)
    }

    /// `None` for symptoms the table does not know; callers treat that as no contribution.
    pub fn weights_for(&self, symptom: &Symptom) -> Option<&HashMap<Specialty, f64>> {
        self.entries.get(symptom)
    }

    pub fn contains(&self, symptom: &Symptom) -> bool {
        self.entries.contains_key(symptom)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn audit_against_catalog(&self) {
        let displayed: HashSet<Symptom> = catalog_symptoms().collect();

        for symptom in &displayed {
            if !self.contains(symptom) {
                warn!("Catalog symptom '{}' has no weights and will never contribute", symptom);
            }
        }

        for symptom in self.entries.keys() {
            if !displayed.contains(symptom) {
                warn!("Weighted symptom '{}' is not in the display catalog", symptom);
            }
        }
    }
}
