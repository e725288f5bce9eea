pub mod recommender;
pub mod weights;

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use shared_config::AppConfig;
use shared_models::catalog::SPECIALTIES;

use crate::catalog::default_symptom_groups;
use crate::models::{
    AnalyzeSymptomsRequest, Specialty, Symptom, SymptomAnalysis, SymptomCatalog,
    SymptomCheckerError, SymptomGroup,
};

pub use recommender::{recommend, ScoreBoard};
pub use weights::WeightTable;

pub const NO_CLEAR_MATCH_MESSAGE: &str = "No clear match. Consider a General practitioner.";
pub const GUIDANCE_DISCLAIMER: &str =
    "Suggestions are guidance only and NOT a diagnosis. For severe symptoms, seek urgent care immediately.";

/// Upper bound on a single selection accepted over HTTP.
pub const MAX_SELECTED_SYMPTOMS: usize = 100;

/// Serves the symptom catalog and turns selections into specialty suggestions.
///
/// Selections are scored in memory only; they are never logged or persisted.
pub struct SymptomCheckerService {
    weights: Arc<WeightTable>,
    groups: Vec<SymptomGroup>,
}

impl SymptomCheckerService {
    pub fn new(weights: Arc<WeightTable>) -> Self {
        Self {
            weights,
            groups: default_symptom_groups(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, SymptomCheckerError> {
        let weights = WeightTable::from_config(config)?;
        Ok(Self::new(Arc::new(weights)))
    }

    pub fn catalog(&self) -> SymptomCatalog {
        SymptomCatalog {
            groups: self.groups.clone(),
            specialties: SPECIALTIES.iter().map(|s| Specialty::from(*s)).collect(),
        }
    }

    pub fn analyze(&self, request: &AnalyzeSymptomsRequest) -> SymptomAnalysis {
        let recommendations = recommend(&self.weights, &request.symptoms);

        let mut seen: HashSet<&Symptom> = HashSet::new();
        let unrecognized_symptoms: Vec<Symptom> = request
            .symptoms
            .iter()
            .filter(|&symptom| !self.weights.contains(symptom) && seen.insert(symptom))
            .cloned()
            .collect();

        if !unrecognized_symptoms.is_empty() {
            debug!("Ignored {} unrecognized symptom(s)", unrecognized_symptoms.len());
        }
        debug!(
            "Symptom analysis: {} selected, {} specialties suggested",
            request.symptoms.len(),
            recommendations.len()
        );

        let fallback_message = recommendations
            .is_empty()
            .then(|| NO_CLEAR_MATCH_MESSAGE.to_string());

        SymptomAnalysis {
            recommendations,
            unrecognized_symptoms,
            fallback_message,
            disclaimer: GUIDANCE_DISCLAIMER.to_string(),
        }
    }
}
