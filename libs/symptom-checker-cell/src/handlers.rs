use std::sync::Arc;

use axum::{extract::State, Json};

use shared_models::error::AppError;

use crate::models::{AnalyzeSymptomsRequest, SymptomAnalysis, SymptomCatalog};
use crate::services::{SymptomCheckerService, MAX_SELECTED_SYMPTOMS};

#[axum::debug_handler]
pub async fn get_symptom_catalog(
    State(service): State<Arc<SymptomCheckerService>>,
) -> Json<SymptomCatalog> {
    Json(service.catalog())
}

#[axum::debug_handler]
pub async fn analyze_symptoms(
    State(service): State<Arc<SymptomCheckerService>>,
    Json(request): Json<AnalyzeSymptomsRequest>,
) -> Result<Json<SymptomAnalysis>, AppError> {
    if request.symptoms.len() > MAX_SELECTED_SYMPTOMS {
        return Err(AppError::ValidationError(format!(
            "At most {} symptoms can be analyzed at once",
            MAX_SELECTED_SYMPTOMS
        )));
    }

    Ok(Json(service.analyze(&request)))
}
