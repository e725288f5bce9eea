// =====================================================================================
// SYMPTOM CHECKER CELL - SYMPTOM TO SPECIALTY GUIDANCE
// =====================================================================================

pub mod catalog;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::*;
pub use router::symptom_checker_routes;
pub use services::{recommend, ScoreBoard, SymptomCheckerService, WeightTable, MAX_SELECTED_SYMPTOMS};
