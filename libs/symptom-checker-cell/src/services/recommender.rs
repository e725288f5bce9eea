use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use shared_models::catalog::specialty_position;

use crate::models::{RecommendedSpecialty, Specialty, Symptom};
use crate::services::weights::WeightTable;

/// Added to every non-General contribution.
pub const SPECIFICITY_BONUS: f64 = 0.1;
/// Applied to the General score once any specific specialty has scored.
pub const GENERAL_SUPPRESSION_FACTOR: f64 = 0.6;
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Per-call accumulator of specialty scores and the symptoms behind them.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    scores: HashMap<Specialty, f64>,
    reasons: HashMap<Specialty, Vec<Symptom>>,
}

impl ScoreBoard {
    /// Sum `weight + bonus` per specialty over the selection.
    ///
    /// Repeated symptoms count once; reasons keep the order in which symptoms
    /// first appear in `selection`.
    pub fn accumulate(table: &WeightTable, selection: &[Symptom]) -> Self {
        let mut board = Self::default();
        let mut seen = HashSet::new();

        for symptom in selection {
            if !seen.insert(symptom) {
                continue;
            }
            let Some(weights) = table.weights_for(symptom) else {
                continue;
            };

            for (specialty, weight) in weights {
                let bonus = if specialty.is_general() { 0.0 } else { SPECIFICITY_BONUS };
                *board.scores.entry(specialty.clone()).or_insert(0.0) += weight + bonus;
                board.reasons.entry(specialty.clone()).or_default().push(symptom.clone());
            }
        }

        board
    }

    pub fn score(&self, specialty: &Specialty) -> Option<f64> {
        self.scores.get(specialty).copied()
    }

    pub fn reasons(&self, specialty: &Specialty) -> &[Symptom] {
        self.reasons.get(specialty).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Scale General down when any other specialty has a positive score.
    pub fn suppress_general(&mut self) {
        let has_specific = self
            .scores
            .iter()
            .any(|(specialty, score)| !specialty.is_general() && *score > 0.0);

        if has_specific {
            if let Some(general) = self.scores.get_mut(&Specialty::general()) {
                *general *= GENERAL_SUPPRESSION_FACTOR;
            }
        }
    }

    /// Positive scores, highest first; equal scores follow specialty catalog order.
    pub fn ranked(&self) -> Vec<(Specialty, f64)> {
        let mut ranked: Vec<(Specialty, f64)> = self
            .scores
            .iter()
            .filter(|(_, score)| **score > 0.0)
            .map(|(specialty, score)| (specialty.clone(), *score))
            .collect();

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| catalog_order(&a.0, &b.0)));
        ranked
    }

    fn into_recommendation(mut self, ranked: Vec<(Specialty, f64)>) -> Vec<RecommendedSpecialty> {
        ranked
            .into_iter()
            .take(MAX_RECOMMENDATIONS)
            .map(|(specialty, _)| {
                let reasons = self.reasons.remove(&specialty).unwrap_or_default();
                RecommendedSpecialty { specialty, reasons }
            })
            .collect()
    }
}

/// Rank specialties for a selection of symptoms.
///
/// Pure and total: unknown symptoms are ignored and an empty selection gives
/// an empty list, which callers present as "see a general practitioner".
pub fn recommend(table: &WeightTable, selection: &[Symptom]) -> Vec<RecommendedSpecialty> {
    let mut board = ScoreBoard::accumulate(table, selection);
    board.suppress_general();

    let ranked = demote_general(board.ranked());
    debug!(
        "Scored {} symptom(s) into {} candidate specialties",
        selection.len(),
        ranked.len()
    );

    board.into_recommendation(ranked)
}

/// Drop General outright when another specialty ties or beats it, unless
/// that would leave nothing to recommend.
fn demote_general(ranked: Vec<(Specialty, f64)>) -> Vec<(Specialty, f64)> {
    let Some(general_score) = ranked
        .iter()
        .find(|(specialty, _)| specialty.is_general())
        .map(|(_, score)| *score)
    else {
        return ranked;
    };

    let beaten = ranked
        .iter()
        .any(|(specialty, score)| !specialty.is_general() && *score >= general_score);
    if !beaten {
        return ranked;
    }

    let cleaned: Vec<(Specialty, f64)> = ranked
        .iter()
        .filter(|(specialty, _)| !specialty.is_general())
        .cloned()
        .collect();

    if cleaned.is_empty() {
        ranked
    } else {
        cleaned
    }
}

fn catalog_order(a: &Specialty, b: &Specialty) -> Ordering {
    let position = |s: &Specialty| specialty_position(s.as_str()).unwrap_or(usize::MAX);
    position(a)
        .cmp(&position(b))
        .then_with(|| a.as_str().cmp(b.as_str()))
}
