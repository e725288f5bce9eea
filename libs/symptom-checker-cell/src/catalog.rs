//! Built-in symptom knowledge base.

use crate::models::{Symptom, SymptomGroup};

pub const SYMPTOM_GROUPS: &[(&str, &[&str])] = &[
    ("General", &["Fever", "Fatigue", "Weight Loss", "Night Sweats", "Loss of Appetite"]),
    ("Head & Neurological", &["Headache", "Dizziness", "Confusion"]),
    ("Respiratory", &["Cough", "Shortness of Breath", "Wheezing", "Sore Throat"]),
    ("Cardiovascular", &["Chest Pain", "Chest Tightness", "Palpitations", "Swollen Legs"]),
    ("Digestive", &["Nausea", "Vomiting", "Diarrhea", "Constipation", "Abdominal Pain"]),
    ("Musculoskeletal", &["Joint Pain", "Back Pain", "Stiffness"]),
    ("Skin", &["Rash", "Itching", "Skin Discoloration"]),
];

/// Symptom -> (specialty, weight). Specific specialties carry the larger
/// weights; "General" only gets a small share.
pub const DEFAULT_WEIGHTS: &[(&str, &[(&str, f64)])] = &[
    // constitutional
    ("Fever", &[("General", 0.6)]),
    ("Fatigue", &[("General", 0.6)]),
    ("Weight Loss", &[("General", 0.6)]),
    ("Night Sweats", &[("General", 0.6)]),
    ("Loss of Appetite", &[("General", 0.6)]),
    // neuro
    ("Headache", &[("Neurology", 1.2), ("General", 0.4)]),
    ("Dizziness", &[("Neurology", 1.0), ("General", 0.4)]),
    ("Confusion", &[("Neurology", 1.4)]),
    // respiratory / ENT
    ("Cough", &[("Pulmonology", 1.0), ("ENT", 0.6), ("General", 0.3)]),
    ("Shortness of Breath", &[("Pulmonology", 1.5), ("Cardiology", 0.8)]),
    ("Wheezing", &[("Pulmonology", 1.4)]),
    ("Sore Throat", &[("ENT", 1.2)]),
    // cardio
    ("Chest Pain", &[("Cardiology", 1.6), ("Pulmonology", 0.6)]),
    ("Chest Tightness", &[("Cardiology", 1.2)]),
    ("Palpitations", &[("Cardiology", 1.3)]),
    ("Swollen Legs", &[("Cardiology", 1.0)]),
    // GI
    ("Nausea", &[("Gastroenterology", 1.0), ("General", 0.3)]),
    ("Vomiting", &[("Gastroenterology", 1.3)]),
    ("Diarrhea", &[("Gastroenterology", 1.3)]),
    ("Constipation", &[("Gastroenterology", 1.2)]),
    ("Abdominal Pain", &[("Gastroenterology", 1.4)]),
    // MSK / rheum
    ("Joint Pain", &[("Orthopedics", 1.0), ("Rheumatology", 0.9)]),
    ("Back Pain", &[("Orthopedics", 1.2)]),
    ("Stiffness", &[("Rheumatology", 1.0)]),
    // derm
    ("Rash", &[("Dermatology", 1.6)]),
    ("Itching", &[("Dermatology", 1.2)]),
    ("Skin Discoloration", &[("Dermatology", 1.2)]),
];

pub fn default_symptom_groups() -> Vec<SymptomGroup> {
    SYMPTOM_GROUPS
        .iter()
        .map(|(title, items)| SymptomGroup {
            title: title.to_string(),
            items: items.iter().map(|label| Symptom::from(*label)).collect(),
        })
        .collect()
}

/// Every displayable symptom, in catalog order.
pub fn catalog_symptoms() -> impl Iterator<Item = Symptom> {
    SYMPTOM_GROUPS
        .iter()
        .flat_map(|(_, items)| items.iter())
        .map(|label| Symptom::from(*label))
}
