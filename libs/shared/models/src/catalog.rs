//! Reference lists shared by every cell that filters or recommends doctors.
//!
//! Specialty labels produced by the symptom checker must be usable verbatim
//! as doctor-search filters, so both sides read them from here.

/// Specialty catalog. Declaration order is the tie-break order for ranking.
pub const SPECIALTIES: &[&str] = &[
    "Cardiology",
    "Dermatology",
    "ENT",
    "Gastroenterology",
    "General",
    "Neurology",
    "Ophthalmology",
    "Orthopedics",
    "Pediatrics",
    "Pulmonology",
    "Rheumatology",
];

/// The generic specialty that suppression and demotion rules single out.
pub const GENERAL_SPECIALTY: &str = "General";

pub const CITIES: &[&str] = &[
    "Barka", "Dhofar", "Ibri", "Muscat", "Nizwa", "Salalah", "Sohar", "Sur",
];

pub const LANGUAGES: &[&str] = &["Arabic", "English", "Hindi"];

pub fn specialty_position(label: &str) -> Option<usize> {
    SPECIALTIES.iter().position(|s| *s == label)
}

pub fn is_known_specialty(label: &str) -> bool {
    specialty_position(label).is_some()
}

pub fn is_known_city(label: &str) -> bool {
    CITIES.contains(&label)
}

pub fn is_known_language(label: &str) -> bool {
    LANGUAGES.contains(&label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_is_a_catalog_specialty() {
        assert!(is_known_specialty(GENERAL_SPECIALTY));
    }

    #[test]
    fn test_specialty_position_follows_declaration_order() {
        assert_eq!(specialty_position("Cardiology"), Some(0));
        assert!(specialty_position("Dermatology") < specialty_position("ENT"));
        assert_eq!(specialty_position("Astrology"), None);
    }

    #[test]
    fn test_lookups_are_case_sensitive() {
        assert!(is_known_city("Muscat"));
        assert!(!is_known_city("muscat"));
        assert!(is_known_language("Arabic"));
        assert!(!is_known_language("French"));
    }
}
