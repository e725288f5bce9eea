use std::sync::Arc;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub symptom_weights_path: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
            symptom_weights_path: None,
        }
    }
}

impl TestConfig {
    /// Point the document store at a mock server (e.g. `MockServer::uri()`).
    pub fn with_supabase_url(url: &str) -> Self {
        Self {
            supabase_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            symptom_weights_path: self.symptom_weights_path.clone(),
            server_port: 3000,
        }
    }
    
    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn doctor_response(name: &str, specialty: &str, city: &str, language: &str) -> serde_json::Value {
        let user_id = Uuid::new_v4().to_string();
        json!({
            "id": user_id,
            "user_id": user_id,
            "name": name,
            "specialty": specialty,
            "city": city,
            "language": language,
            "clinic_name": "Al Noor Clinic",
            "created_at": Utc::now().to_rfc3339()
        })
    }
    
    pub fn appointment_response(
        patient_user_id: &str,
        doctor_user_id: &str,
        date: &str,
        time: &str,
        status: &str,
    ) -> serde_json::Value {
        json!({
            "id": format!("{}_{}_{}", doctor_user_id, date, time),
            "patient_user_id": patient_user_id,
            "patient_name": "Maryam",
            "doctor_user_id": doctor_user_id,
            "doctor_name": "Dr. Aisha Al-Harthy",
            "specialty": "Cardiology",
            "city": "Muscat",
            "clinic_name": "Al Noor Clinic",
            "language": "Arabic",
            "day": "Monday",
            "date": date,
            "time": time,
            "reason": "Chest pain on exertion",
            "type": "inperson",
            "status": status,
            "created_at": Utc::now().to_rfc3339(),
            "patient_unread": true
        })
    }

    pub fn error_response(message: &str, code: &str) -> serde_json::Value {
        json!({
            "message": message,
            "code": code
        })
    }
}
