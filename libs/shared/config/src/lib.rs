use std::env;
use tracing::warn;

const DEFAULT_SERVER_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Optional JSON file that replaces the built-in symptom weight table.
    pub symptom_weights_path: Option<String>,
    pub server_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            symptom_weights_path: env::var("SYMPTOM_WEIGHTS_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty()),
            server_port: match env::var("SERVER_PORT") {
                Ok(raw) => raw.parse().unwrap_or_else(|_| {
                    warn!("SERVER_PORT '{}' is not a valid port, using {}", raw, DEFAULT_SERVER_PORT);
                    DEFAULT_SERVER_PORT
                }),
                Err(_) => DEFAULT_SERVER_PORT,
            },
        };
        
        if !config.is_configured() {
            warn!("Document store not configured - doctor search will fail until SUPABASE_* is set");
        }
        
        config
    }
    
    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty() 
            && !self.supabase_anon_key.is_empty()
    }

    pub fn uses_custom_symptom_weights(&self) -> bool {
        self.symptom_weights_path.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str, key: &str) -> AppConfig {
        AppConfig {
            supabase_url: url.to_string(),
            supabase_anon_key: key.to_string(),
            symptom_weights_path: None,
            server_port: DEFAULT_SERVER_PORT,
        }
    }

    #[test]
    fn test_is_configured_requires_url_and_key() {
        assert!(config("https://db.example.com", "anon").is_configured());
        assert!(!config("", "anon").is_configured());
        assert!(!config("https://db.example.com", "").is_configured());
    }

    #[test]
    fn test_custom_symptom_weights_flag() {
        let mut cfg = config("", "");
        assert!(!cfg.uses_custom_symptom_weights());

        cfg.symptom_weights_path = Some("/etc/clinic/weights.json".to_string());
        assert!(cfg.uses_custom_symptom_weights());
    }
}
