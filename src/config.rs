// ============================================================================
// CONFIG - Configuración en tiempo de compilación (.env -> build.rs -> option_env!)
// ============================================================================

use serde::{Deserialize, Serialize};
use crate::utils::constants::{DEFAULT_API_BASE_URL, DEFAULT_REGISTER_REDIRECT_DELAY_MS, STORAGE_KEY_TOKEN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url_development: String,
    pub api_base_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub register_redirect_delay_ms: u32,
    pub token_storage_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url_development: DEFAULT_API_BASE_URL.to_string(),
            api_base_url_production: DEFAULT_API_BASE_URL.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            register_redirect_delay_ms: DEFAULT_REGISTER_REDIRECT_DELAY_MS,
            token_storage_key: STORAGE_KEY_TOKEN.to_string(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url_development: option_env!("API_BASE_URL_DEVELOPMENT")
                .map(str::to_string)
                .unwrap_or(defaults.api_base_url_development),
            api_base_url_production: option_env!("API_BASE_URL_PRODUCTION")
                .map(str::to_string)
                .unwrap_or(defaults.api_base_url_production),
            environment: option_env!("ENVIRONMENT")
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: option_env!("ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            register_redirect_delay_ms: option_env!("REGISTER_REDIRECT_DELAY_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.register_redirect_delay_ms),
            token_storage_key: option_env!("TOKEN_STORAGE_KEY")
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.token_storage_key),
        }
    }

    /// URL base de la API según el entorno actual (sin barra final)
    pub fn api_base_url(&self) -> &str {
        let url = match self.environment.as_str() {
            "production" => &self.api_base_url_production,
            _ => &self.api_base_url_development,
        };
        url.trim_end_matches('/')
    }

    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Info
        } else {
            log::Level::Warn
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
