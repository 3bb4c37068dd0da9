/// URL base de la API (desarrollo, por defecto)
/// Sobrescribible en tiempo de compilación con API_BASE_URL_DEVELOPMENT / API_BASE_URL_PRODUCTION
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";

/// Clave de localStorage donde vive el token de sesión
pub const STORAGE_KEY_TOKEN: &str = "leva_token";

/// Espera tras un registro exitoso antes de ir al login
pub const DEFAULT_REGISTER_REDIRECT_DELAY_MS: u32 = 2000;

pub const APP_TITLE: &str = "Leva";
pub const APP_TAGLINE: &str = "Financial OS for Freight Forwarders";
