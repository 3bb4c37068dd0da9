use crate::models::{LoginRequest, RegisterRequest, TokenResponse, UserPublic};
use crate::services::api_client::{ApiClient, GatewayError};

pub const LOGIN_PATH: &str = "/auth/token";
pub const REGISTER_PATH: &str = "/auth/register";

/// POST /auth/token (form-urlencoded, estilo OAuth2 password)
pub async fn perform_login(api: &ApiClient, request: &LoginRequest) -> Result<TokenResponse, GatewayError> {
    log::info!("🔐 [AUTH] Login para {}", request.username);
    api.post_form(
        LOGIN_PATH,
        &[("username", request.username.as_str()), ("password", request.password.as_str())],
    )
    .await
}

/// POST /auth/register (crea usuario + organización)
pub async fn register_user(api: &ApiClient, request: &RegisterRequest) -> Result<UserPublic, GatewayError> {
    log::info!("📝 [AUTH] Registro de {} ({})", request.email, request.organization_name);
    api.post_json(REGISTER_PATH, request).await
}
