// ============================================================================
// CLIENT ERROR - Taxonomía de errores que ven las pantallas
// ============================================================================

use thiserror::Error;
use crate::services::api_client::GatewayError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Campo obligatorio vacío; se detecta antes de tocar la red
    #[error("{field} is required")]
    Validation { field: &'static str },
    /// 401 / 403
    #[error("{}", detail_or(.detail, "Not authenticated"))]
    Auth { status: u16, detail: Option<String> },
    /// Resto de respuestas no-2xx
    #[error("{}", detail_or(.detail, "Request failed"))]
    Request { status: u16, detail: Option<String> },
    /// Sin respuesta
    #[error("Network error: {0}")]
    Network(String),
    /// Respuesta con forma inesperada
    #[error("Unexpected response from server")]
    Decode(String),
}

fn detail_or<'a>(detail: &'a Option<String>, fallback: &'a str) -> &'a str {
    detail.as_deref().unwrap_or(fallback)
}

impl From<GatewayError> for ClientError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Network(msg) => ClientError::Network(msg),
            GatewayError::Status { status, detail, .. } if status == 401 || status == 403 => {
                ClientError::Auth { status, detail }
            }
            GatewayError::Status { status, detail, .. } => ClientError::Request { status, detail },
            GatewayError::Decode(msg) => ClientError::Decode(msg),
        }
    }
}

impl ClientError {
    /// `detail` enviado por el servidor, si lo hubo
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Auth { detail, .. } | ClientError::Request { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Auth { .. })
    }

    /// Mensaje para un formulario: validación, detail del servidor o `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation { .. } => self.to_string(),
            _ => self.detail().map(str::to_string).unwrap_or_else(|| fallback.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16, detail: Option<&str>) -> GatewayError {
        GatewayError::Status {
            status,
            detail: detail.map(str::to_string),
            body: String::new(),
        }
    }

    #[test]
    fn maps_gateway_errors_to_taxonomy() {
        assert!(ClientError::from(status(401, None)).is_auth());
        assert!(ClientError::from(status(403, Some("Forbidden"))).is_auth());
        assert_eq!(
            ClientError::from(status(400, Some("Email already registered"))),
            ClientError::Request { status: 400, detail: Some("Email already registered".into()) }
        );
        assert!(matches!(ClientError::from(GatewayError::Network("x".into())), ClientError::Network(_)));
        assert!(matches!(ClientError::from(GatewayError::Decode("x".into())), ClientError::Decode(_)));
    }

    #[test]
    fn user_message_prefers_server_detail() {
        let err = ClientError::from(status(401, Some("Incorrect email or password.")));
        assert_eq!(err.user_message("fallback"), "Incorrect email or password.");

        let err = ClientError::from(status(500, None));
        assert_eq!(err.user_message("Registration failed. Please try again."), "Registration failed. Please try again.");

        let err = ClientError::Network("refused".into());
        assert_eq!(err.user_message("generic"), "generic");

        let err = ClientError::Validation { field: "Email" };
        assert_eq!(err.user_message("generic"), "Email is required");
    }
}
