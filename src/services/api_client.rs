// ============================================================================
// API CLIENT - Único punto de salida hacia la API de Leva
// ============================================================================
// Base URL fija + inyección del bearer en cada request. NO tiene lógica de
// negocio ni redirige en 401: devuelve status y detail tal cual al llamador.
// ============================================================================

use std::rc::Rc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use crate::config::CONFIG;
use crate::services::http::{GlooTransport, HttpMethod, HttpRequest, HttpTransport, RequestBody, TransportError};

pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Fuente del token de sesión (el SessionStore en la app, un fake en tests)
pub trait TokenProvider {
    fn current_token(&self) -> Option<String>;
}

/// Interceptor: añade `Authorization: Bearer <token>` si hay token.
/// Sin token el header se omite por completo.
pub fn attach_credentials(headers: &mut Vec<(String, String)>, provider: &dyn TokenProvider) {
    if let Some(token) = provider.current_token().filter(|t| !t.is_empty()) {
        headers.push((AUTHORIZATION_HEADER.to_string(), format!("Bearer {}", token)));
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// Sin respuesta del servidor
    #[error("Network error: {0}")]
    Network(String),
    /// Respuesta no-2xx; `detail` es el campo `detail` del cuerpo si existe
    #[error("HTTP {status}: {}", status_message(.detail, .body))]
    Status {
        status: u16,
        detail: Option<String>,
        body: String,
    },
    /// Cuerpo 2xx con forma inesperada
    #[error("Parse error: {0}")]
    Decode(String),
}

fn status_message(detail: &Option<String>, body: &str) -> String {
    detail.clone().unwrap_or_else(|| body.to_string())
}

impl GatewayError {
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            GatewayError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// 401 / 403
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

impl From<TransportError> for GatewayError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(msg) => GatewayError::Network(msg),
        }
    }
}

/// Extrae `detail` de un cuerpo de error FastAPI.
/// String -> tal cual; lista de validación -> los `msg` unidos con "; ".
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    tokens: Rc<dyn TokenProvider>,
}

impl ApiClient {
    /// Cliente del navegador: base URL de CONFIG + fetch() real
    pub fn new(tokens: Rc<dyn TokenProvider>) -> Self {
        Self::with_transport(CONFIG.api_base_url(), Rc::new(GlooTransport), tokens)
    }

    pub fn with_transport(
        base_url: &str,
        transport: Rc<dyn HttpTransport>,
        tokens: Rc<dyn TokenProvider>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `path` conserva su barra final ("/bookings/" != "/bookings")
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request genérico. El token se lee justo antes de enviar.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<RequestBody>,
        extra_headers: &[(&str, &str)],
    ) -> Result<String, GatewayError> {
        let mut headers: Vec<(String, String)> = extra_headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        attach_credentials(&mut headers, self.tokens.as_ref());

        let request = HttpRequest {
            method,
            url: self.url(path),
            headers,
            body,
        };

        log::info!("🌐 [API] {} {}", method, path);

        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("❌ [API] {} {} sin respuesta: {}", method, path, e);
            GatewayError::from(e)
        })?;

        if !response.is_success() {
            let detail = extract_detail(&response.body);
            log::warn!("⚠️ [API] {} {} -> HTTP {}", method, path, response.status);
            return Err(GatewayError::Status {
                status: response.status,
                detail,
                body: response.body,
            });
        }

        Ok(response.body)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let body = self.request(HttpMethod::Get, path, None, &[]).await?;
        decode(&body)
    }

    pub async fn post_json<B, T>(&self, path: &str, payload: &B) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let json = serde_json::to_string(payload)
            .map_err(|e| GatewayError::Decode(format!("Serialization error: {}", e)))?;
        let body = self
            .request(HttpMethod::Post, path, Some(RequestBody::Json(json)), &[])
            .await?;
        decode(&body)
    }

    /// POST application/x-www-form-urlencoded
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> Result<T, GatewayError> {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields.iter())
            .finish();
        let body = self
            .request(HttpMethod::Post, path, Some(RequestBody::Form(encoded)), &[])
            .await?;
        decode(&body)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, GatewayError> {
    serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))
}
