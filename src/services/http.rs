// ============================================================================
// HTTP TRANSPORT - Envío crudo de requests (gloo-net en el navegador)
// ============================================================================
// Una sola tentativa por llamada: sin reintentos, sin backoff, sin cola.
// ============================================================================

use std::fmt;
use async_trait::async_trait;
use gloo_net::http::Request;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        };
        f.write_str(name)
    }
}

/// Cuerpo ya serializado
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Json(String),
    Form(String),
}

impl RequestBody {
    pub fn content_type(&self) -> &'static str {
        match self {
            RequestBody::Json(_) => "application/json",
            RequestBody::Form(_) => "application/x-www-form-urlencoded",
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RequestBody::Json(s) | RequestBody::Form(s) => s,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Busca un header (nombre sin distinguir mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fallo sin respuesta del servidor
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("{0}")]
    Network(String),
}

#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Transporte real sobre fetch() vía gloo-net
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let built = match request.body {
            Some(body) => builder
                .header("Content-Type", body.content_type())
                .body(body.as_str().to_string()),
            None => builder.build(),
        }
        .map_err(|e| TransportError::Network(format!("Request build error: {}", e)))?;

        let response = built
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(format!("Body read error: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}
