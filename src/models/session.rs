// ============================================================================
// SESSION - Token de sesión + flag derivado
// ============================================================================

/// Sesión del usuario.
///
/// `authenticated` se deriva siempre del token: es `true` solo si hay token no vacío.
/// Los campos son privados para que nadie pueda romper esa relación.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    token: Option<String>,
    authenticated: bool,
}

impl Session {
    /// Sesión sin credenciales
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Sesión a partir de un token (vacío => anónima)
    pub fn with_token(token: Option<String>) -> Self {
        match token {
            Some(t) if !t.is_empty() => Self {
                token: Some(t),
                authenticated: true,
            },
            _ => Self::anonymous(),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}
