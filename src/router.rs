// ============================================================================
// ROUTER - Rutas hash (#/login, #/register, #/) + guard de autenticación
// ============================================================================

use wasm_bindgen::JsValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/",
        }
    }

    /// `None` para rutas desconocidas
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_start_matches('#');
        match path {
            "" | "/" => Some(Route::Dashboard),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            _ => None,
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Dashboard)
    }
}

/// Guard: decide la ruta efectiva según el estado de autenticación.
/// - sin sesión: solo login/register
/// - con sesión: login/register redirigen al dashboard
/// - desconocida: dashboard o login según sesión
pub fn resolve_route(requested: Option<Route>, authenticated: bool) -> Route {
    match (requested, authenticated) {
        (Some(route), false) if route.requires_auth() => Route::Login,
        (Some(route), false) => route,
        (Some(_), true) => Route::Dashboard,
        (None, true) => Route::Dashboard,
        (None, false) => Route::Login,
    }
}

pub trait Navigator {
    fn navigate(&self, route: Route);
}

/// Navegación real: cambia location.hash (el listener de hashchange re-renderiza)
#[derive(Clone, Copy, Debug, Default)]
pub struct HashNavigator;

impl HashNavigator {
    pub fn current() -> Option<Route> {
        let hash = web_sys::window()?.location().hash().ok()?;
        Route::from_path(&hash)
    }
}

impl Navigator for HashNavigator {
    fn navigate(&self, route: Route) {
        log::info!("🧭 [ROUTER] -> {}", route.path());
        let result = web_sys::window()
            .ok_or_else(|| JsValue::from_str("No window"))
            .and_then(|w| w.location().set_hash(&format!("#{}", route.path())));
        if let Err(e) = result {
            log::error!("❌ [ROUTER] No se pudo navegar a {}: {:?}", route.path(), e);
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::cell::RefCell;

    /// Navigator que solo apunta las rutas
    #[derive(Default)]
    pub struct RecordingNavigator {
        routes: RefCell<Vec<Route>>,
    }

    impl RecordingNavigator {
        pub fn routes(&self) -> Vec<Route> {
            self.routes.borrow().clone()
        }
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: Route) {
            self.routes.borrow_mut().push(route);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hash_paths() {
        assert_eq!(Route::from_path("#/login"), Some(Route::Login));
        assert_eq!(Route::from_path("#/register"), Some(Route::Register));
        assert_eq!(Route::from_path(""), Some(Route::Dashboard));
        assert_eq!(Route::from_path("#/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("#/nope"), None);
    }

    #[test]
    fn unauthenticated_users_are_confined_to_auth_screens() {
        assert_eq!(resolve_route(Some(Route::Dashboard), false), Route::Login);
        assert_eq!(resolve_route(Some(Route::Login), false), Route::Login);
        assert_eq!(resolve_route(Some(Route::Register), false), Route::Register);
        assert_eq!(resolve_route(None, false), Route::Login);
    }

    #[test]
    fn authenticated_users_skip_auth_screens() {
        assert_eq!(resolve_route(Some(Route::Login), true), Route::Dashboard);
        assert_eq!(resolve_route(Some(Route::Register), true), Route::Dashboard);
        assert_eq!(resolve_route(Some(Route::Dashboard), true), Route::Dashboard);
        assert_eq!(resolve_route(None, true), Route::Dashboard);
    }
}
