// ============================================================================
// APP VIEW - Pantalla según la ruta ya resuelta por el guard
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::router::Route;
use crate::state::AppState;
use crate::views::{render_dashboard, render_login, render_register};

pub fn render_app(state: &AppState, route: Route) -> Result<Element, JsValue> {
    match route {
        Route::Login => render_login(state),
        Route::Register => render_register(state),
        Route::Dashboard => render_dashboard(state),
    }
}
