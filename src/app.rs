// ============================================================================
// APP - Aplicación principal: guard de rutas + re-render completo
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::router::{resolve_route, HashNavigator, Route};
use crate::state::AppState;
use crate::views::render_app;

pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new();
        log::info!(
            "🔐 [APP] Sesión inicial: {}",
            if state.session.is_authenticated() { "autenticada" } else { "anónima" }
        );

        // Varios cambios seguidos se agrupan en un solo re-render
        let scheduler = Rc::clone(&state.scheduler);
        state.subscribe_to_changes(move || {
            scheduler.schedule(0, Box::new(crate::rerender_app));
        });

        Ok(Self { state, root })
    }

    /// Resuelve la ruta con el guard, monta/desmonta la lista y pinta la pantalla
    pub fn render(&mut self) -> Result<(), JsValue> {
        let requested = HashNavigator::current();
        let route = resolve_route(requested, self.state.session.is_authenticated());
        if requested != Some(route) {
            log::info!("🧭 [APP] Redirección {:?} -> {:?}", requested, route);
            self.state.navigator.navigate(route);
        }

        if let Some(vm) = self.state.enter_route(route) {
            spawn_local(async move {
                vm.load(false).await;
            });
        }

        set_inner_html(&self.root, "");
        let view = render_app(&self.state, route)?;
        append_child(&self.root, &view)?;
        Ok(())
    }

    pub fn current_route(&self) -> Route {
        resolve_route(HashNavigator::current(), self.state.session.is_authenticated())
    }
}
