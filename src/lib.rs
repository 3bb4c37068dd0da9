// ============================================================================
// LEVA PWA - FRONTEND MVVM ESTRICTO (RUST PURO)
// ============================================================================
// Arquitectura MVVM estricta:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Estado + Lógica UI (testeables sin navegador)
// - Services: SOLO comunicación API
// - State: SessionStore + ReactiveState con Rc<RefCell>
// - Models: Estructuras compartidas con backend
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;
mod dom;
mod views;
mod app;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_logger::Config;
use crate::app::App;
use crate::config::CONFIG;

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!("🚀 Leva - Rust Puro + MVVM ({})", CONFIG.environment);
    log::info!("🌐 API: {}", CONFIG.api_base_url());

    let mut app = App::new()?;
    app.render()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    // Cualquier cambio de hash (navegación, atrás/adelante) re-renderiza
    dom::on_hash_change(rerender_app)?;

    Ok(())
}

/// Re-render completo de la app
pub fn rerender_app() {
    APP.with(|app_cell| {
        // try_borrow_mut: un render en curso no puede anidar otro
        match app_cell.try_borrow_mut() {
            Ok(mut guard) => match guard.as_mut() {
                Some(app) => {
                    if let Err(e) = app.render() {
                        log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
                    }
                }
                None => log::warn!("⚠️ [RERENDER] App no está inicializada"),
            },
            Err(_) => log::warn!("⚠️ [RERENDER] Render en curso, se omite"),
        }
    });
}

/// Re-render llamable desde JavaScript
#[wasm_bindgen]
pub fn rerender_app_wasm() {
    rerender_app();
}

/// Ruta activa tras el guard (útil para depurar desde la consola)
#[wasm_bindgen]
pub fn current_route() -> String {
    APP.with(|app_cell| {
        app_cell
            .borrow()
            .as_ref()
            .map(|app| app.current_route().path().to_string())
            .unwrap_or_default()
    })
}
