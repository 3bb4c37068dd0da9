// ============================================================================
// EVENT HANDLING - Listeners con Closure + forget()
// ============================================================================
// Los listeners de elementos se limpian cuando el elemento sale del DOM
// (cada re-render hace set_inner_html("")), así que forget() no acumula.
// Los listeners globales (window) se registran UNA VEZ al arrancar.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, InputEvent, MouseEvent};

fn listen<E, F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let mut handler = handler;
    let closure = Closure::wrap(Box::new(move |e: Event| {
        if let Ok(e) = e.dyn_into::<E>() {
            handler(e);
        }
    }) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    listen(element, "click", handler)
}

pub fn on_input<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(InputEvent) + 'static,
{
    listen(element, "input", handler)
}

/// Submit de un <form>: se cancela la navegación nativa antes de llamar al handler
pub fn on_submit<F>(form: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    listen(form, "submit", move |e: Event| {
        e.prevent_default();
        handler();
    })
}

/// Listener global de hashchange (registrar una sola vez)
pub fn on_hash_change<F>(handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let mut handler = handler;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    listen(&window, "hashchange", move |_: Event| handler())
}
