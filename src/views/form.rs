// ============================================================================
// FORM HELPERS - Piezas comunes de login y registro
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{input_value, on_click, on_input, set_input_value, ElementBuilder};
use crate::router::{Navigator, Route};
use crate::utils::constants::{APP_TAGLINE, APP_TITLE};
use crate::viewmodels::FormStatus;

/// Grupo label + input enlazado a un campo del formulario.
/// `read`/`write` acceden al campo dentro del RefCell compartido.
pub fn field_group<T: 'static>(
    id: &str,
    label_text: &str,
    input_type: &str,
    placeholder: &str,
    form: &Rc<RefCell<T>>,
    read: fn(&T) -> &String,
    write: fn(&mut T) -> &mut String,
    disabled: bool,
) -> Result<Element, JsValue> {
    let label = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label_text)
        .build();

    let input = ElementBuilder::new("input")?
        .class("form-input")
        .attr("type", input_type)?
        .attr("id", id)?
        .attr("name", id)?
        .attr("placeholder", placeholder)?
        .disabled(disabled)?
        .build();
    set_input_value(&input, read(&form.borrow()));

    {
        let form = form.clone();
        let target = input.clone();
        on_input(&input, move |_| {
            *write(&mut form.borrow_mut()) = input_value(&target);
        })?;
    }

    ElementBuilder::new("div")?
        .class("form-group")
        .child(label)?
        .child(input)
        .map(ElementBuilder::build)
}

/// Cabecera con marca común a las pantallas de auth
pub fn brand_header() -> Result<Element, JsValue> {
    let title = ElementBuilder::new("h1")?.class("brand-title").text(APP_TITLE).build();
    let tagline = ElementBuilder::new("p")?.class("brand-tagline").text(APP_TAGLINE).build();
    ElementBuilder::new("div")?
        .class("auth-header")
        .children([title, tagline])
        .map(ElementBuilder::build)
}

/// Caja de error / éxito según el estado del formulario
pub fn status_banner(status: &FormStatus) -> Result<Option<Element>, JsValue> {
    if let Some(error) = &status.error {
        return ElementBuilder::new("div")?
            .class("alert alert-error")
            .attr("role", "alert")
            .map(|b| Some(b.text(error).build()));
    }
    if let Some(success) = &status.success {
        return ElementBuilder::new("div")?
            .class("alert alert-success")
            .attr("role", "status")
            .map(|b| Some(b.text(success).build()));
    }
    Ok(None)
}

pub fn submit_button(label: &str, busy: bool) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .class(if busy { "btn-primary btn-loading" } else { "btn-primary" })
        .attr("type", "submit")?
        .disabled(busy)?
        .text(if busy { "Please wait..." } else { label })
        .build())
}

/// "Don't have an account? Register here" y similares
pub fn switch_link(
    prompt: &str,
    link_text: &str,
    route: Route,
    navigator: Rc<dyn Navigator>,
) -> Result<Element, JsValue> {
    let link = ElementBuilder::new("a")?
        .class("link")
        .attr("href", &format!("#{}", route.path()))?
        .text(link_text)
        .build();
    on_click(&link, move |e| {
        e.prevent_default();
        navigator.navigate(route);
    })?;

    let prompt = ElementBuilder::new("span")?.text(&format!("{} ", prompt)).build();
    ElementBuilder::new("p")?
        .class("auth-switch")
        .children([prompt, link])
        .map(ElementBuilder::build)
}
