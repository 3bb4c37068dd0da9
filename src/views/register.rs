// ============================================================================
// REGISTER VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{append_child, on_submit, ElementBuilder};
use crate::router::Route;
use crate::state::AppState;
use crate::views::form::{brand_header, field_group, status_banner, submit_button, switch_link};

pub fn render_register(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [REGISTER] render_register()");
    let status = state.register.status();
    // Tras el acuse no se reenvía: solo queda esperar la redirección
    let locked = status.busy || status.success.is_some();

    let form = ElementBuilder::new("form")?
        .class("auth-form")
        .attr("novalidate", "")?
        .build();

    let heading = ElementBuilder::new("h2")?.text("Create Account").build();
    append_child(&form, &heading)?;

    if let Some(banner) = status_banner(&status)? {
        append_child(&form, &banner)?;
    }

    let values = &state.register_form;
    append_child(&form, &field_group(
        "organization_name", "Organization Name", "text", "Your Company Name",
        values, |f| &f.organization_name, |f| &mut f.organization_name, locked,
    )?)?;
    append_child(&form, &field_group(
        "full_name", "Full Name", "text", "John Doe",
        values, |f| &f.full_name, |f| &mut f.full_name, locked,
    )?)?;
    append_child(&form, &field_group(
        "email", "Email", "email", "user@example.com",
        values, |f| &f.email, |f| &mut f.email, locked,
    )?)?;
    append_child(&form, &field_group(
        "password", "Password", "password", "Enter your password",
        values, |f| &f.password, |f| &mut f.password, locked,
    )?)?;
    append_child(&form, &submit_button("Register", locked)?)?;
    append_child(&form, &switch_link(
        "Already have an account?", "Login here", Route::Login, state.navigator.clone(),
    )?)?;

    {
        let vm = state.register.clone();
        let values = values.clone();
        on_submit(&form, move || {
            let vm = vm.clone();
            let snapshot = values.borrow().clone();
            spawn_local(async move {
                vm.submit(&snapshot).await;
            });
        })?;
    }

    let card = ElementBuilder::new("div")?.class("auth-card").child(form)?.build();
    ElementBuilder::new("div")?
        .class("auth-screen")
        .children([brand_header()?, card])
        .map(ElementBuilder::build)
}
