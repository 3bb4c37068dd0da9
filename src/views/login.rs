// ============================================================================
// LOGIN VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{append_child, on_submit, ElementBuilder};
use crate::router::Route;
use crate::state::AppState;
use crate::views::form::{brand_header, field_group, status_banner, submit_button, switch_link};

pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [LOGIN] render_login()");
    let status = state.login.status();

    let form = ElementBuilder::new("form")?
        .class("auth-form")
        .attr("novalidate", "")?
        .build();

    let heading = ElementBuilder::new("h2")?.text("Login").build();
    append_child(&form, &heading)?;

    if let Some(banner) = status_banner(&status)? {
        append_child(&form, &banner)?;
    }

    append_child(&form, &field_group(
        "email", "Email", "email", "user@example.com",
        &state.login_form, |f| &f.username, |f| &mut f.username, status.busy,
    )?)?;
    append_child(&form, &field_group(
        "password", "Password", "password", "Enter your password",
        &state.login_form, |f| &f.password, |f| &mut f.password, status.busy,
    )?)?;
    append_child(&form, &submit_button("Login", status.busy)?)?;
    append_child(&form, &switch_link(
        "Don't have an account?", "Register here", Route::Register, state.navigator.clone(),
    )?)?;

    {
        let vm = state.login.clone();
        let values = state.login_form.clone();
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
